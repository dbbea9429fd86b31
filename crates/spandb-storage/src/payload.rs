//! Debug serialization payload for a numeric column.
//!
//! The payload carries the sortedness flag, the element-type wire tag, and
//! the raw value buffer in host byte order. It exists for in-process debug
//! round-trips; it is not a stable on-disk format.

use std::sync::Arc;

use spandb_error::{Result, SpanError};
use spandb_types::ColumnType;

use crate::column::NumericColumnData;

/// Serialized form of a numeric column.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoragePayload {
    /// Caller-asserted sortedness of the values.
    pub is_sorted: bool,
    /// [`ColumnType`] wire tag.
    pub column_type: u32,
    /// Densely packed element bytes, host byte order, length
    /// `len * element_size`.
    pub values: Vec<u8>,
}

fn decode<T, const N: usize>(bytes: &[u8], from_bytes: impl Fn([u8; N]) -> T) -> Arc<[T]> {
    bytes
        .chunks_exact(N)
        .map(|chunk| {
            let mut buf = [0u8; N];
            buf.copy_from_slice(chunk);
            from_bytes(buf)
        })
        .collect()
}

/// Reconstruct column data from a payload, validating the tag and the value
/// buffer length.
pub(crate) fn decode_column(payload: &StoragePayload) -> Result<NumericColumnData> {
    let Some(column_type) = ColumnType::from_tag(payload.column_type) else {
        return Err(SpanError::UnknownColumnType {
            tag: payload.column_type,
        });
    };

    let width = column_type.element_size();
    if payload.values.len() % width != 0 {
        return Err(SpanError::MalformedPayload {
            detail: format!(
                "value buffer length {} is not a multiple of {width}",
                payload.values.len()
            ),
        });
    }

    Ok(match column_type {
        ColumnType::Uint32 => {
            NumericColumnData::Uint32(decode(&payload.values, u32::from_ne_bytes))
        }
        ColumnType::Int32 => NumericColumnData::Int32(decode(&payload.values, i32::from_ne_bytes)),
        ColumnType::Int64 => NumericColumnData::Int64(decode(&payload.values, i64::from_ne_bytes)),
        ColumnType::Double => {
            NumericColumnData::Double(decode(&payload.values, f64::from_ne_bytes))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tag_is_rejected() {
        let payload = StoragePayload {
            is_sorted: false,
            column_type: 42,
            values: Vec::new(),
        };
        assert!(matches!(
            decode_column(&payload),
            Err(SpanError::UnknownColumnType { tag: 42 })
        ));
    }

    #[test]
    fn ragged_value_buffer_is_rejected() {
        let payload = StoragePayload {
            is_sorted: false,
            column_type: ColumnType::Int64.tag(),
            values: vec![0u8; 7],
        };
        assert!(matches!(
            decode_column(&payload),
            Err(SpanError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn decode_reverses_host_order_packing() {
        let original = NumericColumnData::from(vec![3i32, -1, i32::MAX]);
        let payload = StoragePayload {
            is_sorted: true,
            column_type: original.column_type().tag(),
            values: original.to_bytes(),
        };
        let decoded = decode_column(&payload).unwrap();
        match decoded {
            NumericColumnData::Int32(values) => assert_eq!(&values[..], &[3, -1, i32::MAX]),
            other => panic!("wrong variant: {other:?}"),
        }
    }
}
