//! Typed column data and the per-query narrowed probe value.
//!
//! The column buffer is reinterpreted exactly once, at construction, into a
//! typed slice behind an `Arc`. Every query after that works on a `&[T]`
//! with no per-row type dispatch; concurrent readers share the same
//! allocation without locking.

use std::sync::Arc;

use spandb_types::{ColumnType, ScalarValue};

/// The typed backing store of a numeric column.
///
/// One variant per supported element type. The variant is fixed at
/// construction and never changes; cloning is cheap (`Arc` bump).
#[derive(Clone, Debug)]
pub enum NumericColumnData {
    Uint32(Arc<[u32]>),
    Int32(Arc<[i32]>),
    Int64(Arc<[i64]>),
    Double(Arc<[f64]>),
}

impl NumericColumnData {
    /// The element type stored in this column.
    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        match self {
            Self::Uint32(_) => ColumnType::Uint32,
            Self::Int32(_) => ColumnType::Int32,
            Self::Int64(_) => ColumnType::Int64,
            Self::Double(_) => ColumnType::Double,
        }
    }

    /// Number of stored elements.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Uint32(v) => v.len(),
            Self::Int32(v) => v.len(),
            Self::Int64(v) => v.len(),
            Self::Double(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The raw element bytes in host byte order, densely packed.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        fn pack<T: Copy, const N: usize>(values: &[T], to_bytes: impl Fn(T) -> [u8; N]) -> Vec<u8> {
            let mut out = Vec::with_capacity(values.len() * N);
            for &v in values {
                out.extend_from_slice(&to_bytes(v));
            }
            out
        }

        match self {
            Self::Uint32(v) => pack(v, u32::to_ne_bytes),
            Self::Int32(v) => pack(v, i32::to_ne_bytes),
            Self::Int64(v) => pack(v, i64::to_ne_bytes),
            Self::Double(v) => pack(v, f64::to_ne_bytes),
        }
    }
}

impl From<Vec<u32>> for NumericColumnData {
    fn from(values: Vec<u32>) -> Self {
        Self::Uint32(values.into())
    }
}

impl From<Vec<i32>> for NumericColumnData {
    fn from(values: Vec<i32>) -> Self {
        Self::Int32(values.into())
    }
}

impl From<Vec<i64>> for NumericColumnData {
    fn from(values: Vec<i64>) -> Self {
        Self::Int64(values.into())
    }
}

impl From<Vec<f64>> for NumericColumnData {
    fn from(values: Vec<f64>) -> Self {
        Self::Double(values.into())
    }
}

/// A query scalar narrowed to the column's element type.
///
/// Narrowing happens once per query, after constraint validation has
/// confirmed the scalar fits the element type. Scans and bound computations
/// only ever see this form.
#[derive(Clone, Copy, Debug)]
pub(crate) enum NumericValue {
    Uint32(u32),
    Int32(i32),
    Int64(i64),
    Double(f64),
}

impl NumericValue {
    /// Narrow `value` to the element type of a column.
    ///
    /// # Panics
    ///
    /// Panics if the scalar's storage class cannot feed a scan of this
    /// column type. Constraint validation rejects such queries before
    /// narrowing, so reaching the panic means a planner bug.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn narrow(column_type: ColumnType, value: &ScalarValue) -> Self {
        match column_type {
            ColumnType::Double => match value {
                ScalarValue::Integer(i) => Self::Double(*i as f64),
                ScalarValue::Float(f) => Self::Double(*f),
                other => panic!("cannot narrow {} probe for a double column", other.type_name()),
            },
            ColumnType::Int64 => match value.as_integer() {
                Some(i) => Self::Int64(i),
                None => panic!("cannot narrow {} probe for an int64 column", value.type_name()),
            },
            // Range validation has already confirmed the value fits, so the
            // truncating casts below are exact.
            ColumnType::Int32 => match value.as_integer() {
                Some(i) => Self::Int32(i as i32),
                None => panic!("cannot narrow {} probe for an int32 column", value.type_name()),
            },
            ColumnType::Uint32 => match value.as_integer() {
                Some(i) => Self::Uint32(i as u32),
                None => panic!("cannot narrow {} probe for a uint32 column", value.type_name()),
            },
        }
    }
}
