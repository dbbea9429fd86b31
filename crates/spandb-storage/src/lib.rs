//! Typed numeric column storage engine.
//!
//! A [`NumericStorage`] owns a contiguous, strongly-typed numeric column
//! (`u32`, `i32`, `i64`, or `f64`) and answers three query primitives
//! against it:
//!
//! - [`NumericStorage::search`]: rows in a dense range matching a
//!   comparison against a scalar.
//! - [`NumericStorage::index_search`]: the same over an externally
//!   supplied row-index list, answered in index-list space.
//! - [`NumericStorage::stable_sort`]: stable reordering of an external
//!   index array by column values.
//!
//! Results come back as [`RangeOrBitVec`]: a compact contiguous
//! [`RowRange`] whenever the sorted fast path can produce one, a
//! [`BitVec`] otherwise. Before any scan, constraint validation
//! ([`validate_search_constraints`]) decides whether the predicate is
//! trivially all-rows or no-rows based on value class and numeric range
//! alone.
//!
//! # Concurrency
//!
//! A column is immutable from construction to teardown. Storage handles are
//! cheap to clone (the data is behind an `Arc`) and any number of threads
//! may run queries against the same column concurrently; nothing locks,
//! suspends, or performs I/O. `stable_sort` mutates only the caller-owned
//! index array.

mod bounds;
mod column;
mod payload;
mod scan;
mod validate;

pub use column::NumericColumnData;
pub use payload::StoragePayload;
pub use validate::{SearchValidationResult, validate_search_constraints};

use spandb_error::{Result, SpanError};
use spandb_types::{BitVec, BitVecBuilder, ColumnType, FilterOp, RowRange, ScalarValue};
use tracing::{debug, warn};

use crate::column::NumericValue;

// ---------------------------------------------------------------------------
// Result sum type
// ---------------------------------------------------------------------------

/// A query result: a contiguous row range when the answer is one, a bitmap
/// otherwise. Consumers must handle both arms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RangeOrBitVec {
    Range(RowRange),
    BitVec(BitVec),
}

impl RangeOrBitVec {
    /// The range arm, if this result is one.
    #[must_use]
    pub const fn as_range(&self) -> Option<RowRange> {
        match self {
            Self::Range(r) => Some(*r),
            Self::BitVec(_) => None,
        }
    }

    /// The bitmap arm, if this result is one.
    #[must_use]
    pub const fn as_bit_vec(&self) -> Option<&BitVec> {
        match self {
            Self::BitVec(bv) => Some(bv),
            Self::Range(_) => None,
        }
    }

    /// Flatten into a bitmap of logical length `len`, with a range arm
    /// materialized as its set of member rows.
    ///
    /// # Panics
    ///
    /// Panics if the result does not fit in `len` bits.
    #[must_use]
    pub fn into_bit_vec(self, len: usize) -> BitVec {
        match self {
            Self::BitVec(bv) => {
                assert!(bv.len() <= len, "bitmap longer than requested length");
                let mut bv = bv;
                bv.resize(len, false);
                bv
            }
            Self::Range(r) => {
                assert!(r.end as usize <= len, "range {r} exceeds requested length");
                let mut bv = BitVec::with_len(r.start as usize, false);
                bv.resize(r.end as usize, true);
                bv.resize(len, false);
                bv
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Column storage seam
// ---------------------------------------------------------------------------

/// The query surface a column storage implementation exposes to the query
/// executor. [`NumericStorage`] is the numeric implementation; string, id,
/// and null storages live elsewhere and share this seam.
pub trait ColumnStorage {
    /// Number of rows stored.
    fn len(&self) -> u32;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Classify `(value, op)` without touching column data.
    fn validate_search_constraints(
        &self,
        value: &ScalarValue,
        op: FilterOp,
    ) -> SearchValidationResult;

    /// Rows in `range` whose value satisfies `op value`.
    fn search(&self, op: FilterOp, value: &ScalarValue, range: RowRange) -> RangeOrBitVec;

    /// Positions `k` in `indices` where `column[indices[k]]` satisfies
    /// `op value`. `sorted` asserts the values at those indices are
    /// non-decreasing.
    fn index_search(
        &self,
        op: FilterOp,
        value: &ScalarValue,
        indices: &[u32],
        sorted: bool,
    ) -> RangeOrBitVec;

    /// Stably reorder `rows` by this column's values.
    fn stable_sort(&self, rows: &mut [u32]);

    /// Reorder `rows` by this column's values, order among equals
    /// unspecified. Reserved; implementations may report not-implemented.
    fn sort(&self, rows: &mut [u32]) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Numeric storage
// ---------------------------------------------------------------------------

/// Immutable typed numeric column with a caller-asserted sortedness flag.
#[derive(Clone, Debug)]
pub struct NumericStorage {
    data: NumericColumnData,
    is_sorted: bool,
}

impl NumericStorage {
    /// Wrap typed column data.
    ///
    /// `is_sorted` is the caller's assertion that values are non-decreasing
    /// under the element type's natural ordering; it selects the binary
    /// search fast path and is not verified here.
    ///
    /// # Panics
    ///
    /// Panics if the column holds more than `u32::MAX` rows.
    #[must_use]
    pub fn new(data: NumericColumnData, is_sorted: bool) -> Self {
        assert!(
            u32::try_from(data.len()).is_ok(),
            "column length exceeds the u32 row space"
        );
        Self { data, is_sorted }
    }

    #[must_use]
    pub fn from_u32s(values: Vec<u32>, is_sorted: bool) -> Self {
        Self::new(NumericColumnData::from(values), is_sorted)
    }

    #[must_use]
    pub fn from_i32s(values: Vec<i32>, is_sorted: bool) -> Self {
        Self::new(NumericColumnData::from(values), is_sorted)
    }

    #[must_use]
    pub fn from_i64s(values: Vec<i64>, is_sorted: bool) -> Self {
        Self::new(NumericColumnData::from(values), is_sorted)
    }

    #[must_use]
    pub fn from_f64s(values: Vec<f64>, is_sorted: bool) -> Self {
        Self::new(NumericColumnData::from(values), is_sorted)
    }

    /// Reconstruct a column from its serialization payload.
    pub fn from_payload(payload: &StoragePayload) -> Result<Self> {
        let data = payload::decode_column(payload)?;
        Ok(Self::new(data, payload.is_sorted))
    }

    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        self.data.column_type()
    }

    #[must_use]
    pub const fn is_sorted(&self) -> bool {
        self.is_sorted
    }

    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn len(&self) -> u32 {
        // Checked at construction.
        self.data.len() as u32
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Emit the debug serialization payload for this column.
    #[must_use]
    pub fn serialize(&self) -> StoragePayload {
        StoragePayload {
            is_sorted: self.is_sorted,
            column_type: self.column_type().tag(),
            values: self.data.to_bytes(),
        }
    }

    /// Classify `(value, op)` against this column without touching data.
    ///
    /// # Panics
    ///
    /// See [`validate_search_constraints`].
    #[must_use]
    pub fn validate_search_constraints(
        &self,
        value: &ScalarValue,
        op: FilterOp,
    ) -> SearchValidationResult {
        validate::validate_search_constraints(self.column_type(), value, op)
    }

    /// Rows in `range` whose value satisfies `op value`.
    ///
    /// Sorted columns answer every operator except `Ne` with a contiguous
    /// [`RowRange`] in O(log n) comparisons; `Ne` is the complement of the
    /// `Eq` range inside `range`, materialized as a bitmap. Unsorted columns
    /// linear-scan into a bitmap seeded at `range.start`.
    ///
    /// # Panics
    ///
    /// Panics if `range.end` exceeds the column length, or on the planner
    /// bugs described at [`validate_search_constraints`].
    #[must_use]
    pub fn search(&self, op: FilterOp, value: &ScalarValue, range: RowRange) -> RangeOrBitVec {
        assert!(
            range.end <= self.len(),
            "search range {range} exceeds column length {}",
            self.len()
        );
        debug!(start = range.start, end = range.end, op = %op, "numeric storage search");
        spandb_observability::record_search();

        match self.validate_search_constraints(value, op) {
            SearchValidationResult::AllData => {
                spandb_observability::record_search_short_circuit();
                return RangeOrBitVec::Range(range);
            }
            SearchValidationResult::NoData => {
                spandb_observability::record_search_short_circuit();
                return RangeOrBitVec::Range(RowRange::empty_at(range.start));
            }
            SearchValidationResult::Ok => {}
        }

        let probe = NumericValue::narrow(self.column_type(), value);

        if self.is_sorted {
            if op != FilterOp::Ne {
                return RangeOrBitVec::Range(self.binary_search_dense(op, probe, range));
            }
            // Not-equal does not describe a range; take the complement of
            // the equal run inside the search range.
            let eq = self.binary_search_dense(FilterOp::Eq, probe, range);
            let mut bv = BitVec::with_len(range.start as usize, false);
            bv.resize(eq.start as usize, true);
            bv.resize(eq.end as usize, false);
            bv.resize(range.end as usize, true);
            return RangeOrBitVec::BitVec(bv);
        }

        RangeOrBitVec::BitVec(self.linear_search_dense(op, probe, range))
    }

    /// Positions `k` in `indices` where `column[indices[k]]` satisfies
    /// `op value`, answered in index-list space.
    ///
    /// With `sorted` (the values *at those indices* are non-decreasing) the
    /// result is a contiguous range over `[0, indices.len())`, except `Ne`
    /// which complements the `Eq` run into a bitmap. Without it, bit `k` of
    /// the resulting length-`m` bitmap reflects the predicate on
    /// `column[indices[k]]`.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds for the column, or on the
    /// planner bugs described at [`validate_search_constraints`].
    #[must_use]
    pub fn index_search(
        &self,
        op: FilterOp,
        value: &ScalarValue,
        indices: &[u32],
        sorted: bool,
    ) -> RangeOrBitVec {
        assert!(
            u32::try_from(indices.len()).is_ok(),
            "index list length exceeds the u32 row space"
        );
        #[allow(clippy::cast_possible_truncation)]
        let m = indices.len() as u32;
        debug!(count = m, op = %op, "numeric storage index search");
        spandb_observability::record_index_search();

        match self.validate_search_constraints(value, op) {
            SearchValidationResult::AllData => {
                spandb_observability::record_search_short_circuit();
                return RangeOrBitVec::Range(RowRange::new(0, m));
            }
            SearchValidationResult::NoData => {
                spandb_observability::record_search_short_circuit();
                return RangeOrBitVec::Range(RowRange::empty_at(0));
            }
            SearchValidationResult::Ok => {}
        }

        let probe = NumericValue::narrow(self.column_type(), value);

        if sorted {
            if op != FilterOp::Ne {
                return RangeOrBitVec::Range(self.binary_search_indices(op, probe, indices));
            }
            let eq = self.binary_search_indices(FilterOp::Eq, probe, indices);
            let mut bv = BitVec::with_len(eq.start as usize, true);
            bv.resize(eq.end as usize, false);
            bv.resize(indices.len(), true);
            return RangeOrBitVec::BitVec(bv);
        }

        RangeOrBitVec::BitVec(self.linear_search_indices(op, probe, indices))
    }

    /// Stably reorder `rows` (row indices into this column) so their column
    /// values are non-decreasing; equal values keep their original relative
    /// order. The column itself is untouched.
    ///
    /// `f64` keys compare with [`f64::total_cmp`], so NaNs order after
    /// positive infinity (negative NaN before negative infinity) and the
    /// result is deterministic even for columns containing NaN.
    pub fn stable_sort(&self, rows: &mut [u32]) {
        spandb_observability::record_stable_sort();
        match &self.data {
            NumericColumnData::Uint32(values) => rows.sort_by_key(|&i| values[i as usize]),
            NumericColumnData::Int32(values) => rows.sort_by_key(|&i| values[i as usize]),
            NumericColumnData::Int64(values) => rows.sort_by_key(|&i| values[i as usize]),
            NumericColumnData::Double(values) => {
                rows.sort_by(|&a, &b| values[a as usize].total_cmp(&values[b as usize]));
            }
        }
    }

    /// Reserved non-stable sort. Logs and reports not-implemented; `rows`
    /// is left untouched.
    pub fn sort(&self, _rows: &mut [u32]) -> Result<()> {
        warn!("numeric storage sort is not implemented");
        Err(SpanError::NotImplemented { what: "sort" })
    }

    // -----------------------------------------------------------------------
    // Typed dispatch
    // -----------------------------------------------------------------------

    fn linear_search_dense(&self, op: FilterOp, probe: NumericValue, range: RowRange) -> BitVec {
        let mut builder = BitVecBuilder::new(range.end as usize, range.start as usize);
        let (s, e) = (range.start as usize, range.end as usize);
        match (&self.data, probe) {
            (NumericColumnData::Uint32(values), NumericValue::Uint32(v)) => {
                scan::linear_search(v, &values[s..e], op, &mut builder);
            }
            (NumericColumnData::Int32(values), NumericValue::Int32(v)) => {
                scan::linear_search(v, &values[s..e], op, &mut builder);
            }
            (NumericColumnData::Int64(values), NumericValue::Int64(v)) => {
                scan::linear_search(v, &values[s..e], op, &mut builder);
            }
            (NumericColumnData::Double(values), NumericValue::Double(v)) => {
                scan::linear_search(v, &values[s..e], op, &mut builder);
            }
            _ => panic!("numeric probe does not match column element type"),
        }
        builder.build()
    }

    fn linear_search_indices(
        &self,
        op: FilterOp,
        probe: NumericValue,
        indices: &[u32],
    ) -> BitVec {
        let mut builder = BitVecBuilder::new(indices.len(), 0);
        match (&self.data, probe) {
            (NumericColumnData::Uint32(values), NumericValue::Uint32(v)) => {
                scan::index_search(v, values, indices, op, &mut builder);
            }
            (NumericColumnData::Int32(values), NumericValue::Int32(v)) => {
                scan::index_search(v, values, indices, op, &mut builder);
            }
            (NumericColumnData::Int64(values), NumericValue::Int64(v)) => {
                scan::index_search(v, values, indices, op, &mut builder);
            }
            (NumericColumnData::Double(values), NumericValue::Double(v)) => {
                scan::index_search(v, values, indices, op, &mut builder);
            }
            _ => panic!("numeric probe does not match column element type"),
        }
        builder.build()
    }

    fn binary_search_dense(&self, op: FilterOp, probe: NumericValue, range: RowRange) -> RowRange {
        match (&self.data, probe) {
            (NumericColumnData::Uint32(values), NumericValue::Uint32(v)) => {
                bounds::search_range(op, v, values, range)
            }
            (NumericColumnData::Int32(values), NumericValue::Int32(v)) => {
                bounds::search_range(op, v, values, range)
            }
            (NumericColumnData::Int64(values), NumericValue::Int64(v)) => {
                bounds::search_range(op, v, values, range)
            }
            (NumericColumnData::Double(values), NumericValue::Double(v)) => {
                bounds::search_range(op, v, values, range)
            }
            _ => panic!("numeric probe does not match column element type"),
        }
    }

    fn binary_search_indices(
        &self,
        op: FilterOp,
        probe: NumericValue,
        indices: &[u32],
    ) -> RowRange {
        match (&self.data, probe) {
            (NumericColumnData::Uint32(values), NumericValue::Uint32(v)) => {
                bounds::search_index_range(op, v, values, indices)
            }
            (NumericColumnData::Int32(values), NumericValue::Int32(v)) => {
                bounds::search_index_range(op, v, values, indices)
            }
            (NumericColumnData::Int64(values), NumericValue::Int64(v)) => {
                bounds::search_index_range(op, v, values, indices)
            }
            (NumericColumnData::Double(values), NumericValue::Double(v)) => {
                bounds::search_index_range(op, v, values, indices)
            }
            _ => panic!("numeric probe does not match column element type"),
        }
    }
}

impl ColumnStorage for NumericStorage {
    fn len(&self) -> u32 {
        NumericStorage::len(self)
    }

    fn validate_search_constraints(
        &self,
        value: &ScalarValue,
        op: FilterOp,
    ) -> SearchValidationResult {
        NumericStorage::validate_search_constraints(self, value, op)
    }

    fn search(&self, op: FilterOp, value: &ScalarValue, range: RowRange) -> RangeOrBitVec {
        NumericStorage::search(self, op, value, range)
    }

    fn index_search(
        &self,
        op: FilterOp,
        value: &ScalarValue,
        indices: &[u32],
        sorted: bool,
    ) -> RangeOrBitVec {
        NumericStorage::index_search(self, op, value, indices, sorted)
    }

    fn stable_sort(&self, rows: &mut [u32]) {
        NumericStorage::stable_sort(self, rows);
    }

    fn sort(&self, rows: &mut [u32]) -> Result<()> {
        NumericStorage::sort(self, rows)
    }
}
