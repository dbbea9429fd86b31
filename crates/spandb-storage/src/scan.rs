//! Linear comparison scans.
//!
//! The operator is resolved to a concrete comparator closure before the loop
//! starts, so each `(element type, operator)` pair monomorphizes into its own
//! branch-free inner loop. Two index spaces exist: the dense scan walks a
//! contiguous slice of the column, the sparse scan dereferences an external
//! index list and produces a bitmap aligned to that list.

use spandb_types::{BitVecBuilder, FilterOp};

#[inline]
fn scan_with<T: Copy>(values: &[T], builder: &mut BitVecBuilder, pred: impl Fn(T) -> bool) {
    for &v in values {
        builder.push(pred(v));
    }
}

#[inline]
fn scan_indices_with<T: Copy>(
    values: &[T],
    indices: &[u32],
    builder: &mut BitVecBuilder,
    pred: impl Fn(T) -> bool,
) {
    for &idx in indices {
        builder.push(pred(values[idx as usize]));
    }
}

/// Dense scan of `values` (already sliced to the search range), appending
/// one bit per element to `builder`.
///
/// # Panics
///
/// Panics if `op` is not one of the six numeric comparisons; those never
/// reach a scan loop.
pub(crate) fn linear_search<T>(
    value: T,
    values: &[T],
    op: FilterOp,
    builder: &mut BitVecBuilder,
) where
    T: Copy + PartialOrd,
{
    match op {
        FilterOp::Eq => scan_with(values, builder, |v| v == value),
        FilterOp::Ne => scan_with(values, builder, |v| v != value),
        FilterOp::Lt => scan_with(values, builder, |v| v < value),
        FilterOp::Le => scan_with(values, builder, |v| v <= value),
        FilterOp::Gt => scan_with(values, builder, |v| v > value),
        FilterOp::Ge => scan_with(values, builder, |v| v >= value),
        other => panic!("{other} is not a scannable operation on a numeric column"),
    }
}

/// Sparse scan over an external index list; bit `k` of the output reflects
/// the predicate on `values[indices[k]]`.
///
/// # Panics
///
/// Panics if `op` is not one of the six numeric comparisons, or if an index
/// is out of bounds for the column.
pub(crate) fn index_search<T>(
    value: T,
    values: &[T],
    indices: &[u32],
    op: FilterOp,
    builder: &mut BitVecBuilder,
) where
    T: Copy + PartialOrd,
{
    match op {
        FilterOp::Eq => scan_indices_with(values, indices, builder, |v| v == value),
        FilterOp::Ne => scan_indices_with(values, indices, builder, |v| v != value),
        FilterOp::Lt => scan_indices_with(values, indices, builder, |v| v < value),
        FilterOp::Le => scan_indices_with(values, indices, builder, |v| v <= value),
        FilterOp::Gt => scan_indices_with(values, indices, builder, |v| v > value),
        FilterOp::Ge => scan_indices_with(values, indices, builder, |v| v >= value),
        other => panic!("{other} is not a scannable operation on a numeric column"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spandb_types::BitVec;

    fn run_dense(values: &[i64], op: FilterOp, probe: i64) -> Vec<bool> {
        let mut builder = BitVecBuilder::new(values.len(), 0);
        linear_search(probe, values, op, &mut builder);
        let bv = builder.build();
        (0..bv.len()).map(|i| bv.get(i)).collect()
    }

    #[test]
    fn dense_scan_covers_all_operators() {
        let values = [5i64, 2, 5, 7];
        assert_eq!(run_dense(&values, FilterOp::Eq, 5), [true, false, true, false]);
        assert_eq!(run_dense(&values, FilterOp::Ne, 5), [false, true, false, true]);
        assert_eq!(run_dense(&values, FilterOp::Lt, 5), [false, true, false, false]);
        assert_eq!(run_dense(&values, FilterOp::Le, 5), [true, true, true, false]);
        assert_eq!(run_dense(&values, FilterOp::Gt, 5), [false, false, false, true]);
        assert_eq!(run_dense(&values, FilterOp::Ge, 5), [true, false, true, true]);
    }

    #[test]
    fn sparse_scan_aligns_to_index_list() {
        let values = [5i32, 2, 5, 2, 5];
        let indices = [4u32, 0, 2];
        let mut builder = BitVecBuilder::new(indices.len(), 0);
        index_search(5, &values, &indices, FilterOp::Eq, &mut builder);
        let bv = builder.build();
        assert_eq!(bv.len(), 3);
        assert_eq!(bv.count_ones(), 3);
    }

    #[test]
    fn nan_probe_matches_nothing_except_ne() {
        let values = [1.0f64, 2.0, f64::NAN];
        let nan = f64::NAN;

        let mut builder = BitVecBuilder::new(values.len(), 0);
        linear_search(nan, &values, FilterOp::Eq, &mut builder);
        assert_eq!(builder.build(), BitVec::with_len(3, false));

        let mut builder = BitVecBuilder::new(values.len(), 0);
        linear_search(nan, &values, FilterOp::Ne, &mut builder);
        assert_eq!(builder.build(), BitVec::with_len(3, true));
    }

    #[test]
    #[should_panic(expected = "not a scannable operation")]
    fn null_check_must_not_reach_the_scanner() {
        let mut builder = BitVecBuilder::new(1, 0);
        linear_search(0i64, &[1i64], FilterOp::IsNull, &mut builder);
    }
}
