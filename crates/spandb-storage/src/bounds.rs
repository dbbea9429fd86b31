//! Binary-search bound computation over sorted data.
//!
//! Two primitives, each in two index spaces:
//!
//! - `lower_*`: smallest position whose value is `>= probe`.
//! - `upper_*`: smallest position whose value is `> probe`.
//!
//! The dense variants address rows of the column directly; the `_by_index`
//! variants binary-search an external index list whose *values at those
//! indices* are non-decreasing, and answer in index-list space. All are
//! O(log n) comparisons via `slice::partition_point`.

use spandb_types::{FilterOp, RowRange};

pub(crate) fn lower_bound<T>(values: &[T], probe: T, range: RowRange) -> u32
where
    T: Copy + PartialOrd,
{
    let slice = &values[range.start as usize..range.end as usize];
    range.start + slice.partition_point(|&v| v < probe) as u32
}

pub(crate) fn upper_bound<T>(values: &[T], probe: T, range: RowRange) -> u32
where
    T: Copy + PartialOrd,
{
    let slice = &values[range.start as usize..range.end as usize];
    range.start + slice.partition_point(|&v| v <= probe) as u32
}

pub(crate) fn lower_bound_by_index<T>(values: &[T], indices: &[u32], probe: T) -> u32
where
    T: Copy + PartialOrd,
{
    indices.partition_point(|&idx| values[idx as usize] < probe) as u32
}

pub(crate) fn upper_bound_by_index<T>(values: &[T], indices: &[u32], probe: T) -> u32
where
    T: Copy + PartialOrd,
{
    indices.partition_point(|&idx| values[idx as usize] <= probe) as u32
}

/// Compose the matching row range for `op` inside `range` on sorted data.
///
/// `Ne` does not describe a contiguous range; the dispatcher computes it as
/// the complement of `Eq` and never calls this with it.
pub(crate) fn search_range<T>(op: FilterOp, probe: T, values: &[T], range: RowRange) -> RowRange
where
    T: Copy + PartialOrd,
{
    match op {
        FilterOp::Eq => RowRange::new(
            lower_bound(values, probe, range),
            upper_bound(values, probe, range),
        ),
        FilterOp::Le => RowRange::new(range.start, upper_bound(values, probe, range)),
        FilterOp::Lt => RowRange::new(range.start, lower_bound(values, probe, range)),
        FilterOp::Ge => RowRange::new(lower_bound(values, probe, range), range.end),
        FilterOp::Gt => RowRange::new(upper_bound(values, probe, range), range.end),
        other => unreachable!("{other} resolved before bound composition"),
    }
}

/// Compose the matching range for `op` over a sorted index list, in
/// index-list space `[0, m)`.
pub(crate) fn search_index_range<T>(
    op: FilterOp,
    probe: T,
    values: &[T],
    indices: &[u32],
) -> RowRange
where
    T: Copy + PartialOrd,
{
    let m = indices.len() as u32;
    match op {
        FilterOp::Eq => RowRange::new(
            lower_bound_by_index(values, indices, probe),
            upper_bound_by_index(values, indices, probe),
        ),
        FilterOp::Le => RowRange::new(0, upper_bound_by_index(values, indices, probe)),
        FilterOp::Lt => RowRange::new(0, lower_bound_by_index(values, indices, probe)),
        FilterOp::Ge => RowRange::new(lower_bound_by_index(values, indices, probe), m),
        FilterOp::Gt => RowRange::new(upper_bound_by_index(values, indices, probe), m),
        other => unreachable!("{other} resolved before bound composition"),
    }
}
