//! Concrete end-to-end search scenarios over small hand-checked columns.

use spandb_storage::{ColumnStorage, NumericStorage, RangeOrBitVec};
use spandb_types::{BitVec, FilterOp, RowRange, ScalarValue};

fn bits_of(bv: &BitVec) -> String {
    (0..bv.len()).map(|i| if bv.get(i) { '1' } else { '0' }).collect()
}

fn expect_range(result: RangeOrBitVec) -> RowRange {
    match result {
        RangeOrBitVec::Range(r) => r,
        RangeOrBitVec::BitVec(bv) => panic!("expected range, got bitmap {}", bits_of(&bv)),
    }
}

fn expect_bits(result: RangeOrBitVec) -> BitVec {
    match result {
        RangeOrBitVec::BitVec(bv) => bv,
        RangeOrBitVec::Range(r) => panic!("expected bitmap, got range {r}"),
    }
}

#[test]
fn sorted_int64_eq_is_the_equal_run() {
    let storage = NumericStorage::from_i64s(vec![1, 3, 3, 3, 7], true);
    let r = expect_range(storage.search(
        FilterOp::Eq,
        &ScalarValue::Integer(3),
        RowRange::new(0, 5),
    ));
    assert_eq!(r, RowRange::new(1, 4));
}

#[test]
fn sorted_int64_ne_is_the_complement_bitmap() {
    let storage = NumericStorage::from_i64s(vec![1, 3, 3, 3, 7], true);
    let bv = expect_bits(storage.search(
        FilterOp::Ne,
        &ScalarValue::Integer(3),
        RowRange::new(0, 5),
    ));
    assert_eq!(bits_of(&bv), "10001");
}

#[test]
fn sorted_int64_ordered_operators() {
    let storage = NumericStorage::from_i64s(vec![1, 3, 3, 3, 7], true);
    let range = RowRange::new(0, 5);
    let probe = ScalarValue::Integer(3);

    assert_eq!(
        expect_range(storage.search(FilterOp::Lt, &probe, range)),
        RowRange::new(0, 1)
    );
    assert_eq!(
        expect_range(storage.search(FilterOp::Le, &probe, range)),
        RowRange::new(0, 4)
    );
    assert_eq!(
        expect_range(storage.search(FilterOp::Gt, &probe, range)),
        RowRange::new(4, 5)
    );
    assert_eq!(
        expect_range(storage.search(FilterOp::Ge, &probe, range)),
        RowRange::new(1, 5)
    );
}

#[test]
fn uint32_underflow_probe_short_circuits() {
    let storage = NumericStorage::from_u32s(vec![10, 20, 30, 40], true);
    let range = RowRange::new(1, 4);
    let probe = ScalarValue::Integer(-1);

    // Nothing is below zero, so `< -1` matches no row; the empty result
    // keeps the range position.
    assert_eq!(
        expect_range(storage.search(FilterOp::Lt, &probe, range)),
        RowRange::empty_at(1)
    );
    // Everything is `>= -1`.
    assert_eq!(
        expect_range(storage.search(FilterOp::Ge, &probe, range)),
        range
    );
}

#[test]
fn int32_overflow_probe_with_ne_matches_everything() {
    let storage = NumericStorage::from_i32s(vec![7, -3, 0], false);
    let range = RowRange::new(0, 3);
    let probe = ScalarValue::Integer(1i64 << 40);
    assert_eq!(
        expect_range(storage.search(FilterOp::Ne, &probe, range)),
        range
    );
}

#[test]
fn unsorted_int32_eq_scans_to_a_bitmap() {
    let storage = NumericStorage::from_i32s(vec![5, 2, 5, 2, 5], false);
    let bv = expect_bits(storage.search(
        FilterOp::Eq,
        &ScalarValue::Integer(5),
        RowRange::new(0, 5),
    ));
    assert_eq!(bits_of(&bv), "10101");
}

#[test]
fn unsorted_index_search_aligns_to_the_index_list() {
    let storage = NumericStorage::from_i32s(vec![5, 2, 5, 2, 5], false);
    let bv = expect_bits(storage.index_search(
        FilterOp::Eq,
        &ScalarValue::Integer(5),
        &[4, 0, 2],
        false,
    ));
    assert_eq!(bits_of(&bv), "111");
}

#[test]
fn sorted_index_search_answers_in_index_list_space() {
    let storage = NumericStorage::from_i64s(vec![2, 2, 5, 5, 5], false);
    let indices = [0u32, 1, 2, 3, 4];
    let r = expect_range(storage.index_search(
        FilterOp::Gt,
        &ScalarValue::Integer(2),
        &indices,
        true,
    ));
    assert_eq!(r, RowRange::new(2, 5));
}

#[test]
fn sorted_index_search_over_a_permutation() {
    // Column unsorted in row space; the index list visits it in value order.
    let storage = NumericStorage::from_i32s(vec![5, 2, 5, 2, 5], false);
    let indices = [1u32, 3, 0, 2, 4];
    let r = expect_range(storage.index_search(
        FilterOp::Eq,
        &ScalarValue::Integer(5),
        &indices,
        true,
    ));
    assert_eq!(r, RowRange::new(2, 5));

    let bv = expect_bits(storage.index_search(
        FilterOp::Ne,
        &ScalarValue::Integer(5),
        &indices,
        true,
    ));
    assert_eq!(bits_of(&bv), "11000");
}

#[test]
fn search_inside_a_subrange_only_reports_that_subrange() {
    let storage = NumericStorage::from_i64s(vec![1, 3, 3, 3, 7], true);
    let r = expect_range(storage.search(
        FilterOp::Eq,
        &ScalarValue::Integer(3),
        RowRange::new(2, 4),
    ));
    assert_eq!(r, RowRange::new(2, 4));

    let r = expect_range(storage.search(
        FilterOp::Eq,
        &ScalarValue::Integer(7),
        RowRange::new(0, 4),
    ));
    assert!(r.is_empty());
}

#[test]
fn text_probe_short_circuits_on_order() {
    let storage = NumericStorage::from_i64s(vec![1, 2, 3], true);
    let range = RowRange::new(0, 3);
    let probe = ScalarValue::from("zzz");

    assert_eq!(
        expect_range(storage.search(FilterOp::Lt, &probe, range)),
        range
    );
    assert_eq!(
        expect_range(storage.search(FilterOp::Eq, &probe, range)),
        RowRange::empty_at(0)
    );
}

#[test]
fn null_probe_resolves_without_scanning() {
    let storage = NumericStorage::from_f64s(vec![0.5, 1.5], false);
    let range = RowRange::new(0, 2);

    assert_eq!(
        expect_range(storage.search(FilterOp::IsNotNull, &ScalarValue::Null, range)),
        range
    );
    assert_eq!(
        expect_range(storage.search(FilterOp::IsNull, &ScalarValue::Null, range)),
        RowRange::empty_at(0)
    );
}

#[test]
fn trait_object_dispatch_matches_inherent_calls() {
    let storage = NumericStorage::from_i64s(vec![1, 3, 3, 3, 7], true);
    let dyn_storage: &dyn ColumnStorage = &storage;
    let range = RowRange::new(0, 5);
    let probe = ScalarValue::Integer(3);

    assert_eq!(
        dyn_storage.search(FilterOp::Eq, &probe, range),
        storage.search(FilterOp::Eq, &probe, range)
    );
    assert_eq!(dyn_storage.len(), 5);
}
