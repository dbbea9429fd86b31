//! Search-constraint validation.
//!
//! Decides, without touching column data, whether a `(value, op)` pair can
//! be answered trivially. The checks run in a fixed order: NULL handling,
//! operator class, scalar storage class, and finally the integral range
//! check. The function is pure and allocation-free.

use spandb_types::{ColumnType, FilterOp, ScalarKind, ScalarValue};

/// Outcome of validating a search constraint against a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchValidationResult {
    /// The constraint must be answered by scanning the column.
    Ok,
    /// Every row in the search range satisfies the constraint.
    AllData,
    /// No row can satisfy the constraint.
    NoData,
}

/// Where an integer probe falls relative to the column type's value range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Extreme {
    InRange,
    TooBig,
    TooSmall,
}

/// Classify `(value, op)` against a column of type `column_type`.
///
/// # Panics
///
/// Panics on queries the planner must never emit against a numeric column:
/// a NULL probe with an operator other than `IS NULL` / `IS NOT NULL`, a
/// null-check operator with a non-NULL probe, and a float probe against an
/// integral column (cross-type comparison is resolved upstream).
#[must_use]
pub fn validate_search_constraints(
    column_type: ColumnType,
    value: &ScalarValue,
    op: FilterOp,
) -> SearchValidationResult {
    // NULL checks. The column itself holds no nulls.
    if value.is_null() {
        return match op {
            FilterOp::IsNotNull => SearchValidationResult::AllData,
            FilterOp::IsNull => SearchValidationResult::NoData,
            _ => panic!("NULL probe is only valid with IS NULL / IS NOT NULL, got {op}"),
        };
    }

    // Operator checks. Exhaustive match so a new FilterOp variant fails to
    // compile until classified here.
    match op {
        FilterOp::Eq
        | FilterOp::Ne
        | FilterOp::Lt
        | FilterOp::Le
        | FilterOp::Gt
        | FilterOp::Ge => {}
        FilterOp::IsNull | FilterOp::IsNotNull => {
            panic!("{op} with a non-NULL probe on a numeric column")
        }
        FilterOp::Glob | FilterOp::Regex => return SearchValidationResult::NoData,
    }

    // Storage-class checks.
    match value.kind() {
        ScalarKind::Integer | ScalarKind::Float => {}
        ScalarKind::Text => {
            // Any numeric value sorts before any string.
            if matches!(op, FilterOp::Lt | FilterOp::Le) {
                return SearchValidationResult::AllData;
            }
            return SearchValidationResult::NoData;
        }
        ScalarKind::Blob => return SearchValidationResult::NoData,
        ScalarKind::Null => unreachable!("NULL handled above"),
    }

    // Cross-type comparison of a float probe with an integral column is
    // rejected upstream; reaching this point with one is a planner bug.
    if column_type.is_integral() {
        assert!(
            value.kind() != ScalarKind::Float,
            "float probe against {column_type} column must be resolved upstream"
        );
    }

    // Integral bounds of the probe.
    let extreme = match (column_type, value.as_integer()) {
        // Any value makes a sensible comparison with a double, and an
        // integer probe always fits int64.
        (ColumnType::Double | ColumnType::Int64, _) => Extreme::InRange,
        (ColumnType::Int32, Some(i)) => {
            if i > i64::from(i32::MAX) {
                Extreme::TooBig
            } else if i < i64::from(i32::MIN) {
                Extreme::TooSmall
            } else {
                Extreme::InRange
            }
        }
        (ColumnType::Uint32, Some(i)) => {
            if i > i64::from(u32::MAX) {
                Extreme::TooBig
            } else if i < 0 {
                Extreme::TooSmall
            } else {
                Extreme::InRange
            }
        }
        (ColumnType::Int32 | ColumnType::Uint32, None) => {
            unreachable!("non-integer probes for integral columns rejected above")
        }
    };

    match extreme {
        Extreme::InRange => SearchValidationResult::Ok,
        Extreme::TooBig => {
            if matches!(op, FilterOp::Lt | FilterOp::Le | FilterOp::Ne) {
                SearchValidationResult::AllData
            } else {
                SearchValidationResult::NoData
            }
        }
        Extreme::TooSmall => {
            if matches!(op, FilterOp::Gt | FilterOp::Ge | FilterOp::Ne) {
                SearchValidationResult::AllData
            } else {
                SearchValidationResult::NoData
            }
        }
    }
}
