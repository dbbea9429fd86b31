//! Shared vocabulary types for the spandb storage layer.
//!
//! Everything a column storage implementation and its callers need to talk
//! to each other lives here: the dynamically-typed [`ScalarValue`] that
//! queries carry, the closed [`FilterOp`] operator set, the [`ColumnType`]
//! element-type tag, the half-open [`RowRange`] row interval, and the
//! [`BitVec`] bit-per-row result container.
//!
//! This crate holds no query logic and performs no I/O.

pub mod bit_vec;
pub mod ops;
pub mod range;
pub mod value;

pub use bit_vec::{BitVec, BitVecBuilder};
pub use ops::{ColumnType, FilterOp};
pub use range::RowRange;
pub use value::{ScalarKind, ScalarValue};
