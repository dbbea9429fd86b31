//! Error types shared across the spandb storage crates.
//!
//! Structured variants for the recoverable failure modes of the storage
//! layer. Planner bugs (a NULL scalar reaching a comparison scan, a filter
//! operator that cannot legally touch a numeric column) are not represented
//! here: those panic at the offending call site, because they indicate
//! upstream misuse rather than a condition a caller can handle.

use thiserror::Error;

/// Primary error type for spandb storage operations.
#[derive(Error, Debug)]
pub enum SpanError {
    /// A reserved operation that has no implementation yet.
    #[error("operation not implemented: {what}")]
    NotImplemented {
        /// Name of the reserved operation.
        what: &'static str,
    },

    /// A serialized column payload carried an element-type tag this build
    /// does not know.
    #[error("unknown column type tag: {tag}")]
    UnknownColumnType { tag: u32 },

    /// A serialized column payload failed structural validation.
    #[error("malformed column payload: {detail}")]
    MalformedPayload { detail: String },
}

/// Convenience result type used across spandb crates.
pub type Result<T> = std::result::Result<T, SpanError>;

#[cfg(test)]
mod tests {
    use super::SpanError;

    #[test]
    fn messages_name_the_failure() {
        let e = SpanError::NotImplemented { what: "sort" };
        assert_eq!(e.to_string(), "operation not implemented: sort");

        let e = SpanError::UnknownColumnType { tag: 9 };
        assert_eq!(e.to_string(), "unknown column type tag: 9");

        let e = SpanError::MalformedPayload {
            detail: "value buffer length 7 is not a multiple of 4".to_owned(),
        };
        assert!(e.to_string().contains("length 7"));
    }
}
