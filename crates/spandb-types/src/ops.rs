use std::fmt;

/// A filter operator attached to a query constraint.
///
/// The set is closed: the six numeric comparisons execute scans on numeric
/// columns, while `Glob`/`Regex` and the null checks are resolved during
/// constraint validation and never reach a numeric inner loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FilterOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Glob,
    Regex,
    IsNull,
    IsNotNull,
}

impl FilterOp {
    /// Whether this operator is one of the six ordered numeric comparisons.
    #[must_use]
    pub const fn is_numeric_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Ne | Self::Lt | Self::Le | Self::Gt | Self::Ge
        )
    }

    /// The SQL spelling of the operator, for diagnostics.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Glob => "GLOB",
            Self::Regex => "REGEXP",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The element type of a numeric column, fixed at construction.
///
/// The discriminant doubles as the wire tag in the serialization payload, so
/// the values are part of the debug round-trip format and must not be
/// reordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(u32)]
pub enum ColumnType {
    Uint32 = 0,
    Int32 = 1,
    Int64 = 2,
    Double = 3,
}

impl ColumnType {
    /// The wire tag for this element type.
    #[must_use]
    pub const fn tag(self) -> u32 {
        self as u32
    }

    /// Reconstruct an element type from its wire tag.
    #[must_use]
    pub const fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(Self::Uint32),
            1 => Some(Self::Int32),
            2 => Some(Self::Int64),
            3 => Some(Self::Double),
            _ => None,
        }
    }

    /// Size of one stored element in bytes.
    #[must_use]
    pub const fn element_size(self) -> usize {
        match self {
            Self::Uint32 | Self::Int32 => 4,
            Self::Int64 | Self::Double => 8,
        }
    }

    /// Whether values of this type are integers.
    #[must_use]
    pub const fn is_integral(self) -> bool {
        matches!(self, Self::Uint32 | Self::Int32 | Self::Int64)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uint32 => "uint32",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Double => "double",
        };
        f.write_str(name)
    }
}
