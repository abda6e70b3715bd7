//! Operators and modifiers carried by condition and ordering segments.

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
    NotLike,
}

impl ComparisonOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
        }
    }
}

/// Operators joining a sequence of conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JunctionOp {
    And,
    Or,
}

impl JunctionOp {
    /// Returns the separator placed between two joined conditions.
    #[must_use]
    pub const fn separator(&self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

/// Sort direction of an ORDER BY field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Placement of NULLs in an ORDER BY field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullHandling {
    First,
    Last,
}

impl NullHandling {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// A bind marker standing in for a statement parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindMarker {
    /// A named marker, rendered with the context's named-marker prefix.
    Named(String),
    /// A positional marker, rendered with the context's placeholder style.
    Anonymous,
}
