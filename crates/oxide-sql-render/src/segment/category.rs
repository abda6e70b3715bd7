//! Category tags of segments.

use std::fmt;

/// The category of a [`Segment`](super::Segment).
///
/// Each category maps to exactly one part renderer. `Extension` categories
/// are defined by callers and must be registered on the render context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category<'a> {
    Literal,
    Column,
    Asterisk,
    BindMarker,
    Table,
    Limit,
    Tuple,
    List,
    Function,
    Alias,
    Comparison,
    Junction,
    Not,
    Nested,
    IsNull,
    In,
    Between,
    Subselect,
    Select,
    From,
    Where,
    OrderBy,
    OrderByField,
    Extension(&'a str),
}

impl Category<'_> {
    /// Returns the category name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &str {
        match self {
            Self::Literal => "literal",
            Self::Column => "column",
            Self::Asterisk => "asterisk",
            Self::BindMarker => "bind_marker",
            Self::Table => "table",
            Self::Limit => "limit",
            Self::Tuple => "tuple",
            Self::List => "list",
            Self::Function => "function",
            Self::Alias => "alias",
            Self::Comparison => "comparison",
            Self::Junction => "junction",
            Self::Not => "not",
            Self::Nested => "nested",
            Self::IsNull => "is_null",
            Self::In => "in",
            Self::Between => "between",
            Self::Subselect => "subselect",
            Self::Select => "select",
            Self::From => "from",
            Self::Where => "where",
            Self::OrderBy => "order_by",
            Self::OrderByField => "order_by_field",
            Self::Extension(name) => name,
        }
    }
}

impl fmt::Display for Category<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_name() {
        assert_eq!(Category::Tuple.to_string(), "tuple");
        assert_eq!(Category::OrderByField.to_string(), "order_by_field");
        assert_eq!(Category::Extension("array").to_string(), "array");
    }
}
