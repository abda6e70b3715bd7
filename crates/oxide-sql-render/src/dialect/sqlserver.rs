//! SQL Server dialect.

use super::Dialect;
use crate::render::{BooleanStyle, LimitStyle, Placeholder};

/// SQL Server: `BIT` booleans, `@Pn` parameters and OFFSET/FETCH paging.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlServerDialect;

impl SqlServerDialect {
    /// Creates a new SQL Server dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqlServerDialect {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn boolean_style(&self) -> BooleanStyle {
        BooleanStyle::Numeric
    }

    fn placeholder(&self) -> Placeholder {
        Placeholder::Numbered {
            prefix: String::from("@P"),
        }
    }

    fn named_marker_prefix(&self) -> &'static str {
        "@"
    }

    fn limit_style(&self) -> LimitStyle {
        LimitStyle::OffsetFetch
    }
}
