//! PostgreSQL dialect.

use super::Dialect;
use crate::render::Placeholder;

/// PostgreSQL: numbered `$n` parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn placeholder(&self) -> Placeholder {
        Placeholder::Numbered {
            prefix: String::from("$"),
        }
    }
}
