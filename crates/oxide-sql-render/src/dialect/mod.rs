//! SQL dialect support.
//!
//! Different databases spell booleans, parameters and row limits
//! differently. A [`Dialect`] describes those quirks; a render pass consumes
//! them through the [`RenderContext`] built from it.

mod generic;
mod postgres;
mod sqlserver;

pub use generic::GenericDialect;
pub use postgres::PostgresDialect;
pub use sqlserver::SqlServerDialect;

use crate::render::{BooleanStyle, LimitStyle, Placeholder, RenderContext};

/// Trait for SQL dialect-specific rendering behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns how boolean literals are written.
    fn boolean_style(&self) -> BooleanStyle {
        BooleanStyle::Keyword
    }

    /// Returns how positional bind markers are written.
    fn placeholder(&self) -> Placeholder {
        Placeholder::Question
    }

    /// Returns the prefix of named bind markers.
    fn named_marker_prefix(&self) -> &'static str {
        ":"
    }

    /// Returns how LIMIT/OFFSET is written.
    fn limit_style(&self) -> LimitStyle {
        LimitStyle::LimitOffset
    }

    /// Builds the render context for this dialect.
    fn render_context(&self) -> RenderContext {
        RenderContext::for_dialect(self)
    }
}
