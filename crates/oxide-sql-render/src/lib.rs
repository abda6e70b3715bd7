//! # oxide-sql-render
//!
//! Renders immutable trees of SQL statement segments to SQL text.
//!
//! Each segment category has its own part renderer that knows the tokens
//! around its root and the separator between its children. Renderers hand
//! child subtrees to each other through an explicit delegation stack and
//! resume with the child's text once the child's root is left. Traversal
//! never recurses on the call stack, so deep trees fail with
//! [`RenderError::DepthExceeded`] instead of overflowing.
//!
//! ## Row constructors
//!
//! ```rust
//! use oxide_sql_render::{RenderContext, Segment, SqlRenderer};
//!
//! let context = RenderContext::default();
//! let row = Segment::tuple([
//!     Segment::column("id"),
//!     Segment::tuple([Segment::literal("it's"), Segment::literal(true)]),
//! ]);
//!
//! let sql = SqlRenderer::new(&context).render(&row)?;
//! assert_eq!(sql, "(id, ('it''s', TRUE))");
//! # Ok::<(), oxide_sql_render::RenderError>(())
//! ```
//!
//! ## Statements and dialects
//!
//! ```rust
//! use oxide_sql_render::dialect::{Dialect, PostgresDialect};
//! use oxide_sql_render::{Segment, Select, SqlRenderer};
//!
//! let context = PostgresDialect::new().render_context();
//! let key = Segment::tuple([Segment::column("id"), Segment::column("name")]);
//! let select = Select::new([Segment::asterisk()])
//!     .from([Segment::table("dummy_entity")])
//!     .filter(key.is_equal_to(Segment::tuple([Segment::marker(), Segment::marker()])))
//!     .limit(1);
//!
//! let sql = SqlRenderer::new(&context).render(&select.into())?;
//! assert_eq!(
//!     sql,
//!     "SELECT * FROM dummy_entity WHERE (id, name) = ($1, $2) LIMIT 1"
//! );
//! # Ok::<(), oxide_sql_render::RenderError>(())
//! ```

pub mod dialect;
pub mod error;
pub mod render;
pub mod segment;
pub mod value;

pub use error::{RenderError, Result};
pub use render::{
    BooleanStyle, LimitStyle, PassStats, Placeholder, Punctuation, RenderContext, Rendered,
    SqlRenderer,
};
pub use segment::{Category, Segment, Select};
pub use value::{SqlValue, ToSqlValue};

/// Renders `segment` with `context`.
///
/// # Errors
///
/// See [`SqlRenderer::render`].
pub fn render(segment: &Segment, context: &RenderContext) -> Result<String> {
    SqlRenderer::new(context).render(segment)
}
