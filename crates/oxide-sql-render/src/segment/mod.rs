//! Segment trees: the immutable input of a render pass.
//!
//! A [`Segment`] exposes its [`Category`] and its ordered children; the
//! renderer never mutates it.

mod category;
mod expression;
mod operators;
mod statement;

pub use category::Category;
pub use expression::Segment;
pub use operators::{BindMarker, ComparisonOp, Direction, JunctionOp, NullHandling};
pub use statement::Select;
