//! Rendering segment trees to SQL text.
//!
//! A render pass hands the root segment to the renderer for its category.
//! Composite renderers write their opening token, delegate every child to
//! the renderer for the child's category, merge each delegate's text with
//! their own separator, and write their closing token when their root is
//! left. The pass result is the text of the outermost renderer.

mod context;
mod engine;
mod part;

pub use context::{
    BooleanStyle, DEFAULT_MAX_DEPTH, LimitStyle, Placeholder, Punctuation, RenderContext,
};

use crate::error::Result;
use crate::segment::Segment;

use engine::Engine;

/// Counters collected during one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Frames pushed onto the delegation stack, the root frame included.
    pub pushes: usize,
    /// Frames popped from the delegation stack.
    pub pops: usize,
    /// Deepest delegation stack observed.
    pub max_nesting: usize,
    /// Segments visited.
    pub segments: usize,
}

/// The result of a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The rendered SQL.
    pub sql: String,
    /// Pass counters.
    pub stats: PassStats,
}

/// Renders segment trees with a fixed context.
///
/// A renderer holds no mutable state: every call runs an independent pass,
/// and one renderer can be shared between threads.
#[derive(Debug, Clone, Copy)]
pub struct SqlRenderer<'c> {
    context: &'c RenderContext,
}

impl<'c> SqlRenderer<'c> {
    /// Creates a renderer over `context`.
    #[must_use]
    pub const fn new(context: &'c RenderContext) -> Self {
        Self { context }
    }

    /// Returns the context used by this renderer.
    #[must_use]
    pub const fn context(&self) -> &'c RenderContext {
        self.context
    }

    /// Renders `segment` to SQL.
    ///
    /// # Errors
    ///
    /// Fails without returning any text when a segment category has no
    /// renderer, when nesting exceeds the context's maximum depth, or when
    /// the delegation protocol is violated.
    pub fn render(&self, segment: &Segment) -> Result<String> {
        self.render_with_stats(segment).map(|rendered| rendered.sql)
    }

    /// Renders `segment` and reports the pass counters.
    ///
    /// # Errors
    ///
    /// Same as [`SqlRenderer::render`].
    pub fn render_with_stats(&self, segment: &Segment) -> Result<Rendered> {
        Engine::new(self.context).run(segment)
    }
}
