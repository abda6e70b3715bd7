//! Error types for rendering.

use crate::segment::Category;

/// Errors that abort a render pass.
///
/// A failed pass never returns partial SQL.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The delegation protocol was violated.
    #[error("Malformed delegation at {category} segment: {reason}")]
    MalformedDelegation {
        /// Category of the segment being processed.
        category: String,
        /// What went wrong.
        reason: &'static str,
    },

    /// A segment category has no registered renderer.
    #[error("No renderer registered for segment category '{category}'")]
    UnknownCategory {
        /// The unregistered category.
        category: String,
    },

    /// Segment nesting is deeper than the context allows.
    #[error("Segment nesting exceeds the maximum depth of {limit}")]
    DepthExceeded {
        /// The configured maximum depth.
        limit: usize,
    },

    /// Delegation pushes and pops did not pair up.
    #[error("Unbalanced delegation stack: {pushes} pushes, {pops} pops")]
    Unbalanced {
        /// Frames pushed during the pass.
        pushes: usize,
        /// Frames popped during the pass.
        pops: usize,
    },

    /// A float literal is NaN or infinite.
    #[error("Float literal {value} has no SQL representation")]
    NonFiniteFloat {
        /// The rejected value.
        value: f64,
    },

    /// The render context configuration could not be loaded.
    #[error("Invalid render context configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

impl RenderError {
    /// Creates a malformed delegation error for a segment of `category`.
    #[must_use]
    pub fn malformed(category: Category<'_>, reason: &'static str) -> Self {
        Self::MalformedDelegation {
            category: category.to_string(),
            reason,
        }
    }
}

/// Result type for rendering.
pub type Result<T> = std::result::Result<T, RenderError>;
