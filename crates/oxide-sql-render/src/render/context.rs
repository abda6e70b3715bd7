//! Render configuration.
//!
//! A [`RenderContext`] is immutable once built and holds no per-pass state,
//! so one context can back any number of concurrent render passes.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::error::Result;

/// Maximum segment nesting depth accepted by default.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// How boolean literals are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanStyle {
    /// `TRUE` / `FALSE`.
    #[default]
    Keyword,
    /// `1` / `0`.
    Numeric,
}

impl BooleanStyle {
    /// Returns the literal text for `value`.
    #[must_use]
    pub const fn literal(self, value: bool) -> &'static str {
        match (self, value) {
            (Self::Keyword, true) => "TRUE",
            (Self::Keyword, false) => "FALSE",
            (Self::Numeric, true) => "1",
            (Self::Numeric, false) => "0",
        }
    }
}

/// How positional bind markers are written.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    /// `?` for every marker.
    #[default]
    Question,
    /// `prefix` followed by the 1-based position of the marker in the pass.
    Numbered {
        /// Text before the position, e.g. `$` or `@P`.
        prefix: String,
    },
}

impl Placeholder {
    /// Appends the marker at 1-based `position`.
    pub fn write(&self, out: &mut String, position: usize) {
        match self {
            Self::Question => out.push('?'),
            Self::Numbered { prefix } => {
                out.push_str(prefix);
                let _ = write!(out, "{position}");
            }
        }
    }
}

/// How LIMIT/OFFSET is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitStyle {
    /// `LIMIT n OFFSET m`.
    #[default]
    LimitOffset,
    /// `OFFSET m ROWS FETCH NEXT n ROWS ONLY`.
    OffsetFetch,
}

impl LimitStyle {
    /// Appends the clause for the given bounds.
    pub fn write(self, out: &mut String, limit: Option<u64>, offset: Option<u64>) {
        match self {
            Self::LimitOffset => {
                if let Some(limit) = limit {
                    let _ = write!(out, "LIMIT {limit}");
                }
                if let Some(offset) = offset {
                    if limit.is_some() {
                        out.push(' ');
                    }
                    let _ = write!(out, "OFFSET {offset}");
                }
            }
            Self::OffsetFetch => {
                // FETCH is only valid after OFFSET.
                let _ = write!(out, "OFFSET {} ROWS", offset.unwrap_or(0));
                if let Some(limit) = limit {
                    let _ = write!(out, " FETCH NEXT {limit} ROWS ONLY");
                }
            }
        }
    }
}

/// Wrapping and separator tokens of an extension renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Punctuation {
    /// Emitted when the renderer takes ownership of its root.
    #[serde(default)]
    pub open: String,
    /// Emitted between consecutive child results.
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Emitted when the root is left.
    #[serde(default)]
    pub close: String,
}

fn default_separator() -> String {
    String::from(", ")
}

impl Punctuation {
    /// Creates punctuation from its three tokens.
    #[must_use]
    pub fn new(
        open: impl Into<String>,
        separator: impl Into<String>,
        close: impl Into<String>,
    ) -> Self {
        Self {
            open: open.into(),
            separator: separator.into(),
            close: close.into(),
        }
    }
}

/// Read-only configuration consulted while rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderContext {
    boolean_style: BooleanStyle,
    placeholder: Placeholder,
    named_marker_prefix: String,
    limit_style: LimitStyle,
    max_depth: usize,
    extensions: BTreeMap<String, Punctuation>,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            boolean_style: BooleanStyle::default(),
            placeholder: Placeholder::default(),
            named_marker_prefix: String::from(":"),
            limit_style: LimitStyle::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            extensions: BTreeMap::new(),
        }
    }
}

impl RenderContext {
    /// Creates a context with generic defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context carrying the quirks of `dialect`.
    #[must_use]
    pub fn for_dialect<D: Dialect + ?Sized>(dialect: &D) -> Self {
        Self {
            boolean_style: dialect.boolean_style(),
            placeholder: dialect.placeholder(),
            named_marker_prefix: String::from(dialect.named_marker_prefix()),
            limit_style: dialect.limit_style(),
            ..Self::default()
        }
    }

    /// Loads a context from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidConfig`](crate::RenderError::InvalidConfig)
    /// if the document does not describe a context.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub const fn with_boolean_style(mut self, style: BooleanStyle) -> Self {
        self.boolean_style = style;
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholder = placeholder;
        self
    }

    #[must_use]
    pub fn with_named_marker_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.named_marker_prefix = prefix.into();
        self
    }

    #[must_use]
    pub const fn with_limit_style(mut self, style: LimitStyle) -> Self {
        self.limit_style = style;
        self
    }

    /// Sets the maximum segment nesting depth.
    #[must_use]
    pub const fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Registers the renderer for an extension category.
    #[must_use]
    pub fn register_extension(
        mut self,
        category: impl Into<String>,
        punctuation: Punctuation,
    ) -> Self {
        self.extensions.insert(category.into(), punctuation);
        self
    }

    #[must_use]
    pub const fn boolean_style(&self) -> BooleanStyle {
        self.boolean_style
    }

    #[must_use]
    pub const fn placeholder(&self) -> &Placeholder {
        &self.placeholder
    }

    #[must_use]
    pub fn named_marker_prefix(&self) -> &str {
        &self.named_marker_prefix
    }

    #[must_use]
    pub const fn limit_style(&self) -> LimitStyle {
        self.limit_style
    }

    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the registered punctuation for an extension category.
    #[must_use]
    pub fn extension(&self, category: &str) -> Option<&Punctuation> {
        self.extensions.get(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    fn limit_text(style: LimitStyle, limit: Option<u64>, offset: Option<u64>) -> String {
        let mut out = String::new();
        style.write(&mut out, limit, offset);
        out
    }

    #[test]
    fn test_default_context() {
        let context = RenderContext::new();
        assert_eq!(context.boolean_style(), BooleanStyle::Keyword);
        assert_eq!(context.placeholder(), &Placeholder::Question);
        assert_eq!(context.named_marker_prefix(), ":");
        assert_eq!(context.limit_style(), LimitStyle::LimitOffset);
        assert_eq!(context.max_depth(), DEFAULT_MAX_DEPTH);
        assert!(context.extension("array").is_none());
    }

    #[test]
    fn test_placeholder_numbering() {
        let mut out = String::new();
        Placeholder::Numbered {
            prefix: String::from("$"),
        }
        .write(&mut out, 3);
        Placeholder::Question.write(&mut out, 4);
        assert_eq!(out, "$3?");
    }

    #[test]
    fn test_limit_offset_style() {
        assert_eq!(
            limit_text(LimitStyle::LimitOffset, Some(10), Some(20)),
            "LIMIT 10 OFFSET 20"
        );
        assert_eq!(limit_text(LimitStyle::LimitOffset, Some(10), None), "LIMIT 10");
        assert_eq!(limit_text(LimitStyle::LimitOffset, None, Some(5)), "OFFSET 5");
    }

    #[test]
    fn test_offset_fetch_style() {
        assert_eq!(
            limit_text(LimitStyle::OffsetFetch, Some(10), Some(20)),
            "OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY"
        );
        assert_eq!(
            limit_text(LimitStyle::OffsetFetch, Some(10), None),
            "OFFSET 0 ROWS FETCH NEXT 10 ROWS ONLY"
        );
        assert_eq!(limit_text(LimitStyle::OffsetFetch, None, Some(5)), "OFFSET 5 ROWS");
    }

    #[test]
    fn test_from_json_partial_document() {
        let context = RenderContext::from_json(
            r#"{
                "boolean_style": "numeric",
                "placeholder": { "numbered": { "prefix": "$" } },
                "extensions": { "array": { "open": "ARRAY[", "close": "]" } }
            }"#,
        )
        .unwrap();

        assert_eq!(context.boolean_style(), BooleanStyle::Numeric);
        assert_eq!(
            context.placeholder(),
            &Placeholder::Numbered {
                prefix: String::from("$")
            }
        );
        assert_eq!(context.named_marker_prefix(), ":");
        assert_eq!(context.max_depth(), DEFAULT_MAX_DEPTH);
        assert_eq!(
            context.extension("array"),
            Some(&Punctuation::new("ARRAY[", ", ", "]"))
        );
    }

    #[test]
    fn test_from_json_rejects_unknown_style() {
        let err = RenderContext::from_json(r#"{ "limit_style": "top" }"#).unwrap_err();
        assert!(matches!(err, RenderError::InvalidConfig(_)));
    }

    #[test]
    fn test_json_round_trip_keeps_extensions() {
        let context = RenderContext::new()
            .with_limit_style(LimitStyle::OffsetFetch)
            .register_extension("array", Punctuation::new("ARRAY[", ", ", "]"));
        let json = serde_json::to_string(&context).unwrap();
        assert_eq!(RenderContext::from_json(&json).unwrap(), context);
    }
}
