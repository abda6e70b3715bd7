//! Part renderers and the frames that own them.
//!
//! A [`PartRenderer`] is the punctuation policy of one segment category: the
//! tokens it writes around its root and between the results of the children
//! it delegates. A [`Frame`] pairs a renderer with the state it accumulates
//! while it owns a subtree: the root identity, the text buffer and the
//! number of child results merged so far. Frames only ever live on the
//! engine's delegation stack.

use std::ptr;

use crate::error::{RenderError, Result};
use crate::segment::{BindMarker, ComparisonOp, Direction, JunctionOp, NullHandling, Segment};

use super::context::{Punctuation, RenderContext};

/// The renderer for one segment category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartRenderer<'a> {
    /// Innermost renderer for leaf segments. Never delegates.
    Expression,
    RowConstructor,
    List,
    Function { name: &'a str },
    Alias { alias: &'a str },
    Comparison { op: ComparisonOp },
    Junction { op: JunctionOp },
    Not,
    Nested,
    IsNull { negated: bool },
    In { negated: bool },
    Between { negated: bool },
    Subselect,
    Select { distinct: bool },
    From,
    Where,
    OrderBy,
    OrderByField {
        direction: Option<Direction>,
        nulls: Option<NullHandling>,
    },
    Extension(&'a Punctuation),
}

impl<'a> PartRenderer<'a> {
    /// Selects the renderer responsible for `segment`.
    pub fn for_segment(segment: &'a Segment, context: &'a RenderContext) -> Result<Self> {
        let renderer = match segment {
            Segment::Literal(_)
            | Segment::Column { .. }
            | Segment::Asterisk { .. }
            | Segment::BindMarker(_)
            | Segment::Table { .. }
            | Segment::Limit { .. } => Self::Expression,
            Segment::Tuple(_) => Self::RowConstructor,
            Segment::List(_) => Self::List,
            Segment::Function { name, .. } => Self::Function {
                name: name.as_str(),
            },
            Segment::Alias { alias, .. } => Self::Alias {
                alias: alias.as_str(),
            },
            Segment::Comparison { op, .. } => Self::Comparison { op: *op },
            Segment::Junction { op, .. } => Self::Junction { op: *op },
            Segment::Not(_) => Self::Not,
            Segment::Nested(_) => Self::Nested,
            Segment::IsNull { negated, .. } => Self::IsNull { negated: *negated },
            Segment::In { negated, .. } => Self::In { negated: *negated },
            Segment::Between { negated, .. } => Self::Between { negated: *negated },
            Segment::Subselect(_) => Self::Subselect,
            Segment::Select(select) => Self::Select {
                distinct: select.is_distinct(),
            },
            Segment::From(_) => Self::From,
            Segment::Where(_) => Self::Where,
            Segment::OrderBy(_) => Self::OrderBy,
            Segment::OrderByField {
                direction, nulls, ..
            } => Self::OrderByField {
                direction: *direction,
                nulls: *nulls,
            },
            Segment::Extension { category, .. } => {
                let punctuation =
                    context
                        .extension(category)
                        .ok_or_else(|| RenderError::UnknownCategory {
                            category: category.clone(),
                        })?;
                Self::Extension(punctuation)
            }
        };
        Ok(renderer)
    }

    fn write_open(self, out: &mut String) {
        match self {
            Self::RowConstructor | Self::Nested | Self::Subselect => out.push('('),
            Self::Function { name } => {
                out.push_str(name);
                out.push('(');
            }
            Self::Not => out.push_str("NOT "),
            Self::Select { distinct: false } => out.push_str("SELECT "),
            Self::Select { distinct: true } => out.push_str("SELECT DISTINCT "),
            Self::From => out.push_str("FROM "),
            Self::Where => out.push_str("WHERE "),
            Self::OrderBy => out.push_str("ORDER BY "),
            Self::Extension(punctuation) => out.push_str(&punctuation.open),
            Self::Expression
            | Self::List
            | Self::Alias { .. }
            | Self::Comparison { .. }
            | Self::Junction { .. }
            | Self::IsNull { .. }
            | Self::In { .. }
            | Self::Between { .. }
            | Self::OrderByField { .. } => {}
        }
    }

    /// Writes the separator placed before the child result at `position`.
    ///
    /// Positions start at 1; nothing precedes the first result.
    fn write_separator(self, position: usize, out: &mut String) {
        match self {
            Self::RowConstructor | Self::List | Self::Function { .. } | Self::From | Self::OrderBy => {
                out.push_str(", ");
            }
            Self::Comparison { op } => {
                out.push(' ');
                out.push_str(op.as_str());
                out.push(' ');
            }
            Self::Junction { op } => out.push_str(op.separator()),
            Self::In { negated: false } => out.push_str(" IN "),
            Self::In { negated: true } => out.push_str(" NOT IN "),
            Self::Between { negated } => match (position, negated) {
                (1, false) => out.push_str(" BETWEEN "),
                (1, true) => out.push_str(" NOT BETWEEN "),
                _ => out.push_str(" AND "),
            },
            Self::Select { .. } => out.push(' '),
            Self::Extension(punctuation) => out.push_str(&punctuation.separator),
            Self::Expression
            | Self::Alias { .. }
            | Self::Not
            | Self::Nested
            | Self::IsNull { .. }
            | Self::Subselect
            | Self::Where
            | Self::OrderByField { .. } => {}
        }
    }

    fn write_close(self, out: &mut String) {
        match self {
            Self::RowConstructor | Self::Function { .. } | Self::Nested | Self::Subselect => {
                out.push(')');
            }
            Self::Alias { alias } => {
                out.push_str(" AS ");
                out.push_str(alias);
            }
            Self::IsNull { negated: false } => out.push_str(" IS NULL"),
            Self::IsNull { negated: true } => out.push_str(" IS NOT NULL"),
            Self::OrderByField { direction, nulls } => {
                if let Some(direction) = direction {
                    out.push(' ');
                    out.push_str(direction.as_str());
                }
                if let Some(nulls) = nulls {
                    out.push(' ');
                    out.push_str(nulls.as_str());
                }
            }
            Self::Extension(punctuation) => out.push_str(&punctuation.close),
            Self::Expression
            | Self::List
            | Self::Comparison { .. }
            | Self::Junction { .. }
            | Self::Not
            | Self::In { .. }
            | Self::Between { .. }
            | Self::Select { .. }
            | Self::From
            | Self::Where
            | Self::OrderBy => {}
        }
    }
}

/// Per-pass state shared by all frames of one pass.
#[derive(Debug)]
pub struct Scope<'a> {
    context: &'a RenderContext,
    markers: usize,
}

impl<'a> Scope<'a> {
    pub const fn new(context: &'a RenderContext) -> Self {
        Self {
            context,
            markers: 0,
        }
    }

    pub const fn context(&self) -> &'a RenderContext {
        self.context
    }

    /// Writes the text of a leaf segment.
    fn write_leaf(&mut self, segment: &Segment, out: &mut String) -> Result<()> {
        let context = self.context;
        match segment {
            Segment::Literal(value) => value.write_inline(out, context.boolean_style())?,
            Segment::Column { table, name } => {
                if let Some(table) = table {
                    out.push_str(table);
                    out.push('.');
                }
                out.push_str(name);
            }
            Segment::Asterisk { table } => {
                if let Some(table) = table {
                    out.push_str(table);
                    out.push('.');
                }
                out.push('*');
            }
            Segment::BindMarker(BindMarker::Named(name)) => {
                out.push_str(context.named_marker_prefix());
                out.push_str(name);
            }
            Segment::BindMarker(BindMarker::Anonymous) => {
                self.markers += 1;
                context.placeholder().write(out, self.markers);
            }
            Segment::Table { name, alias } => {
                out.push_str(name);
                if let Some(alias) = alias {
                    out.push_str(" AS ");
                    out.push_str(alias);
                }
            }
            Segment::Limit { limit, offset } => context.limit_style().write(out, *limit, *offset),
            other => {
                return Err(RenderError::malformed(
                    other.category(),
                    "expression renderer only renders leaf segments",
                ))
            }
        }
        Ok(())
    }
}

/// Outcome of [`Frame::on_enter`].
#[derive(Debug, PartialEq)]
pub enum Delegation<'a> {
    /// The frame keeps ownership of the segment.
    Retain,
    /// The segment's subtree belongs to a fresh frame for this renderer.
    DelegateTo(PartRenderer<'a>),
}

/// Outcome of [`Frame::on_leave`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leave {
    /// The frame's root was left; its text is complete.
    Close,
    /// The frame keeps ownership for the rest of its subtree.
    Retain,
}

/// A delegation record: a renderer, the root it owns and its buffer.
#[derive(Debug)]
pub struct Frame<'a> {
    renderer: PartRenderer<'a>,
    root: Option<&'a Segment>,
    /// Segments this frame retained and has not left yet, root first.
    retained: Vec<&'a Segment>,
    text: String,
    parts: usize,
    closed: bool,
}

impl<'a> Frame<'a> {
    pub const fn new(renderer: PartRenderer<'a>) -> Self {
        Self {
            renderer,
            root: None,
            retained: Vec::new(),
            text: String::new(),
            parts: 0,
            closed: false,
        }
    }

    pub const fn renderer(&self) -> PartRenderer<'a> {
        self.renderer
    }

    pub const fn root(&self) -> Option<&'a Segment> {
        self.root
    }

    /// Handles entry into `segment`.
    ///
    /// The first segment a frame sees becomes its root. Composite renderers
    /// delegate every later segment, which are the direct children of the
    /// root. The expression renderer retains nested leaves and writes them
    /// in place.
    pub fn on_enter(
        &mut self,
        segment: &'a Segment,
        scope: &mut Scope<'a>,
    ) -> Result<Delegation<'a>> {
        if self.closed {
            return Err(RenderError::malformed(
                segment.category(),
                "renderer entered after its root was closed",
            ));
        }

        if self.root.is_none() {
            self.root = Some(segment);
            self.retained.push(segment);
            match self.renderer {
                PartRenderer::Expression => scope.write_leaf(segment, &mut self.text)?,
                renderer => renderer.write_open(&mut self.text),
            }
            return Ok(Delegation::Retain);
        }

        match self.renderer {
            PartRenderer::Expression => {
                scope.write_leaf(segment, &mut self.text)?;
                self.retained.push(segment);
                Ok(Delegation::Retain)
            }
            _ => Ok(Delegation::DelegateTo(PartRenderer::for_segment(
                segment,
                scope.context(),
            )?)),
        }
    }

    /// Handles exit from `segment`.
    ///
    /// Segments must be left in the reverse order this frame retained them.
    pub fn on_leave(&mut self, segment: &'a Segment) -> Result<Leave> {
        match self.retained.last() {
            Some(last) if ptr::eq(*last, segment) => {}
            _ => {
                return Err(RenderError::malformed(
                    segment.category(),
                    "leave without a matching enter on the active renderer",
                ))
            }
        }
        self.retained.pop();

        if !self.retained.is_empty() {
            return Ok(Leave::Retain);
        }
        self.renderer.write_close(&mut self.text);
        self.closed = true;
        Ok(Leave::Close)
    }

    /// Appends a closed delegate's text as the next child result.
    pub fn absorb(&mut self, part: &str) -> Result<()> {
        if self.closed {
            return Err(RenderError::MalformedDelegation {
                category: String::from("closed renderer"),
                reason: "child result merged after the root was closed",
            });
        }
        if self.parts > 0 {
            self.renderer.write_separator(self.parts, &mut self.text);
        }
        self.text.push_str(part);
        self.parts += 1;
        Ok(())
    }

    /// Returns the rendered text once the root has been closed.
    #[cfg(test)]
    pub fn rendered_text(&self) -> Option<&str> {
        self.closed.then_some(self.text.as_str())
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
