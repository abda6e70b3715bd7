//! The traversal driver.
//!
//! The engine walks a segment tree depth-first with an explicit work stack,
//! so segment depth never turns into call-stack depth. A second stack holds
//! the delegation frames: the top frame is the active renderer, the frames
//! below it are the renderers suspended by a hand-off.

use std::ptr;

use tracing::{debug, trace};

use crate::error::{RenderError, Result};
use crate::segment::Segment;

use super::context::RenderContext;
use super::part::{Delegation, Frame, Leave, PartRenderer, Scope};
use super::{PassStats, Rendered};

enum Step<'a> {
    Enter { segment: &'a Segment, depth: usize },
    Leave(&'a Segment),
}

/// Drives one render pass. Consumed by [`Engine::run`].
pub struct Engine<'a> {
    scope: Scope<'a>,
    frames: Vec<Frame<'a>>,
    stats: PassStats,
}

impl<'a> Engine<'a> {
    pub const fn new(context: &'a RenderContext) -> Self {
        Self {
            scope: Scope::new(context),
            frames: Vec::new(),
            stats: PassStats {
                pushes: 0,
                pops: 0,
                max_nesting: 0,
                segments: 0,
            },
        }
    }

    /// Renders the tree rooted at `root`.
    pub fn run(mut self, root: &'a Segment) -> Result<Rendered> {
        let renderer = PartRenderer::for_segment(root, self.scope.context())?;
        self.push(Frame::new(renderer), root);

        let max_depth = self.scope.context().max_depth();
        let mut work = vec![Step::Enter {
            segment: root,
            depth: 1,
        }];
        let mut sql = None;

        while let Some(step) = work.pop() {
            if sql.is_some() {
                return Err(RenderError::malformed(
                    root.category(),
                    "segments left to visit after the root renderer closed",
                ));
            }
            match step {
                Step::Enter { segment, depth } => {
                    if depth > max_depth {
                        return Err(RenderError::DepthExceeded { limit: max_depth });
                    }
                    self.stats.segments += 1;
                    self.enter(segment)?;
                    work.push(Step::Leave(segment));
                    work.extend(
                        segment
                            .children()
                            .into_iter()
                            .rev()
                            .map(|child| Step::Enter {
                                segment: child,
                                depth: depth + 1,
                            }),
                    );
                }
                Step::Leave(segment) => sql = self.leave(segment)?,
            }
        }

        let sql = sql.ok_or_else(|| {
            RenderError::malformed(root.category(), "pass ended before the root renderer closed")
        })?;
        if !self.frames.is_empty() || self.stats.pushes != self.stats.pops {
            return Err(RenderError::Unbalanced {
                pushes: self.stats.pushes,
                pops: self.stats.pops,
            });
        }

        debug!(
            root = %root.category(),
            segments = self.stats.segments,
            delegations = self.stats.pushes,
            max_nesting = self.stats.max_nesting,
            "render pass complete"
        );
        Ok(Rendered {
            sql,
            stats: self.stats,
        })
    }

    /// Offers `segment` to the active frame, following delegations until a
    /// frame retains it.
    fn enter(&mut self, segment: &'a Segment) -> Result<()> {
        loop {
            let frame = self.frames.last_mut().ok_or_else(|| {
                RenderError::malformed(segment.category(), "no active renderer on enter")
            })?;
            match frame.on_enter(segment, &mut self.scope)? {
                Delegation::Retain => return Ok(()),
                Delegation::DelegateTo(renderer) => self.push(Frame::new(renderer), segment),
            }
        }
    }

    /// Offers the exit of `segment` to the active frame. Returns the pass
    /// result once the outermost frame closes.
    ///
    /// A frame only retains on leave when it entered more than one segment
    /// itself, which the expression renderer does for nested leaves. Leaf
    /// segments have no children, so a tree walk never produces that.
    fn leave(&mut self, segment: &'a Segment) -> Result<Option<String>> {
        let frame = self.frames.last_mut().ok_or_else(|| {
            RenderError::malformed(segment.category(), "no active renderer on leave")
        })?;
        match frame.on_leave(segment)? {
            Leave::Retain => Ok(None),
            Leave::Close => {
                let text = self.pop(segment)?.into_text();
                match self.frames.last_mut() {
                    Some(resumed) => {
                        resumed.absorb(&text)?;
                        Ok(None)
                    }
                    None => Ok(Some(text)),
                }
            }
        }
    }

    fn push(&mut self, frame: Frame<'a>, segment: &Segment) {
        trace!(
            category = %segment.category(),
            renderer = ?frame.renderer(),
            nesting = self.frames.len() + 1,
            "delegate"
        );
        self.frames.push(frame);
        self.stats.pushes += 1;
        self.stats.max_nesting = self.stats.max_nesting.max(self.frames.len());
    }

    fn pop(&mut self, segment: &'a Segment) -> Result<Frame<'a>> {
        let frame = self.frames.pop().ok_or_else(|| {
            RenderError::malformed(segment.category(), "close with an empty delegation stack")
        })?;
        if !frame.root().is_some_and(|root| ptr::eq(root, segment)) {
            return Err(RenderError::malformed(
                segment.category(),
                "close signaled for a segment other than the renderer's root",
            ));
        }
        self.stats.pops += 1;
        trace!(
            category = %segment.category(),
            nesting = self.frames.len(),
            "resume"
        );
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(segment: &Segment) -> Result<Rendered> {
        let context = RenderContext::default();
        Engine::new(&context).run(segment)
    }

    #[test]
    fn test_single_leaf_pass() {
        let rendered = run(&Segment::column("id")).unwrap();
        assert_eq!(rendered.sql, "id");
        assert_eq!(rendered.stats.pushes, 1);
        assert_eq!(rendered.stats.pops, 1);
        assert_eq!(rendered.stats.max_nesting, 1);
        assert_eq!(rendered.stats.segments, 1);
    }

    #[test]
    fn test_every_child_is_delegated() {
        let tuple = Segment::tuple([
            Segment::literal(1),
            Segment::literal(2),
            Segment::literal(3),
        ]);
        let rendered = run(&tuple).unwrap();
        assert_eq!(rendered.sql, "(1, 2, 3)");
        assert_eq!(rendered.stats.pushes, 4);
        assert_eq!(rendered.stats.pops, 4);
        assert_eq!(rendered.stats.max_nesting, 2);
    }

    #[test]
    fn test_nesting_tracks_hand_off_depth() {
        let nested = Segment::tuple([Segment::tuple([Segment::tuple([Segment::column("a")])])]);
        let rendered = run(&nested).unwrap();
        assert_eq!(rendered.sql, "(((a)))");
        assert_eq!(rendered.stats.max_nesting, 4);
        assert_eq!(rendered.stats.segments, 4);
    }

    #[test]
    fn test_depth_limit_is_inclusive() {
        let nested = Segment::tuple([Segment::tuple([Segment::column("a")])]);
        let context = RenderContext::default().with_max_depth(3);
        assert_eq!(Engine::new(&context).run(&nested).unwrap().sql, "((a))");

        let context = RenderContext::default().with_max_depth(2);
        assert!(matches!(
            Engine::new(&context).run(&nested),
            Err(RenderError::DepthExceeded { limit: 2 })
        ));
    }

    #[test]
    fn test_pop_rejects_foreign_segment() {
        let context = RenderContext::default();
        let root = Segment::column("a");
        let other = Segment::column("a");
        let mut engine = Engine::new(&context);
        engine.push(Frame::new(PartRenderer::Expression), &root);
        engine.enter(&root).unwrap();
        assert!(matches!(
            engine.pop(&other),
            Err(RenderError::MalformedDelegation { .. })
        ));
    }

    #[test]
    fn test_retaining_frame_stays_active_until_root_leaves() {
        let context = RenderContext::default();
        let first = Segment::column("a");
        let second = Segment::literal(1);
        let mut engine = Engine::new(&context);
        engine.push(Frame::new(PartRenderer::Expression), &first);
        engine.enter(&first).unwrap();
        engine.enter(&second).unwrap();

        assert_eq!(engine.leave(&second).unwrap(), None);
        assert_eq!(engine.frames.len(), 1);
        assert_eq!(engine.stats.pops, 0);

        assert_eq!(engine.leave(&first).unwrap(), Some(String::from("a1")));
        assert!(engine.frames.is_empty());
        assert_eq!(engine.stats.pushes, engine.stats.pops);
    }

    #[test]
    fn test_leave_with_empty_stack_is_malformed() {
        let context = RenderContext::default();
        let segment = Segment::column("a");
        let mut engine = Engine::new(&context);
        assert!(matches!(
            engine.leave(&segment),
            Err(RenderError::MalformedDelegation { .. })
        ));
    }
}
