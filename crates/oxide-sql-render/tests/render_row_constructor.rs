//! Tests for row value constructors: punctuation, nesting, empty tuples
//! and delegation bookkeeping.

mod common;
use common::*;

use oxide_sql_render::{Placeholder, RenderContext, Segment};

#[test]
fn tuple_of_three() {
    let tuple = Segment::tuple([col("a"), col("b"), col("c")]);
    assert_eq!(render(&tuple), "(a, b, c)");
}

#[test]
fn tuple_of_one_has_no_separator() {
    assert_eq!(render(&Segment::tuple([col("a")])), "(a)");
}

#[test]
fn nested_tuple() {
    let tuple = Segment::tuple([col("a"), Segment::tuple([col("b"), col("c")])]);
    assert_eq!(render(&tuple), "(a, (b, c))");
}

#[test]
fn nested_tuple_in_first_position() {
    let tuple = Segment::tuple([Segment::tuple([col("a"), col("b")]), col("c")]);
    assert_eq!(render(&tuple), "((a, b), c)");
}

#[test]
fn empty_tuple_renders_parentheses() {
    assert_eq!(render(&Segment::Tuple(vec![])), "()");
    assert_eq!(
        render(&Segment::tuple([col("a"), Segment::Tuple(vec![])])),
        "(a, ())"
    );
}

#[test]
fn tuple_of_mixed_leaves() {
    let tuple = Segment::tuple([
        Segment::qualified("e", "id"),
        Segment::literal("it's"),
        Segment::literal(42),
        Segment::literal(None::<i64>),
        Segment::named_marker("name"),
    ]);
    assert_eq!(render(&tuple), "(e.id, 'it''s', 42, NULL, :name)");
}

#[test]
fn tuple_of_functions() {
    let tuple = Segment::tuple([
        Segment::function("lower", [col("name")]),
        Segment::function("now", Vec::<Segment>::new()),
    ]);
    assert_eq!(render(&tuple), "(lower(name), now())");
}

#[test]
fn delegation_stack_is_balanced() {
    let tuple = Segment::tuple([col("a"), Segment::tuple([col("b"), col("c")])]);
    let rendered = render_stats(&tuple);
    // outer tuple, a, inner tuple, b, c
    assert_eq!(rendered.stats.pushes, 5);
    assert_eq!(rendered.stats.pops, rendered.stats.pushes);
    assert_eq!(rendered.stats.max_nesting, 3);
    assert_eq!(rendered.stats.segments, 5);
}

#[test]
fn rendering_twice_is_identical() {
    let tuple = Segment::tuple([
        Segment::marker(),
        Segment::tuple([Segment::marker(), col("b")]),
    ]);
    let context = RenderContext::default().with_placeholder(Placeholder::Numbered {
        prefix: String::from("$"),
    });
    let first = render_in(&context, &tuple);
    let second = render_in(&context, &tuple);
    assert_eq!(first, "($1, ($2, b))");
    assert_eq!(first, second);
}

#[test]
fn deep_nesting_within_limit_does_not_recurse() {
    let context = RenderContext::default().with_max_depth(10_001);
    let segment = nested_tuples(10_000);
    let sql = render_in(&context, &segment);
    assert_eq!(sql.len(), 10_000 * 2 + 1);
    assert!(sql.starts_with("((("));
    assert!(sql.ends_with("x)))"));
}

#[test]
fn composite_key_in_list() {
    let key = Segment::tuple([col("one"), col("two")]);
    let condition = key.in_values(Segment::tuple([
        Segment::tuple([Segment::literal(1), Segment::literal("a")]),
        Segment::tuple([Segment::literal(2), Segment::literal("b")]),
    ]));
    assert_eq!(
        render(&condition),
        "(one, two) IN ((1, 'a'), (2, 'b'))"
    );
}
