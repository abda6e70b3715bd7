//! Tests for dialect-specific rendering.

mod common;
use common::*;

use oxide_sql_render::dialect::{Dialect, GenericDialect, PostgresDialect, SqlServerDialect};
use oxide_sql_render::{BooleanStyle, RenderContext, Segment, Select};

fn paged_query() -> Segment {
    Select::new([col("id")])
        .from([Segment::table("users")])
        .filter(
            col("active")
                .is_equal_to(Segment::literal(true))
                .and(col("name").is_equal_to(Segment::named_marker("name")))
                .and(col("age").is_greater(Segment::marker())),
        )
        .order_by([col("id").asc()])
        .limit(10)
        .offset(20)
        .into()
}

#[test]
fn generic_dialect() {
    let context = GenericDialect::new().render_context();
    assert_eq!(
        render_in(&context, &paged_query()),
        "SELECT id FROM users WHERE active = TRUE AND name = :name AND age > ? \
         ORDER BY id ASC LIMIT 10 OFFSET 20"
    );
}

#[test]
fn postgres_dialect() {
    let context = PostgresDialect::new().render_context();
    assert_eq!(
        render_in(&context, &paged_query()),
        "SELECT id FROM users WHERE active = TRUE AND name = :name AND age > $1 \
         ORDER BY id ASC LIMIT 10 OFFSET 20"
    );
}

#[test]
fn sqlserver_dialect() {
    let context = SqlServerDialect::new().render_context();
    assert_eq!(
        render_in(&context, &paged_query()),
        "SELECT id FROM users WHERE active = 1 AND name = @name AND age > @P1 \
         ORDER BY id ASC OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY"
    );
}

#[test]
fn dialect_names() {
    assert_eq!(GenericDialect::new().name(), "generic");
    assert_eq!(PostgresDialect::new().name(), "postgres");
    assert_eq!(SqlServerDialect::new().name(), "sqlserver");
}

#[test]
fn context_overrides_on_top_of_dialect() {
    let context = PostgresDialect::new()
        .render_context()
        .with_boolean_style(BooleanStyle::Numeric);
    let row = Segment::tuple([Segment::literal(false), Segment::marker()]);
    assert_eq!(render_in(&context, &row), "(0, $1)");
}

#[test]
fn context_loaded_from_json() {
    let context = RenderContext::from_json(
        r#"{
            "placeholder": { "numbered": { "prefix": "?" } },
            "named_marker_prefix": "$",
            "limit_style": "offset_fetch"
        }"#,
    )
    .unwrap();
    let select: Segment = Select::new([Segment::tuple([
        Segment::marker(),
        Segment::named_marker("id"),
        Segment::marker(),
    ])])
    .limit(1)
    .into();
    assert_eq!(
        render_in(&context, &select),
        "SELECT (?1, $id, ?2) OFFSET 0 ROWS FETCH NEXT 1 ROWS ONLY"
    );
}
