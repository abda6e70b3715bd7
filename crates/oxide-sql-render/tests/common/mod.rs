#![allow(dead_code)]

use oxide_sql_render::{RenderContext, RenderError, Rendered, Segment, SqlRenderer};

pub fn render(segment: &Segment) -> String {
    render_in(&RenderContext::default(), segment)
}

pub fn render_in(context: &RenderContext, segment: &Segment) -> String {
    SqlRenderer::new(context)
        .render(segment)
        .unwrap_or_else(|e| panic!("Failed to render: {segment:?}\nError: {e:?}"))
}

pub fn render_stats(segment: &Segment) -> Rendered {
    SqlRenderer::new(&RenderContext::default())
        .render_with_stats(segment)
        .unwrap_or_else(|e| panic!("Failed to render: {segment:?}\nError: {e:?}"))
}

pub fn render_err(context: &RenderContext, segment: &Segment) -> RenderError {
    match SqlRenderer::new(context).render(segment) {
        Ok(sql) => panic!("Expected render error, got: {sql}"),
        Err(e) => e,
    }
}

pub fn col(name: &str) -> Segment {
    Segment::column(name)
}

/// Builds `depth` tuples nested inside each other around one column.
pub fn nested_tuples(depth: usize) -> Segment {
    let mut segment = col("x");
    for _ in 0..depth {
        segment = Segment::tuple([segment]);
    }
    segment
}
