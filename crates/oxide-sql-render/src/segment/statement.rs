//! SELECT statement segments.

use super::expression::Segment;

/// A SELECT statement.
///
/// Every clause is stored as its own segment so that the statement renderer
/// can hand each one to the clause renderer for its category.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    distinct: bool,
    list: Segment,
    from: Option<Segment>,
    filter: Option<Segment>,
    order_by: Option<Segment>,
    limit: Option<Segment>,
}

impl Select {
    /// Creates a SELECT over the given select list.
    #[must_use]
    pub fn new(columns: impl IntoIterator<Item = Segment>) -> Self {
        Self {
            distinct: false,
            list: Segment::list(columns),
            from: None,
            filter: None,
            order_by: None,
            limit: None,
        }
    }

    /// Adds DISTINCT.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Sets the FROM clause.
    #[must_use]
    pub fn from(mut self, tables: impl IntoIterator<Item = Segment>) -> Self {
        self.from = Some(Segment::From(tables.into_iter().collect()));
        self
    }

    /// Sets the WHERE condition.
    #[must_use]
    pub fn filter(mut self, condition: Segment) -> Self {
        self.filter = Some(Segment::Where(Box::new(condition)));
        self
    }

    /// Sets the ORDER BY fields.
    #[must_use]
    pub fn order_by(mut self, fields: impl IntoIterator<Item = Segment>) -> Self {
        self.order_by = Some(Segment::OrderBy(fields.into_iter().collect()));
        self
    }

    /// Sets the maximum number of rows.
    #[must_use]
    pub fn limit(mut self, rows: u64) -> Self {
        let offset = self.current_offset();
        self.limit = Some(Segment::Limit {
            limit: Some(rows),
            offset,
        });
        self
    }

    /// Sets the number of rows to skip.
    #[must_use]
    pub fn offset(mut self, rows: u64) -> Self {
        let limit = self.current_limit();
        self.limit = Some(Segment::Limit {
            limit,
            offset: Some(rows),
        });
        self
    }

    /// Returns whether DISTINCT is set.
    #[must_use]
    pub const fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// Returns the clauses in rendering order.
    #[must_use]
    pub fn children(&self) -> Vec<&Segment> {
        std::iter::once(&self.list)
            .chain(self.from.as_ref())
            .chain(self.filter.as_ref())
            .chain(self.order_by.as_ref())
            .chain(self.limit.as_ref())
            .collect()
    }

    /// Moves the clause segments into `out`.
    pub(super) fn detach_clauses(&mut self, out: &mut Vec<Segment>) {
        out.push(std::mem::replace(&mut self.list, Segment::List(Vec::new())));
        out.extend(
            [
                self.from.take(),
                self.filter.take(),
                self.order_by.take(),
                self.limit.take(),
            ]
            .into_iter()
            .flatten(),
        );
    }

    const fn current_limit(&self) -> Option<u64> {
        match &self.limit {
            Some(Segment::Limit { limit, .. }) => *limit,
            _ => None,
        }
    }

    const fn current_offset(&self) -> Option<u64> {
        match &self.limit {
            Some(Segment::Limit { offset, .. }) => *offset,
            _ => None,
        }
    }
}
