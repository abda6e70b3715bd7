//! The segment tree.

use crate::value::{SqlValue, ToSqlValue};

use super::category::Category;
use super::operators::{BindMarker, ComparisonOp, Direction, JunctionOp, NullHandling};
use super::statement::Select;

/// One syntactic element of a SQL fragment.
///
/// Identifiers (`name`, `table`, `alias`) are taken verbatim: quoting has
/// already been decided by whoever built the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// A literal value.
    Literal(SqlValue),

    /// A column reference, optionally qualified with a table name or alias.
    Column {
        /// Table name or alias.
        table: Option<String>,
        /// Column name.
        name: String,
    },

    /// `*` or `table.*`.
    Asterisk {
        /// Table name or alias.
        table: Option<String>,
    },

    /// A parameter bind marker.
    BindMarker(BindMarker),

    /// A table reference in a FROM clause.
    Table {
        /// Table name.
        name: String,
        /// Alias.
        alias: Option<String>,
    },

    /// LIMIT/OFFSET, rendered in the context's limit style.
    Limit {
        /// Maximum number of rows.
        limit: Option<u64>,
        /// Number of rows to skip.
        offset: Option<u64>,
    },

    /// A row value constructor: `(a, b, c)`.
    Tuple(Vec<Segment>),

    /// A flat comma-separated list, e.g. a select list.
    List(Vec<Segment>),

    /// A function call.
    Function {
        /// Function name.
        name: String,
        /// Arguments.
        args: Vec<Segment>,
    },

    /// `expr AS alias`.
    Alias {
        /// The aliased expression.
        expr: Box<Segment>,
        /// Alias.
        alias: String,
    },

    /// A binary comparison.
    Comparison {
        /// Left operand.
        left: Box<Segment>,
        /// Operator.
        op: ComparisonOp,
        /// Right operand.
        right: Box<Segment>,
    },

    /// Conditions joined with AND or OR.
    Junction {
        /// Joining operator.
        op: JunctionOp,
        /// Joined conditions.
        conditions: Vec<Segment>,
    },

    /// `NOT condition`.
    Not(Box<Segment>),

    /// A parenthesized condition.
    Nested(Box<Segment>),

    /// `expr IS [NOT] NULL`.
    IsNull {
        /// The checked expression.
        expr: Box<Segment>,
        /// Whether this is IS NOT NULL.
        negated: bool,
    },

    /// `expr [NOT] IN values`, where `values` is a tuple or a subselect.
    In {
        /// The checked expression.
        expr: Box<Segment>,
        /// The candidate values.
        values: Box<Segment>,
        /// Whether this is NOT IN.
        negated: bool,
    },

    /// `expr [NOT] BETWEEN low AND high`.
    Between {
        /// The checked expression.
        expr: Box<Segment>,
        /// Lower bound.
        low: Box<Segment>,
        /// Upper bound.
        high: Box<Segment>,
        /// Whether this is NOT BETWEEN.
        negated: bool,
    },

    /// A parenthesized SELECT used as an expression.
    Subselect(Box<Segment>),

    /// A SELECT statement.
    Select(Box<Select>),

    /// A FROM clause over table segments.
    From(Vec<Segment>),

    /// A WHERE clause.
    Where(Box<Segment>),

    /// An ORDER BY clause over `OrderByField` segments.
    OrderBy(Vec<Segment>),

    /// One field of an ORDER BY clause.
    OrderByField {
        /// The sort expression.
        expr: Box<Segment>,
        /// Sort direction, dialect default when absent.
        direction: Option<Direction>,
        /// NULL placement.
        nulls: Option<NullHandling>,
    },

    /// A caller-defined category rendered with registered punctuation.
    Extension {
        /// Category name looked up in the render context.
        category: String,
        /// Child segments.
        children: Vec<Segment>,
    },
}

impl Segment {
    /// Returns the category of this segment.
    #[must_use]
    pub fn category(&self) -> Category<'_> {
        match self {
            Self::Literal(_) => Category::Literal,
            Self::Column { .. } => Category::Column,
            Self::Asterisk { .. } => Category::Asterisk,
            Self::BindMarker(_) => Category::BindMarker,
            Self::Table { .. } => Category::Table,
            Self::Limit { .. } => Category::Limit,
            Self::Tuple(_) => Category::Tuple,
            Self::List(_) => Category::List,
            Self::Function { .. } => Category::Function,
            Self::Alias { .. } => Category::Alias,
            Self::Comparison { .. } => Category::Comparison,
            Self::Junction { .. } => Category::Junction,
            Self::Not(_) => Category::Not,
            Self::Nested(_) => Category::Nested,
            Self::IsNull { .. } => Category::IsNull,
            Self::In { .. } => Category::In,
            Self::Between { .. } => Category::Between,
            Self::Subselect(_) => Category::Subselect,
            Self::Select(_) => Category::Select,
            Self::From(_) => Category::From,
            Self::Where(_) => Category::Where,
            Self::OrderBy(_) => Category::OrderBy,
            Self::OrderByField { .. } => Category::OrderByField,
            Self::Extension { category, .. } => Category::Extension(category),
        }
    }

    /// Returns the direct children of this segment in document order.
    #[must_use]
    pub fn children(&self) -> Vec<&Self> {
        match self {
            Self::Literal(_)
            | Self::Column { .. }
            | Self::Asterisk { .. }
            | Self::BindMarker(_)
            | Self::Table { .. }
            | Self::Limit { .. } => Vec::new(),
            Self::Tuple(items)
            | Self::List(items)
            | Self::From(items)
            | Self::OrderBy(items)
            | Self::Function { args: items, .. }
            | Self::Junction {
                conditions: items, ..
            }
            | Self::Extension {
                children: items, ..
            } => items.iter().collect(),
            Self::Alias { expr, .. }
            | Self::Not(expr)
            | Self::Nested(expr)
            | Self::IsNull { expr, .. }
            | Self::Subselect(expr)
            | Self::Where(expr)
            | Self::OrderByField { expr, .. } => vec![expr.as_ref()],
            Self::Comparison { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            Self::In { expr, values, .. } => vec![expr.as_ref(), values.as_ref()],
            Self::Between {
                expr, low, high, ..
            } => vec![expr.as_ref(), low.as_ref(), high.as_ref()],
            Self::Select(select) => select.children(),
        }
    }

    /// Creates a literal.
    #[must_use]
    pub fn literal<T: ToSqlValue>(value: T) -> Self {
        Self::Literal(value.to_sql_value())
    }

    /// Creates an unqualified column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column {
            table: None,
            name: name.into(),
        }
    }

    /// Creates a qualified column reference.
    #[must_use]
    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Column {
            table: Some(table.into()),
            name: name.into(),
        }
    }

    /// Creates `*`.
    #[must_use]
    pub const fn asterisk() -> Self {
        Self::Asterisk { table: None }
    }

    /// Creates a named bind marker.
    #[must_use]
    pub fn named_marker(name: impl Into<String>) -> Self {
        Self::BindMarker(BindMarker::Named(name.into()))
    }

    /// Creates a positional bind marker.
    #[must_use]
    pub const fn marker() -> Self {
        Self::BindMarker(BindMarker::Anonymous)
    }

    /// Creates a table reference.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self::Table {
            name: name.into(),
            alias: None,
        }
    }

    /// Creates an aliased table reference.
    #[must_use]
    pub fn table_as(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self::Table {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }

    /// Creates a row value constructor.
    #[must_use]
    pub fn tuple(elements: impl IntoIterator<Item = Self>) -> Self {
        Self::Tuple(elements.into_iter().collect())
    }

    /// Creates a flat list.
    #[must_use]
    pub fn list(elements: impl IntoIterator<Item = Self>) -> Self {
        Self::List(elements.into_iter().collect())
    }

    /// Creates a function call.
    #[must_use]
    pub fn function(name: impl Into<String>, args: impl IntoIterator<Item = Self>) -> Self {
        Self::Function {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Creates a caller-defined segment.
    #[must_use]
    pub fn extension(category: impl Into<String>, children: impl IntoIterator<Item = Self>) -> Self {
        Self::Extension {
            category: category.into(),
            children: children.into_iter().collect(),
        }
    }

    /// Wraps a SELECT as an expression.
    #[must_use]
    pub fn subselect(select: Select) -> Self {
        Self::Subselect(Box::new(select.into()))
    }

    /// Aliases this expression.
    #[must_use]
    pub fn aliased(self, alias: impl Into<String>) -> Self {
        Self::Alias {
            expr: Box::new(self),
            alias: alias.into(),
        }
    }

    /// Creates a comparison with this segment on the left.
    #[must_use]
    pub fn compare(self, op: ComparisonOp, right: Self) -> Self {
        Self::Comparison {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    /// `self = right`
    #[must_use]
    pub fn is_equal_to(self, right: Self) -> Self {
        self.compare(ComparisonOp::Eq, right)
    }

    /// `self != right`
    #[must_use]
    pub fn is_not_equal_to(self, right: Self) -> Self {
        self.compare(ComparisonOp::NotEq, right)
    }

    /// `self < right`
    #[must_use]
    pub fn is_less(self, right: Self) -> Self {
        self.compare(ComparisonOp::Lt, right)
    }

    /// `self > right`
    #[must_use]
    pub fn is_greater(self, right: Self) -> Self {
        self.compare(ComparisonOp::Gt, right)
    }

    /// `self LIKE pattern`
    #[must_use]
    pub fn like(self, pattern: Self) -> Self {
        self.compare(ComparisonOp::Like, pattern)
    }

    /// `self IS NULL`
    #[must_use]
    pub fn is_null(self) -> Self {
        Self::IsNull {
            expr: Box::new(self),
            negated: false,
        }
    }

    /// `self IS NOT NULL`
    #[must_use]
    pub fn is_not_null(self) -> Self {
        Self::IsNull {
            expr: Box::new(self),
            negated: true,
        }
    }

    /// `self IN values`
    #[must_use]
    pub fn in_values(self, values: Self) -> Self {
        Self::In {
            expr: Box::new(self),
            values: Box::new(values),
            negated: false,
        }
    }

    /// `self NOT IN values`
    #[must_use]
    pub fn not_in_values(self, values: Self) -> Self {
        Self::In {
            expr: Box::new(self),
            values: Box::new(values),
            negated: true,
        }
    }

    /// `self BETWEEN low AND high`
    #[must_use]
    pub fn between(self, low: Self, high: Self) -> Self {
        Self::Between {
            expr: Box::new(self),
            low: Box::new(low),
            high: Box::new(high),
            negated: false,
        }
    }

    /// `self NOT BETWEEN low AND high`
    #[must_use]
    pub fn not_between(self, low: Self, high: Self) -> Self {
        Self::Between {
            expr: Box::new(self),
            low: Box::new(low),
            high: Box::new(high),
            negated: true,
        }
    }

    /// Joins this condition with `other` using AND.
    ///
    /// Chained calls extend one junction instead of nesting. Junctions are
    /// never parenthesized: `a.or(b).and(c)` renders `a OR b AND c`, so wrap
    /// the OR side with [`Segment::nested`] to keep its grouping.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        self.join(JunctionOp::And, other)
    }

    /// Joins this condition with `other` using OR.
    ///
    /// As with [`Segment::and`], no parentheses are added around `self`.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        self.join(JunctionOp::Or, other)
    }

    fn join(mut self, op: JunctionOp, other: Self) -> Self {
        if let Self::Junction {
            op: existing,
            conditions,
        } = &mut self
        {
            if *existing == op {
                conditions.push(other);
                return self;
            }
        }
        Self::Junction {
            op,
            conditions: vec![self, other],
        }
    }

    /// `NOT self`
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// `(self)`
    #[must_use]
    pub fn nested(self) -> Self {
        Self::Nested(Box::new(self))
    }

    /// Sorts ascending.
    #[must_use]
    pub fn asc(self) -> Self {
        self.ordered(Some(Direction::Asc), None)
    }

    /// Sorts descending.
    #[must_use]
    pub fn desc(self) -> Self {
        self.ordered(Some(Direction::Desc), None)
    }

    /// Sets the NULL placement, keeping any direction already set.
    #[must_use]
    pub fn with_nulls(self, nulls: NullHandling) -> Self {
        self.ordered(None, Some(nulls))
    }

    fn ordered(mut self, direction: Option<Direction>, nulls: Option<NullHandling>) -> Self {
        if let Self::OrderByField {
            direction: current_direction,
            nulls: current_nulls,
            ..
        } = &mut self
        {
            *current_direction = direction.or(*current_direction);
            *current_nulls = nulls.or(*current_nulls);
            return self;
        }
        Self::OrderByField {
            expr: Box::new(self),
            direction,
            nulls,
        }
    }

    /// Moves the children of this segment into `out`, leaving it childless.
    fn detach_children(&mut self, out: &mut Vec<Self>) {
        match self {
            Self::Literal(_)
            | Self::Column { .. }
            | Self::Asterisk { .. }
            | Self::BindMarker(_)
            | Self::Table { .. }
            | Self::Limit { .. } => {}
            Self::Tuple(items)
            | Self::List(items)
            | Self::From(items)
            | Self::OrderBy(items)
            | Self::Function { args: items, .. }
            | Self::Junction {
                conditions: items, ..
            }
            | Self::Extension {
                children: items, ..
            } => out.append(items),
            Self::Alias { expr, .. }
            | Self::Not(expr)
            | Self::Nested(expr)
            | Self::IsNull { expr, .. }
            | Self::Subselect(expr)
            | Self::Where(expr)
            | Self::OrderByField { expr, .. } => out.push(detach(expr)),
            Self::Comparison { left, right, .. } => {
                out.push(detach(left));
                out.push(detach(right));
            }
            Self::In { expr, values, .. } => {
                out.push(detach(expr));
                out.push(detach(values));
            }
            Self::Between {
                expr, low, high, ..
            } => {
                out.push(detach(expr));
                out.push(detach(low));
                out.push(detach(high));
            }
            Self::Select(select) => select.detach_clauses(out),
        }
    }
}

fn detach(slot: &mut Segment) -> Segment {
    std::mem::replace(slot, Segment::Literal(SqlValue::Null))
}

// Frees the tree from a heap stack instead of recursing through `Box` and `Vec`.
impl Drop for Segment {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut segment) = pending.pop() {
            segment.detach_children(&mut pending);
        }
    }
}

impl From<Select> for Segment {
    fn from(select: Select) -> Self {
        Self::Select(Box::new(select))
    }
}
