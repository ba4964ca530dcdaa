//! Shorthand constructors for building criteria trees.
//!
//! ```ignore
//! use criteria::criterion::clauses::*;
//! let adults = and(vec![gt("age", 18), lt("age", 65)]);
//! ```

use super::expression::{Expression, JunctionKind, MatchMode};
use crate::db::Value;

pub fn field(name: impl Into<String>) -> Expression {
    Expression::Field { name: name.into() }
}

pub fn value(value: impl Into<Value>) -> Expression {
    Expression::Value { value: value.into() }
}

pub fn plain(sql: impl Into<String>) -> Expression {
    Expression::Plain { sql: sql.into() }
}

/// `(left op right)` between two arbitrary expressions.
pub fn simple(left: Expression, op: &str, right: Expression) -> Expression {
    Expression::Simple {
        left: Box::new(left),
        op: op.to_string(),
        right: Box::new(right),
    }
}

fn compare(name: &str, op: &str, v: impl Into<Value>) -> Expression {
    simple(field(name), op, value(v))
}

pub fn eq(name: &str, v: impl Into<Value>) -> Expression {
    compare(name, "=", v)
}

pub fn ne(name: &str, v: impl Into<Value>) -> Expression {
    compare(name, "<>", v)
}

pub fn gt(name: &str, v: impl Into<Value>) -> Expression {
    compare(name, ">", v)
}

pub fn ge(name: &str, v: impl Into<Value>) -> Expression {
    compare(name, ">=", v)
}

pub fn lt(name: &str, v: impl Into<Value>) -> Expression {
    compare(name, "<", v)
}

pub fn le(name: &str, v: impl Into<Value>) -> Expression {
    compare(name, "<=", v)
}

/// Compare two fields of the same row.
pub fn property(left: &str, op: &str, right: &str) -> Expression {
    Expression::Property {
        left: left.to_string(),
        op: op.to_string(),
        right: right.to_string(),
    }
}

pub fn eq_property(left: &str, right: &str) -> Expression {
    property(left, "=", right)
}

pub fn ne_property(left: &str, right: &str) -> Expression {
    property(left, "<>", right)
}

pub fn lt_property(left: &str, right: &str) -> Expression {
    property(left, "<", right)
}

pub fn gt_property(left: &str, right: &str) -> Expression {
    property(left, ">", right)
}

/// Binary boolean combination, e.g. `logical(a, "OR", b)`.
pub fn logical(left: Expression, op: &str, right: Expression) -> Expression {
    Expression::Logical {
        left: Box::new(left),
        op: op.to_string(),
        right: Box::new(right),
    }
}

pub fn and(members: Vec<Expression>) -> Expression {
    Expression::Junction {
        junction: JunctionKind::And,
        members,
    }
}

pub fn or(members: Vec<Expression>) -> Expression {
    Expression::Junction {
        junction: JunctionKind::Or,
        members,
    }
}

/// Empty AND junction, to be filled with [`Expression::and_also`].
pub fn conjunction() -> Expression {
    and(Vec::new())
}

/// Empty OR junction.
pub fn disjunction() -> Expression {
    or(Vec::new())
}

pub fn not(expression: Expression) -> Expression {
    Expression::Not {
        expression: Box::new(expression),
    }
}

pub fn is_null(name: &str) -> Expression {
    Expression::Null {
        expression: Box::new(field(name)),
    }
}

pub fn is_not_null(name: &str) -> Expression {
    Expression::NotNull {
        expression: Box::new(field(name)),
    }
}

pub fn between(name: &str, lower: impl Into<Value>, upper: impl Into<Value>) -> Expression {
    Expression::Between {
        expression: Box::new(field(name)),
        lower: Box::new(value(lower)),
        upper: Box::new(value(upper)),
    }
}

pub fn like(name: &str, pattern: &str, match_mode: MatchMode) -> Expression {
    Expression::Like {
        expression: Box::new(field(name)),
        value: pattern.to_string(),
        match_mode,
        escape: None,
        ignore_case: false,
    }
}

/// LIKE with the column lowered before matching.
pub fn like_ignore_case(name: &str, pattern: &str, match_mode: MatchMode) -> Expression {
    Expression::Like {
        expression: Box::new(field(name)),
        value: pattern.to_string(),
        match_mode,
        escape: None,
        ignore_case: true,
    }
}

pub fn ilike(name: &str, pattern: &str, match_mode: MatchMode) -> Expression {
    Expression::Ilike {
        expression: Box::new(field(name)),
        value: pattern.to_string(),
        match_mode,
        escape: None,
    }
}

/// Set the escape character of a LIKE or ILIKE node. Other nodes are returned
/// unchanged.
pub fn with_escape(expression: Expression, escape_char: char) -> Expression {
    match expression {
        Expression::Like {
            expression,
            value,
            match_mode,
            ignore_case,
            ..
        } => Expression::Like {
            expression,
            value,
            match_mode,
            escape: Some(escape_char),
            ignore_case,
        },
        Expression::Ilike {
            expression,
            value,
            match_mode,
            ..
        } => Expression::Ilike {
            expression,
            value,
            match_mode,
            escape: Some(escape_char),
        },
        other => other,
    }
}

pub fn in_values<V: Into<Value>>(name: &str, values: impl IntoIterator<Item = V>) -> Expression {
    Expression::In {
        expression: Box::new(field(name)),
        values: values.into_iter().map(value).collect(),
    }
}

pub fn function(name: &str, args: Vec<Expression>) -> Expression {
    Expression::Function {
        name: name.to_string(),
        args,
    }
}
