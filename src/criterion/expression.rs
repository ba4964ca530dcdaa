//! Condition, value and reference nodes.
//!
//! Nodes carry no SQL formatting knowledge. Each one renders by handing its
//! parts to the matching [`CriteriaRender`] method, which owns dialect
//! lookups, quoting and parameter binding.

use serde::{Deserialize, Serialize};

use super::render::CriteriaRender;
use super::CriteriaError;
use crate::db::Value;

/// How a LIKE pattern is anchored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// The pattern as given
    #[default]
    Exact,
    /// `pattern%`
    Start,
    /// `%pattern`
    End,
    /// `%pattern%`
    Anywhere,
}

impl MatchMode {
    pub fn to_match_string(self, pattern: &str) -> String {
        match self {
            MatchMode::Exact => pattern.to_string(),
            MatchMode::Start => format!("{}%", pattern),
            MatchMode::End => format!("%{}", pattern),
            MatchMode::Anywhere => format!("%{}%", pattern),
        }
    }
}

/// Boolean connective of a [`Expression::Junction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JunctionKind {
    And,
    Or,
}

impl JunctionKind {
    pub fn operator(self) -> &'static str {
        match self {
            JunctionKind::And => "AND",
            JunctionKind::Or => "OR",
        }
    }
}

/// A node of the query's predicate and reference tree.
///
/// In JSON each node is an object tagged by `kind`, e.g.
/// `{"kind": "simple", "left": {"kind": "field", "name": "age"}, "op": ">", "right": {"kind": "value", "value": 18}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expression {
    /// Logical field, resolved to a quoted column when mapped
    Field { name: String },
    /// Literal bound as a parameter or inlined, depending on the render mode
    Value { value: Value },
    /// Pre-rendered SQL, emitted verbatim
    Plain { sql: String },
    /// `(left op right)` comparison
    Simple {
        left: Box<Expression>,
        op: String,
        right: Box<Expression>,
    },
    /// `(left op right)` boolean combination of two expressions
    Logical {
        left: Box<Expression>,
        op: String,
        right: Box<Expression>,
    },
    /// `(left op right)` comparison of two fields
    Property { left: String, op: String, right: String },
    Not { expression: Box<Expression> },
    NotNull { expression: Box<Expression> },
    Null { expression: Box<Expression> },
    Between {
        expression: Box<Expression>,
        lower: Box<Expression>,
        upper: Box<Expression>,
    },
    Like {
        expression: Box<Expression>,
        value: String,
        #[serde(default)]
        match_mode: MatchMode,
        #[serde(default)]
        escape: Option<char>,
        #[serde(default)]
        ignore_case: bool,
    },
    Ilike {
        expression: Box<Expression>,
        value: String,
        #[serde(default)]
        match_mode: MatchMode,
        #[serde(default)]
        escape: Option<char>,
    },
    In {
        expression: Box<Expression>,
        values: Vec<Expression>,
    },
    /// n-ary AND/OR; an empty junction always matches
    Junction {
        junction: JunctionKind,
        #[serde(default)]
        members: Vec<Expression>,
    },
    /// Function call resolved through the dialect's function registry
    Function {
        name: String,
        #[serde(default)]
        args: Vec<Expression>,
    },
}

impl Expression {
    /// Render this node through `renderer`.
    pub fn render<R: CriteriaRender + ?Sized>(&self, renderer: &mut R) -> Result<String, CriteriaError> {
        match self {
            Self::Field { name } => renderer.render_field(name),
            Self::Value { value } => renderer.render_value(value),
            Self::Plain { sql } => renderer.render_plain(sql),
            Self::Simple { left, op, right } => renderer.render_simple(left, op, right),
            Self::Logical { left, op, right } => renderer.render_logical(left, op, right),
            Self::Property { left, op, right } => renderer.render_property(left, op, right),
            Self::Not { expression } => renderer.render_not(expression),
            Self::NotNull { expression } => renderer.render_not_null(expression),
            Self::Null { expression } => renderer.render_null(expression),
            Self::Between { expression, lower, upper } => renderer.render_between(expression, lower, upper),
            Self::Like {
                expression,
                value,
                match_mode,
                escape,
                ignore_case,
            } => renderer.render_like(expression, value, *match_mode, *escape, *ignore_case),
            Self::Ilike {
                expression,
                value,
                match_mode,
                escape,
            } => renderer.render_ilike(expression, value, *match_mode, *escape),
            Self::In { expression, values } => renderer.render_in(expression, values),
            Self::Junction { junction, members } => renderer.render_junction(*junction, members),
            Self::Function { name, args } => renderer.render_function(name, args),
        }
    }

    /// Append a member to a junction. Any other node is first wrapped in an
    /// AND junction together with `member`.
    pub fn and_also(self, member: Expression) -> Expression {
        match self {
            Self::Junction { junction, mut members } => {
                members.push(member);
                Self::Junction { junction, members }
            }
            other => Self::Junction {
                junction: JunctionKind::And,
                members: vec![other, member],
            },
        }
    }
}
