//! Rendering of criteria nodes into SQL fragments.
//!
//! [`CriteriaRender`] has one method per node kind. Nodes dispatch to it
//! (see [`Expression::render`]), so adding a node kind means adding a trait
//! method and every renderer has to handle it.

use tracing::trace;

use super::expression::{Expression, JunctionKind, MatchMode};
use super::order::Order;
use super::params::ParamRegistry;
use super::projection::Projection;
use super::CriteriaError;
use crate::db::Value;
use crate::dialect::{Dialect, SqlFunction};
use crate::mapping::Table;

/// Renders each kind of criteria node.
pub trait CriteriaRender {
    fn render_field(&mut self, name: &str) -> Result<String, CriteriaError>;
    fn render_value(&mut self, value: &Value) -> Result<String, CriteriaError>;
    fn render_plain(&mut self, sql: &str) -> Result<String, CriteriaError>;
    fn render_simple(&mut self, left: &Expression, op: &str, right: &Expression) -> Result<String, CriteriaError>;
    fn render_logical(&mut self, left: &Expression, op: &str, right: &Expression)
        -> Result<String, CriteriaError>;
    fn render_property(&mut self, left: &str, op: &str, right: &str) -> Result<String, CriteriaError>;
    fn render_not(&mut self, expression: &Expression) -> Result<String, CriteriaError>;
    fn render_not_null(&mut self, expression: &Expression) -> Result<String, CriteriaError>;
    fn render_null(&mut self, expression: &Expression) -> Result<String, CriteriaError>;
    fn render_between(
        &mut self,
        expression: &Expression,
        lower: &Expression,
        upper: &Expression,
    ) -> Result<String, CriteriaError>;
    fn render_like(
        &mut self,
        expression: &Expression,
        pattern: &str,
        match_mode: MatchMode,
        escape: Option<char>,
        ignore_case: bool,
    ) -> Result<String, CriteriaError>;
    fn render_ilike(
        &mut self,
        expression: &Expression,
        pattern: &str,
        match_mode: MatchMode,
        escape: Option<char>,
    ) -> Result<String, CriteriaError>;
    fn render_in(&mut self, expression: &Expression, values: &[Expression]) -> Result<String, CriteriaError>;
    fn render_junction(&mut self, junction: JunctionKind, members: &[Expression]) -> Result<String, CriteriaError>;
    fn render_function(&mut self, name: &str, args: &[Expression]) -> Result<String, CriteriaError>;
    fn render_order(&mut self, order: &Order) -> Result<String, CriteriaError>;
    fn render_aggregate(&mut self, function: &str, args: &[String], alias: Option<&str>)
        -> Result<String, CriteriaError>;
    fn render_row_count(&mut self, alias: Option<&str>) -> Result<String, CriteriaError>;
    fn render_property_projection(&mut self, field: &str, alias: Option<&str>) -> Result<String, CriteriaError>;
    fn render_expression_projection(
        &mut self,
        expression: &Expression,
        alias: Option<&str>,
    ) -> Result<String, CriteriaError>;
    fn render_projection_list(&mut self, projections: &[Projection]) -> Result<String, CriteriaError>;
}

/// Renderer for one compilation pass.
///
/// Values are bound into `params` when parameterized and inlined as literals
/// otherwise. Fields resolve against `table` when it maps them.
pub struct Renderer<'r> {
    dialect: &'r dyn Dialect,
    table: Option<&'r Table>,
    parameterized: bool,
    params: &'r mut ParamRegistry,
}

impl<'r> Renderer<'r> {
    pub fn new(
        dialect: &'r dyn Dialect,
        table: Option<&'r Table>,
        parameterized: bool,
        params: &'r mut ParamRegistry,
    ) -> Self {
        Self {
            dialect,
            table,
            parameterized,
            params,
        }
    }

    fn literal(&self, value: &Value) -> Result<String, CriteriaError> {
        Ok(match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => self.dialect.boolean_literal(*b).to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) if f.is_finite() => f.to_string(),
            Value::Float(f) => return Err(CriteriaError::InvalidLiteral { value: f.to_string() }),
            Value::Str(s) => self.dialect.quote_literal(s),
        })
    }

    /// Bind or inline a LIKE pattern.
    fn pattern(&mut self, pattern: &str, match_mode: MatchMode) -> String {
        let pattern = match_mode.to_match_string(pattern);
        if self.parameterized {
            self.params.register(Value::Str(pattern))
        } else {
            self.dialect.quote_literal(&pattern)
        }
    }

    fn escaped(&self, mut sql: String, escape: Option<char>) -> String {
        if let Some(c) = escape {
            sql.push_str(" escape ");
            sql.push_str(&self.dialect.quote_literal(&c.to_string()));
        }
        sql
    }

    fn function(&self, name: &str) -> Result<&'r dyn SqlFunction, CriteriaError> {
        let dialect = self.dialect;
        dialect.find_function(name).ok_or_else(|| CriteriaError::FunctionNotFound {
            function: name.to_string(),
            dialect: dialect.name(),
        })
    }

    fn lowered(&self, sql: &str) -> String {
        format!("{}({})", self.dialect.lowercase_function(), sql)
    }

    fn aliased(&self, sql: String, alias: Option<&str>) -> String {
        match alias {
            Some(alias) if !alias.is_empty() => format!("{} AS {}", sql, self.dialect.quote(alias)),
            _ => sql,
        }
    }

    fn render_all(&mut self, expressions: &[Expression]) -> Result<Vec<String>, CriteriaError> {
        expressions.iter().map(|e| e.render(self)).collect()
    }
}

impl CriteriaRender for Renderer<'_> {
    fn render_field(&mut self, name: &str) -> Result<String, CriteriaError> {
        let column = self.table.and_then(|t| t.find_column_by_field_name(name));
        Ok(match column {
            Some(column) => column.quoted_name(self.dialect),
            None => {
                trace!(field = name, "Field not mapped, emitting as-is");
                name.to_string()
            }
        })
    }

    fn render_value(&mut self, value: &Value) -> Result<String, CriteriaError> {
        if self.parameterized {
            Ok(self.params.register(value.clone()))
        } else {
            self.literal(value)
        }
    }

    fn render_plain(&mut self, sql: &str) -> Result<String, CriteriaError> {
        Ok(sql.to_string())
    }

    fn render_simple(&mut self, left: &Expression, op: &str, right: &Expression) -> Result<String, CriteriaError> {
        let left = left.render(self)?;
        let right = right.render(self)?;
        Ok(format!("({} {} {})", left, op, right))
    }

    fn render_logical(
        &mut self,
        left: &Expression,
        op: &str,
        right: &Expression,
    ) -> Result<String, CriteriaError> {
        let left = left.render(self)?;
        let right = right.render(self)?;
        Ok(format!("({} {} {})", left, op, right))
    }

    fn render_property(&mut self, left: &str, op: &str, right: &str) -> Result<String, CriteriaError> {
        let left = self.render_field(left)?;
        let right = self.render_field(right)?;
        Ok(format!("({} {} {})", left, op, right))
    }

    fn render_not(&mut self, expression: &Expression) -> Result<String, CriteriaError> {
        let inner = expression.render(self)?;
        if self.dialect.parenthesize_not_operand() {
            Ok(format!("not ({})", inner))
        } else {
            Ok(format!("not {}", inner))
        }
    }

    fn render_not_null(&mut self, expression: &Expression) -> Result<String, CriteriaError> {
        Ok(format!("{} is not null", expression.render(self)?))
    }

    fn render_null(&mut self, expression: &Expression) -> Result<String, CriteriaError> {
        Ok(format!("{} is null", expression.render(self)?))
    }

    fn render_between(
        &mut self,
        expression: &Expression,
        lower: &Expression,
        upper: &Expression,
    ) -> Result<String, CriteriaError> {
        let target = expression.render(self)?;
        let lower = lower.render(self)?;
        let upper = upper.render(self)?;
        Ok(format!("{} between {} and {}", target, lower, upper))
    }

    fn render_like(
        &mut self,
        expression: &Expression,
        pattern: &str,
        match_mode: MatchMode,
        escape: Option<char>,
        ignore_case: bool,
    ) -> Result<String, CriteriaError> {
        let target = expression.render(self)?;
        let target = if ignore_case { self.lowered(&target) } else { target };
        let pattern = self.pattern(pattern, match_mode);
        Ok(self.escaped(format!("{} like {}", target, pattern), escape))
    }

    fn render_ilike(
        &mut self,
        expression: &Expression,
        pattern: &str,
        match_mode: MatchMode,
        escape: Option<char>,
    ) -> Result<String, CriteriaError> {
        let target = expression.render(self)?;
        let pattern = self.pattern(pattern, match_mode);
        let sql = if self.dialect.supports_ilike() {
            format!("{} ilike {}", target, pattern)
        } else {
            format!("{} like {}", self.lowered(&target), pattern)
        };
        Ok(self.escaped(sql, escape))
    }

    fn render_in(&mut self, expression: &Expression, values: &[Expression]) -> Result<String, CriteriaError> {
        // IN () is invalid SQL; an empty set matches nothing
        if values.is_empty() {
            return Ok("1=0".to_string());
        }
        let target = expression.render(self)?;
        let values = self.render_all(values)?;
        Ok(format!("{} in ({})", target, values.join(", ")))
    }

    fn render_junction(&mut self, junction: JunctionKind, members: &[Expression]) -> Result<String, CriteriaError> {
        if members.is_empty() {
            return Ok("1=1".to_string());
        }
        let members = self.render_all(members)?;
        let separator = format!(" {} ", junction.operator());
        Ok(format!("({})", members.join(&separator)))
    }

    fn render_function(&mut self, name: &str, args: &[Expression]) -> Result<String, CriteriaError> {
        let function = self.function(name)?;
        let args = self.render_all(args)?;
        Ok(function.render(&args))
    }

    fn render_order(&mut self, order: &Order) -> Result<String, CriteriaError> {
        Ok(format!("{} {}", order.expression.render(self)?, order.direction()))
    }

    fn render_aggregate(
        &mut self,
        function: &str,
        args: &[String],
        alias: Option<&str>,
    ) -> Result<String, CriteriaError> {
        let sql = self.function(function)?.render(args);
        Ok(self.aliased(sql, alias))
    }

    fn render_row_count(&mut self, alias: Option<&str>) -> Result<String, CriteriaError> {
        let sql = self.function("count")?.render(&["*".to_string()]);
        Ok(self.aliased(sql, alias))
    }

    fn render_property_projection(&mut self, field: &str, alias: Option<&str>) -> Result<String, CriteriaError> {
        let sql = self.render_field(field)?;
        Ok(self.aliased(sql, alias))
    }

    fn render_expression_projection(
        &mut self,
        expression: &Expression,
        alias: Option<&str>,
    ) -> Result<String, CriteriaError> {
        let sql = expression.render(self)?;
        Ok(self.aliased(sql, alias))
    }

    fn render_projection_list(&mut self, projections: &[Projection]) -> Result<String, CriteriaError> {
        let rendered = projections
            .iter()
            .map(|p| p.render(self))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rendered.join(", "))
    }
}
