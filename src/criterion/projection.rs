//! SELECT-list projections.

use serde::{Deserialize, Serialize};

use super::clauses::field;
use super::expression::Expression;
use super::render::CriteriaRender;
use super::CriteriaError;

/// What the query selects instead of the mapped columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Projection {
    /// Aggregate function applied to one argument, e.g. `sum("total")`
    Aggregate {
        function: String,
        argument: Expression,
        #[serde(default)]
        distinct: bool,
        #[serde(default)]
        alias: Option<String>,
        #[serde(default)]
        grouped: bool,
    },
    /// `count(*)`
    RowCount {
        #[serde(default)]
        alias: Option<String>,
    },
    /// A single mapped field, optionally part of GROUP BY
    Property {
        field: String,
        #[serde(default)]
        alias: Option<String>,
        #[serde(default)]
        grouped: bool,
    },
    /// Any expression, e.g. a function call
    Expression {
        expression: Expression,
        #[serde(default)]
        alias: Option<String>,
    },
    List { projections: Vec<Projection> },
}

impl Projection {
    fn aggregate(function: &str, name: &str, distinct: bool) -> Self {
        Self::Aggregate {
            function: function.to_string(),
            argument: field(name),
            distinct,
            alias: None,
            grouped: false,
        }
    }

    pub fn count(name: &str) -> Self {
        Self::aggregate("count", name, false)
    }

    pub fn count_distinct(name: &str) -> Self {
        Self::aggregate("count", name, true)
    }

    pub fn sum(name: &str) -> Self {
        Self::aggregate("sum", name, false)
    }

    pub fn avg(name: &str) -> Self {
        Self::aggregate("avg", name, false)
    }

    pub fn min(name: &str) -> Self {
        Self::aggregate("min", name, false)
    }

    pub fn max(name: &str) -> Self {
        Self::aggregate("max", name, false)
    }

    pub fn row_count() -> Self {
        Self::RowCount { alias: None }
    }

    pub fn property(name: &str) -> Self {
        Self::Property {
            field: name.to_string(),
            alias: None,
            grouped: false,
        }
    }

    /// A field that is both selected and grouped by.
    pub fn group_property(name: &str) -> Self {
        Self::Property {
            field: name.to_string(),
            alias: None,
            grouped: true,
        }
    }

    pub fn expression(expression: Expression) -> Self {
        Self::Expression { expression, alias: None }
    }

    pub fn list(projections: Vec<Projection>) -> Self {
        Self::List { projections }
    }

    /// Name the projection's output column. Lists have no alias of their own
    /// and are returned unchanged.
    pub fn with_alias(mut self, name: &str) -> Self {
        match &mut self {
            Self::Aggregate { alias, .. }
            | Self::RowCount { alias }
            | Self::Property { alias, .. }
            | Self::Expression { alias, .. } => *alias = Some(name.to_string()),
            Self::List { .. } => {}
        }
        self
    }

    pub fn is_grouped(&self) -> bool {
        match self {
            Self::Aggregate { grouped, .. } | Self::Property { grouped, .. } => *grouped,
            Self::RowCount { .. } | Self::Expression { .. } => false,
            Self::List { projections } => projections.iter().any(Projection::is_grouped),
        }
    }

    pub fn render<R: CriteriaRender + ?Sized>(&self, renderer: &mut R) -> Result<String, CriteriaError> {
        match self {
            Self::Aggregate { function, alias, .. } => {
                let args = self.build_function_parameter_list(renderer)?;
                renderer.render_aggregate(function, &args, alias.as_deref())
            }
            Self::RowCount { alias } => renderer.render_row_count(alias.as_deref()),
            Self::Property { field, alias, .. } => renderer.render_property_projection(field, alias.as_deref()),
            Self::Expression { expression, alias } => {
                renderer.render_expression_projection(expression, alias.as_deref())
            }
            Self::List { projections } => renderer.render_projection_list(projections),
        }
    }

    /// Rendered arguments of an aggregate; `distinct <arg>` when distinct.
    /// Empty for every other projection.
    pub fn build_function_parameter_list<R: CriteriaRender + ?Sized>(
        &self,
        renderer: &mut R,
    ) -> Result<Vec<String>, CriteriaError> {
        match self {
            Self::Aggregate {
                argument, distinct, ..
            } => {
                let arg = argument.render(renderer)?;
                Ok(if *distinct {
                    vec![format!("distinct {}", arg)]
                } else {
                    vec![arg]
                })
            }
            _ => Ok(Vec::new()),
        }
    }

    /// GROUP BY contribution of this projection, without aliases.
    pub fn to_group_string<R: CriteriaRender + ?Sized>(&self, renderer: &mut R) -> Result<String, CriteriaError> {
        match self {
            Self::Property {
                field, grouped: true, ..
            } => renderer.render_field(field),
            Self::Aggregate {
                function,
                grouped: true,
                ..
            } => {
                let args = self.build_function_parameter_list(renderer)?;
                renderer.render_aggregate(function, &args, None)
            }
            Self::List { projections } => {
                let groups = projections
                    .iter()
                    .filter(|p| p.is_grouped())
                    .map(|p| p.to_group_string(renderer))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(groups.join(", "))
            }
            _ => Ok(String::new()),
        }
    }
}
