use serde::{Deserialize, Serialize};

use super::clauses::field;
use super::expression::Expression;
use super::render::CriteriaRender;
use super::CriteriaError;

fn default_ascending() -> bool {
    true
}

/// One ORDER BY term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub expression: Expression,
    #[serde(default = "default_ascending")]
    pub ascending: bool,
}

impl Order {
    pub fn new(expression: Expression, ascending: bool) -> Self {
        Self { expression, ascending }
    }

    pub fn asc(name: &str) -> Self {
        Self::new(field(name), true)
    }

    pub fn desc(name: &str) -> Self {
        Self::new(field(name), false)
    }

    pub fn direction(&self) -> &'static str {
        if self.ascending { "ASC" } else { "DESC" }
    }

    pub fn render<R: CriteriaRender + ?Sized>(&self, renderer: &mut R) -> Result<String, CriteriaError> {
        renderer.render_order(self)
    }
}
