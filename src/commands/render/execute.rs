use std::error::Error;

use serde::Serialize;

use super::RenderCmd;
use crate::commands::{Execute, QuerySpec};
use crate::db::Params;
use crate::session::Session;

/// Result of the render command
#[derive(Debug, Clone, Serialize)]
pub struct RenderResult {
    pub entity: String,
    pub dialect: String,
    pub count: bool,
    pub sql: String,
    pub params: Params,
}

impl Execute for RenderCmd {
    type Output = RenderResult;

    fn execute(self, session: &Session) -> Result<Self::Output, Box<dyn Error>> {
        let query = QuerySpec::load(&self.common.query)?;
        let (limit, offset) = self.common.paging(&query);

        let mut criteria = query
            .apply(session.criteria(&query.entity))
            .set_paging(limit, offset);
        let sql = if self.common.count {
            criteria.to_sql_count_string()?
        } else {
            criteria.to_sql_string()?
        };

        Ok(RenderResult {
            entity: query.entity,
            dialect: session.dialect().name().to_string(),
            count: self.common.count,
            sql,
            params: criteria.parameters().clone(),
        })
    }
}
