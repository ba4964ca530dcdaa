use std::error::Error;

use serde::Serialize;

use super::RunCmd;
use crate::commands::{Execute, QuerySpec};
use crate::db::Row;
use crate::session::Session;

/// Result of the run command
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub entity: String,
    pub sql: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    /// Set instead of `rows` when counting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

impl Execute for RunCmd {
    type Output = RunResult;

    fn execute(self, session: &Session) -> Result<Self::Output, Box<dyn Error>> {
        let query = QuerySpec::load(&self.common.query)?;
        let (limit, offset) = self.common.paging(&query);
        let mut criteria = query.apply(session.criteria(&query.entity));

        if self.common.count {
            let sql = criteria.to_sql_count_string()?;
            let count = criteria.count()?;
            return Ok(RunResult {
                entity: query.entity,
                sql,
                columns: Vec::new(),
                rows: Vec::new(),
                count: Some(count),
            });
        }

        let rows = criteria.list(limit, offset)?;
        let sql = criteria.to_sql_string()?;
        let columns = rows.first().map(|r| r.columns().to_vec()).unwrap_or_default();

        Ok(RunResult {
            entity: query.entity,
            sql,
            columns,
            rows,
            count: None,
        })
    }
}
