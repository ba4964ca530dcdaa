//! Output formatting for render command results.

use super::execute::RenderResult;
use crate::output::{format_params, Outputable};

impl Outputable for RenderResult {
    fn to_table(&self) -> String {
        let kind = if self.count { "count" } else { "select" };
        let mut lines = vec![
            format!("{} {} ({})", self.entity, kind, self.dialect),
            String::new(),
            self.sql.clone(),
            String::new(),
        ];
        lines.extend(format_params(&self.params));
        lines.join("\n")
    }
}
