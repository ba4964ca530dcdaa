//! Output formatting for run command results.

use super::execute::RunResult;
use crate::output::Outputable;

impl Outputable for RunResult {
    fn to_table(&self) -> String {
        if let Some(count) = self.count {
            return format!("{}: {} matching row(s)", self.entity, count);
        }

        let mut lines = vec![format!("{}: {} row(s)", self.entity, self.rows.len())];
        if self.rows.is_empty() {
            return lines.join("\n");
        }

        lines.push(String::new());
        lines.push(self.columns.join(" | "));
        for row in &self.rows {
            let values: Vec<String> = row.values().iter().map(|v| v.to_string()).collect();
            lines.push(values.join(" | "));
        }
        lines.join("\n")
    }
}
