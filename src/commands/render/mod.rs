mod execute;
mod execute_tests;
mod output;

pub use execute::RenderResult;

use clap::Args;

use super::QueryArgs;
use crate::config::ConfigFile;
use crate::db::Disconnected;
use crate::session::Session;

/// Compile a query file to SQL and print it with its parameters
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  criteria render -q adults.json                   # SQL for the configured dialect
  criteria render -q adults.json -d mysql          # SQL for another dialect
  criteria render -q adults.json --literal         # Inline values instead of parameters
  criteria render -q adults.json -l 10 -o 20       # Paged select
  criteria render -q adults.json --count           # SELECT COUNT(*) wrapper")]
pub struct RenderCmd {
    #[command(flatten)]
    pub common: QueryArgs,

    /// Inline values as SQL literals instead of binding parameters
    #[arg(long, default_value_t = false)]
    pub literal: bool,
}

impl RenderCmd {
    /// Rendering needs no database; the session is always disconnected.
    pub fn session(&self, config: &ConfigFile) -> Session {
        let config = self.common.effective_config(config);
        Session::new(config.dialect.create(), config.mapping(), Box::new(Disconnected))
            .with_parameterized(config.parameterized && !self.literal)
    }
}
