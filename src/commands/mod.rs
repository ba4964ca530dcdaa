//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - An `Execute` impl producing an `Outputable` result

mod query_file;
mod render;
mod run;

pub use query_file::QuerySpec;
pub use render::{RenderCmd, RenderResult};
pub use run::{RunCmd, RunResult};

use clap::{Args, Subcommand};
use std::error::Error;
use std::path::PathBuf;

use crate::config::ConfigFile;
use crate::dialect::DialectKind;
use crate::output::{OutputFormat, Outputable};
use crate::session::Session;

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, session: &Session) -> Result<Self::Output, Box<dyn Error>>;
}

/// Arguments shared by every command that compiles a query file.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Path to the JSON query file
    #[arg(short, long)]
    pub query: PathBuf,

    /// Override the dialect from the config file
    #[arg(short, long, value_enum)]
    pub dialect: Option<DialectKind>,

    /// Maximum number of rows (overrides the query file)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,

    /// Rows to skip (overrides the query file)
    #[arg(short, long)]
    pub offset: Option<u64>,

    /// Count matching rows instead of selecting them
    #[arg(short, long, default_value_t = false)]
    pub count: bool,
}

impl QueryArgs {
    /// Paging from the command line, falling back to the query file.
    pub fn paging(&self, query: &QuerySpec) -> (Option<u64>, u64) {
        (self.limit.or(query.limit), self.offset.unwrap_or(query.offset))
    }

    /// The config file with the `--dialect` override applied.
    pub fn effective_config(&self, config: &ConfigFile) -> ConfigFile {
        let mut config = config.clone();
        if let Some(dialect) = self.dialect {
            config.dialect = dialect;
        }
        config
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a query file to SQL and print it with its parameters
    Render(RenderCmd),

    /// Compile a query file and execute it against the configured database
    Run(RunCmd),

    /// Catch-all for unknown commands
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, config: &ConfigFile, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Render(cmd) => {
                let session = cmd.session(config);
                let result = cmd.execute(&session)?;
                Ok(result.format(format))
            }
            Command::Run(cmd) => {
                let session = Session::from_config(&cmd.common.effective_config(config))?;
                let result = cmd.execute(&session)?;
                Ok(result.format(format))
            }
            Command::Unknown(args) => {
                Err(format!("Unknown command: {}", args.first().map(String::as_str).unwrap_or_default()).into())
            }
        }
    }
}
