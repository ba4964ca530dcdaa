mod cli_tests;
mod execute;
mod execute_tests;
mod output;
mod output_tests;

pub use execute::RunResult;

use clap::Args;

use super::QueryArgs;

/// Compile a query file and execute it against the configured database
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  criteria run -q adults.json                      # Rows as a table
  criteria run -q adults.json -l 20 --format json  # First 20 rows as JSON
  criteria run -q adults.json --count              # Number of matching rows

The database comes from the config file's \"database\" section, or DATABASE_URL.")]
pub struct RunCmd {
    #[command(flatten)]
    pub common: QueryArgs,
}
