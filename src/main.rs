use clap::Parser;
use tracing_subscriber::EnvFilter;

use criteria::cli::Args;
use criteria::config::ConfigFile;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    let output = args.command.run(&config, args.format)?;
    println!("{}", output);
    Ok(())
}
