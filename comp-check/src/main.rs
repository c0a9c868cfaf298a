use anyhow::Result;
use clap::Parser;
use comp_check_core::Config;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<ExitCode> {
    // Parse CLI arguments first to get verbosity level
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    // Initialize tracing with appropriate verbosity
    let filter = match cli.verbose {
        0 => config.verbosity.as_str(),
        1 => "debug",
        2.. => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    // Process commands
    match cli.command {
        Commands::Check(args) => {
            info!("Check command: {:?}", args);
            // Create async runtime for the command
            let runtime = tokio::runtime::Runtime::new()?;
            let code = runtime.block_on(cli::commands::check::execute(args, &config))?;
            return Ok(ExitCode::from(code));
        }
        Commands::Parse(args) => {
            info!("Parse command: {:?}", args);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(cli::commands::parse::execute(args))?;
        }
        Commands::Types => {
            cli::commands::types::execute();
        }
    }

    Ok(ExitCode::SUCCESS)
}
