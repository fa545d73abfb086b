//! CLI entry point.
//!
//! Wires infrastructure through [`bootstrap`] and routes each command to
//! its handler.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use readaloud_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let cli_err = err.downcast_ref::<CliError>();
            if !matches!(cli_err, Some(CliError::Reported)) {
                eprintln!("Error: {err:#}");
            }
            let code = cli_err.map_or(1, CliError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

/// Logs go to stderr so `sanitize` and `chunk` output can be piped.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    // Bootstrap the CLI context (composition root)
    let config = CliConfig::with_defaults().map_err(|e| CliError::Config(e.to_string()))?;
    let ctx = bootstrap(config)?;

    match command {
        Commands::Read { rate, file } => handlers::read::execute(&ctx, rate, file.as_deref()).await,
        Commands::Download { output, file } => {
            handlers::download::execute(&ctx, file.as_deref(), output).await
        }
        Commands::Voices { locale } => handlers::voices::execute(&ctx, locale.as_deref()).await,
        Commands::Languages => handlers::languages::execute(&ctx).await,
        Commands::Sanitize { file } => handlers::sanitize::execute(file.as_deref()).await,
        Commands::Chunk { file } => handlers::chunk::execute(&ctx, file.as_deref()).await,
        Commands::Config { command } => handlers::config::execute(&ctx, command).await,
    }
}
