//! CLI entry point.

use clap::{CommandFactory, Parser};

use geepr_cli::{Cli, CliError, Commands, handlers};

async fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Serve { .. } => handlers::serve::execute(command.server_config()).await,
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables before parsing so env-backed options see them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.default_log_level()));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let Some(command) = cli.command else {
        // No command provided - show help
        if let Err(e) = Cli::command().print_help() {
            eprintln!("{e}");
        }
        return;
    };

    if let Err(e) = run(command).await {
        tracing::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
