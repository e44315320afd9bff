use std::process::ExitCode;

use clap::Parser;
use suidex::cli::{account, config, ids, output, Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Config(args) => config::execute(args.config.as_deref()),
        Commands::Ids(args) => ids::execute(args),
        Commands::AccountCap(args) => account::execute(args.config.as_deref()).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
