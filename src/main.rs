mod app;
mod cli;

use clap::Parser;
use cli::{Cli, Commands, RunArgs};
use sentiment_dapp::observability;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    observability::init_tracing();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run(RunArgs::default())) {
        Commands::Run(args) => app::run(args).await?,
        Commands::Classify(args) => app::classify(args)?,
    }

    Ok(())
}
