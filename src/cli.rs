use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sentiment-dapp")]
#[command(about = "Sentiment classification dapp for the rollup HTTP server", long_about = None)]
pub struct Cli {
    /// Defaults to `run`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll the rollup server and handle requests
    Run(RunArgs),
    /// Classify a piece of text with the model and exit
    Classify(ClassifyArgs),
}

#[derive(clap::Args, Debug, Default)]
pub struct RunArgs {
    /// Model file, overrides `model.path` from the configuration
    #[arg(long)]
    pub model: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ClassifyArgs {
    /// Text to classify
    pub text: String,

    /// Model file, overrides `model.path` from the configuration
    #[arg(long)]
    pub model: Option<PathBuf>,
}
