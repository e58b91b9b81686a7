use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::cli::{ClassifyArgs, RunArgs};
use sentiment_dapp::config::Config;
use sentiment_dapp::handlers::HandlerRegistry;
use sentiment_dapp::model::{Classifier, SentimentModel};
use sentiment_dapp::worker::RunnerConfig;
use sentiment_dapp::worker::http::{HttpConfig, HttpRollupClient};
use sentiment_dapp::worker::runner::Runner;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub async fn run(args: RunArgs) -> Result<(), AnyError> {
    let config = load_config(args.model)?;
    info!(server_url = %config.rollup.server_url, "HTTP rollup server url");

    // Loaded before the first /finish so inference never pays the load cost
    let model = Arc::new(SentimentModel::load(&config.model.path)?);

    let client = HttpRollupClient::new(
        config.rollup.server_url.clone(),
        HttpConfig::from(&config.rollup),
    )?;
    let registry = HandlerRegistry::with_defaults(model);
    let mut runner = Runner::new(
        Arc::new(client),
        registry,
        RunnerConfig::from(&config.rollup),
    );

    runner.run_until(shutdown_signal()).await?;

    Ok(())
}

pub fn classify(args: ClassifyArgs) -> Result<(), AnyError> {
    let config = load_config(args.model)?;
    let model = SentimentModel::load(&config.model.path)?;

    println!("{}", model.classify(&args.text)?);

    Ok(())
}

fn load_config(model_override: Option<PathBuf>) -> Result<Config, AnyError> {
    let mut config = Config::load()?;
    if let Some(path) = model_override {
        config.model.path = path;
    }
    Ok(config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
