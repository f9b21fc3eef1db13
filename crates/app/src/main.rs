mod cli;
mod config;
mod http;
mod state;
mod wiring;

use clap::Parser;
use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::ConfigError;
use crate::http::HttpError;
use crate::wiring::WiringError;
use dataset_search_infra::search::SearchBackendError;
use dataset_search_infra::static_data::{self, StaticDataError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("dotenv error: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("static data error: {0}")]
    StaticData(#[from] StaticDataError),
    #[error("wiring error: {0}")]
    Wiring(#[from] WiringError),
    #[error("search backend check failed: {0}")]
    Backend(#[from] SearchBackendError),
    #[error("http error: {0}")]
    Http(#[from] HttpError),
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    if let Some(path) = config::load_dotenv()? {
        info!(path = %path.display(), "loaded .env");
    }
    let config = config::AppConfig::from_env()?;
    info!(
        http_addr = %config.http_addr,
        elasticsearch_url = %config.elasticsearch_url,
        dataset_index = %config.dataset_index,
        max_offset = config.max_offset,
        "config on startup"
    );

    let taxonomy = static_data::load_taxonomy(&config.taxonomy_file).inspect_err(|err| {
        error!(error = %err, "failed to load taxonomy");
    })?;
    let dimensions = static_data::load_dimensions(&config.dimensions_file).inspect_err(|err| {
        error!(error = %err, "failed to load dimensions");
    })?;

    let state = wiring::build_state(config, taxonomy, dimensions)?;
    info!(
        topics = state.vocabulary.len(),
        dimensions = state.dimensions.total_count,
        "static data loaded"
    );

    if cli.skip_backend_check {
        warn!("skipping search backend check");
    } else {
        state.search.ping().await.inspect_err(|err| {
            error!(
                error = %err,
                url = %state.search.base_url(),
                "unable to connect to search backend"
            );
        })?;
        info!(url = %state.search.base_url(), "search backend reachable");
    }

    let addr = state.config.http_addr;
    let listener = http::bind(addr).await?;
    info!(%addr, "http server starting");
    http::serve(listener, http::router::build(state), shutdown_signal()).await?;
    info!("http server stopped");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => error!(error = %err, "failed to install ctrl-c handler"),
    }
}
