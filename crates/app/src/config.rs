use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: SocketAddr,
    pub elasticsearch_url: String,
    pub dataset_index: String,
    pub max_offset: usize,
    pub request_timeout: Duration,
    pub taxonomy_file: PathBuf,
    pub dimensions_file: PathBuf,
    pub cors_max_age: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid socket address: {0}")]
    InvalidSocket(String),
    #[error("invalid integer for {0}: {1}")]
    InvalidNumber(&'static str, String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);
        let http_addr_raw = vars.string("DATASET_SEARCH_HTTP_ADDR", "127.0.0.1:10200");
        let http_addr = http_addr_raw
            .parse()
            .map_err(|_| ConfigError::InvalidSocket(http_addr_raw.clone()))?;
        let elasticsearch_url =
            vars.string("DATASET_SEARCH_ELASTICSEARCH_URL", "http://localhost:9200");
        if !is_http_url(&elasticsearch_url) {
            return Err(ConfigError::InvalidValue(
                "DATASET_SEARCH_ELASTICSEARCH_URL",
                elasticsearch_url,
            ));
        }
        let dataset_index = vars.string("DATASET_SEARCH_DATASET_INDEX", "dataset-test");
        if dataset_index.trim().is_empty() || dataset_index.contains('/') {
            return Err(ConfigError::InvalidValue(
                "DATASET_SEARCH_DATASET_INDEX",
                dataset_index,
            ));
        }
        let max_offset = vars.usize("DATASET_SEARCH_MAX_OFFSET", 1000)?;
        let request_timeout_secs = vars.u64("DATASET_SEARCH_REQUEST_TIMEOUT_SECS", 10)?;
        let taxonomy_file =
            PathBuf::from(vars.string("DATASET_SEARCH_TAXONOMY_FILE", "data/taxonomy.json"));
        let dimensions_file =
            PathBuf::from(vars.string("DATASET_SEARCH_DIMENSIONS_FILE", "data/dimensions.json"));
        let cors_max_age_secs = vars.u64("DATASET_SEARCH_CORS_MAX_AGE_SECS", 86_400)?;

        Ok(Self {
            http_addr,
            elasticsearch_url,
            dataset_index,
            max_offset,
            request_timeout: Duration::from_secs(request_timeout_secs),
            taxonomy_file,
            dimensions_file,
            cors_max_age: Duration::from_secs(cors_max_age_secs),
        })
    }
}

/// Loads `.env` into the process environment if present. Variables that are
/// already set are left untouched.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn string(&self, key: &'static str, default: &'static str) -> String {
        (self.0)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    fn u64(&self, key: &'static str, default: u64) -> Result<u64, ConfigError> {
        let raw = self.string(key, "");
        if raw.is_empty() {
            return Ok(default);
        }
        raw.parse()
            .map_err(|_| ConfigError::InvalidNumber(key, raw))
    }

    fn usize(&self, key: &'static str, default: usize) -> Result<usize, ConfigError> {
        let raw = self.string(key, "");
        if raw.is_empty() {
            return Ok(default);
        }
        raw.parse()
            .map_err(|_| ConfigError::InvalidNumber(key, raw))
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}
