use std::sync::Arc;

use reqwest::Client;
use thiserror::Error;

use crate::config::AppConfig;
use crate::state::AppState;
use dataset_search_core::domain::dimensions::DimensionsDoc;
use dataset_search_core::domain::taxonomy::{Taxonomy, TopicVocabulary};
use dataset_search_infra::search::ElasticsearchClient;

#[derive(Debug, Error)]
pub enum WiringError {
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub fn build_state(
    config: AppConfig,
    taxonomy: Taxonomy,
    dimensions: DimensionsDoc,
) -> Result<AppState, WiringError> {
    let client = Client::builder().timeout(config.request_timeout).build()?;
    let search = ElasticsearchClient::new(client, config.elasticsearch_url.clone());
    let vocabulary = TopicVocabulary::from_taxonomy(&taxonomy);
    Ok(AppState {
        config: Arc::new(config),
        search,
        taxonomy: Arc::new(taxonomy),
        vocabulary: Arc::new(vocabulary),
        dimensions: Arc::new(dimensions),
    })
}
