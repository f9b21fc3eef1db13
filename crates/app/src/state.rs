use std::sync::Arc;

use crate::config::AppConfig;
use dataset_search_core::domain::dimensions::DimensionsDoc;
use dataset_search_core::domain::taxonomy::{Taxonomy, TopicVocabulary};
use dataset_search_infra::search::ElasticsearchClient;

/// Shared, read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub search: ElasticsearchClient,
    pub taxonomy: Arc<Taxonomy>,
    pub vocabulary: Arc<TopicVocabulary>,
    pub dimensions: Arc<DimensionsDoc>,
}
