use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub modules: HealthModules,
}

#[derive(Debug, Serialize)]
pub struct HealthModules {
    pub search: SearchStatus,
    pub taxonomy: TaxonomyStatus,
    pub dimensions: DimensionsStatus,
}

#[derive(Debug, Serialize)]
pub struct SearchStatus {
    pub index: String,
    pub max_offset: usize,
}

#[derive(Debug, Serialize)]
pub struct TaxonomyStatus {
    pub loaded: bool,
    pub root_topics: usize,
    pub filterable_topics: usize,
}

#[derive(Debug, Serialize)]
pub struct DimensionsStatus {
    pub loaded: bool,
    pub count: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let filterable_topics = state.vocabulary.len();
    let dimensions_count = state.dimensions.dimensions.len();

    Json(HealthResponse {
        status: "ok",
        modules: HealthModules {
            search: SearchStatus {
                index: state.config.dataset_index.clone(),
                max_offset: state.config.max_offset,
            },
            taxonomy: TaxonomyStatus {
                loaded: filterable_topics > 0,
                root_topics: state.taxonomy.topics.len(),
                filterable_topics,
            },
            dimensions: DimensionsStatus {
                loaded: dimensions_count > 0,
                count: dimensions_count,
            },
        },
    })
}
