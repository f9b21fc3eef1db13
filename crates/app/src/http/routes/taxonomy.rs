use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use tracing::debug;

use crate::http::error::ApiError;
use crate::state::AppState;
use dataset_search_core::domain::taxonomy::{Taxonomy, TopicDetail};

pub async fn get_taxonomy(State(state): State<AppState>) -> Json<Arc<Taxonomy>> {
    Json(state.taxonomy.clone())
}

pub async fn get_topic(
    State(state): State<AppState>,
    Path(topic): Path<String>,
) -> Result<Json<TopicDetail>, ApiError> {
    let detail = state.taxonomy.topic_detail(&topic)?;
    debug!(topic = %topic, children = detail.child_topics.len(), "topic found");
    Ok(Json(detail))
}
