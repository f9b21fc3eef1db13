use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::state::AppState;
use dataset_search_core::domain::dimensions::DimensionsDoc;

pub async fn get_dimensions(State(state): State<AppState>) -> Json<Arc<DimensionsDoc>> {
    Json(state.dimensions.clone())
}
