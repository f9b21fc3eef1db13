use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::{debug, info};

use crate::http::error::ApiError;
use crate::state::AppState;
use dataset_search_core::domain::filters::{validate_dimensions, validate_topics};
use dataset_search_core::domain::search::{parse_term, SearchRequest, SearchResultsEnvelope};
use dataset_search_core::domain::taxonomy::TopicVocabulary;
use dataset_search_core::error::CoreError;
use dataset_search_core::types::page::PageParameters;
use dataset_search_infra::search::{compile, normalize};

/// Raw query string. Numbers stay strings so parse failures map to our own error.
#[derive(Debug, Default, Deserialize)]
pub struct DatasetSearchParams {
    pub q: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub topics: Option<String>,
    pub dimensions: Option<String>,
}

pub async fn search_datasets(
    State(state): State<AppState>,
    params: Result<Query<DatasetSearchParams>, QueryRejection>,
) -> Result<Json<SearchResultsEnvelope>, ApiError> {
    let Query(params) = params?;
    let request = build_request(&params, &state.vocabulary, state.config.max_offset)?;
    let query = compile(
        &request.term,
        request.page.limit,
        request.page.offset,
        &request.filters,
    );
    debug!(
        term = %request.term,
        limit = request.page.limit,
        offset = request.page.offset,
        filters = request.filters.len(),
        "querying dataset index"
    );

    let body = state
        .search
        .query(&state.config.dataset_index, &query)
        .await?;
    let envelope = normalize(&body, &request.page)?;
    info!(
        term = %request.term,
        count = envelope.count,
        total_count = envelope.total_count,
        "dataset search completed"
    );
    Ok(Json(envelope))
}

/// Runs every validation step. Nothing reaches the backend unless all pass.
pub fn build_request(
    params: &DatasetSearchParams,
    vocabulary: &TopicVocabulary,
    max_offset: usize,
) -> Result<SearchRequest, CoreError> {
    let term = parse_term(params.q.as_deref())?;
    let page = PageParameters::parse(params.limit.as_deref(), params.offset.as_deref(), max_offset)?;
    let mut filters = validate_topics(params.topics.as_deref(), vocabulary)?;
    if let Some(dimensions) = validate_dimensions(params.dimensions.as_deref())? {
        filters.push(dimensions);
    }
    Ok(SearchRequest {
        term,
        page,
        filters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset_search_core::domain::filters::FilterClause;
    use dataset_search_core::domain::taxonomy::TopicLevel;
    use dataset_search_core::types::slug::Slug;

    fn vocabulary() -> TopicVocabulary {
        [("economy", TopicLevel::One), ("ageing", TopicLevel::Three)]
            .into_iter()
            .map(|(slug, level)| (Slug::try_from(slug).unwrap(), level))
            .collect()
    }

    fn params(q: &str) -> DatasetSearchParams {
        DatasetSearchParams {
            q: Some(q.to_string()),
            ..DatasetSearchParams::default()
        }
    }

    #[test]
    fn defaults_for_plain_term() {
        let request = build_request(&params(" population "), &vocabulary(), 1000).unwrap();
        assert_eq!(request.term, "population");
        assert_eq!((request.page.limit, request.page.offset), (50, 0));
        assert!(request.filters.is_empty());
    }

    #[test]
    fn empty_term_fails_first() {
        let mut blank = params("   ");
        blank.offset = Some("99999".to_string());
        blank.topics = Some("doesnotexist".to_string());
        let err = build_request(&blank, &vocabulary(), 1000).unwrap_err();
        assert_eq!(err, CoreError::EmptySearchTerm);
    }

    #[test]
    fn offset_beyond_maximum() {
        let mut request = params("population");
        request.offset = Some("1001".to_string());
        let err = build_request(&request, &vocabulary(), 1000).unwrap_err();
        assert_eq!(err, CoreError::OffsetExceedsMaximum(1000));
    }

    #[test]
    fn topic_and_dimension_filters_combine() {
        let mut request = params("population");
        request.topics = Some("ageing,economy".to_string());
        request.dimensions = Some("sex".to_string());
        let built = build_request(&request, &vocabulary(), 1000).unwrap();
        assert_eq!(built.filters.len(), 3);
        assert_eq!(
            built.filters[2],
            FilterClause::DimensionNames(vec!["sex".to_string()])
        );
    }
}
