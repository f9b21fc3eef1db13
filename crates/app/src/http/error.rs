use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use dataset_search_core::error::{CoreError, ErrorKind};
use dataset_search_infra::search::SearchBackendError;

const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Request(#[from] CoreError),
    #[error(transparent)]
    Backend(#[from] SearchBackendError),
    #[error("invalid query string: {}", .0.body_text())]
    Query(#[from] QueryRejection),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Request(err) => err.kind(),
            ApiError::Backend(err) => err.kind(),
            ApiError::Query(_) => ErrorKind::MalformedParameter,
        }
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::EmptySearchTerm
        | ErrorKind::MalformedParameter
        | ErrorKind::OffsetExceedsMaximum
        | ErrorKind::TooManyTopicFilters
        | ErrorKind::TooManyDimensionFilters
        | ErrorKind::InvalidTopicFilter => StatusCode::BAD_REQUEST,
        ErrorKind::TopicNotFound => StatusCode::NOT_FOUND,
        ErrorKind::BackendUnavailable
        | ErrorKind::BadQuery
        | ErrorKind::MalformedBackendResponse
        | ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let kind = self.kind();
        let status = status_for(kind);
        let message = if status.is_server_error() {
            error!(error = %self, ?kind, "request failed");
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            warn!(error = %self, ?kind, "request rejected");
            self.to_string()
        };
        let body = Json(ErrorBody { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_kinds_are_bad_requests() {
        for kind in [
            ErrorKind::EmptySearchTerm,
            ErrorKind::MalformedParameter,
            ErrorKind::OffsetExceedsMaximum,
            ErrorKind::TooManyTopicFilters,
            ErrorKind::TooManyDimensionFilters,
            ErrorKind::InvalidTopicFilter,
        ] {
            assert_eq!(status_for(kind), StatusCode::BAD_REQUEST, "{kind:?}");
        }
    }

    #[test]
    fn topic_not_found_is_not_found() {
        assert_eq!(status_for(ErrorKind::TopicNotFound), StatusCode::NOT_FOUND);
    }

    #[test]
    fn backend_kinds_are_server_errors() {
        for kind in [
            ErrorKind::BackendUnavailable,
            ErrorKind::BadQuery,
            ErrorKind::MalformedBackendResponse,
            ErrorKind::InternalError,
        ] {
            assert_eq!(status_for(kind), StatusCode::INTERNAL_SERVER_ERROR, "{kind:?}");
        }
    }

    #[test]
    fn backend_errors_classify_through() {
        let err = ApiError::from(SearchBackendError::Unavailable(503));
        assert_eq!(err.kind(), ErrorKind::BackendUnavailable);
        let err = ApiError::from(SearchBackendError::BadQuery {
            status: 400,
            body: "parsing_exception".to_string(),
        });
        assert_eq!(err.kind(), ErrorKind::BadQuery);
    }

    #[tokio::test]
    async fn server_errors_hide_details() {
        let response = ApiError::from(SearchBackendError::BadQuery {
            status: 400,
            body: "parsing_exception at [query][bool]".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "internal server error");
    }

    #[tokio::test]
    async fn client_errors_carry_message() {
        let response = ApiError::from(CoreError::EmptySearchTerm).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "empty search term");
    }
}
