use dataset_search_core::error::ErrorKind;
use reqwest::StatusCode;
use thiserror::Error;

use super::query_builder::CompiledQuery;

const MAX_ERROR_BODY_LEN: usize = 512;

#[derive(Debug, Error)]
pub enum SearchBackendError {
    #[error("failed to reach search backend: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("search backend unavailable (status {0})")]
    Unavailable(u16),
    #[error("bad query sent to search backend (status {status}): {body}")]
    BadQuery { status: u16, body: String },
    #[error("failed to parse search backend response: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

impl SearchBackendError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchBackendError::Transport(_) | SearchBackendError::Unavailable(_) => {
                ErrorKind::BackendUnavailable
            }
            SearchBackendError::BadQuery { .. } => ErrorKind::BadQuery,
            SearchBackendError::MalformedResponse(_) => ErrorKind::MalformedBackendResponse,
        }
    }
}

/// Thin client for a single Elasticsearch endpoint. No retries: failures are
/// returned to the caller as soon as they happen.
#[derive(Debug, Clone)]
pub struct ElasticsearchClient {
    http: reqwest::Client,
    base_url: String,
}

impl ElasticsearchClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Runs `query` against `index` and returns the raw response body.
    pub async fn query(
        &self,
        index: &str,
        query: &CompiledQuery,
    ) -> Result<Vec<u8>, SearchBackendError> {
        let response = self
            .http
            .post(search_url(&self.base_url, index))
            .json(query)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        check_status(status, &body)?;
        Ok(body.to_vec())
    }

    /// Checks the cluster root answers with a success status.
    pub async fn ping(&self) -> Result<(), SearchBackendError> {
        let response = self.http.get(&self.base_url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        check_status(status, &body)
    }
}

fn search_url(base_url: &str, index: &str) -> String {
    format!("{base_url}/{index}/_search")
}

fn check_status(status: StatusCode, body: &[u8]) -> Result<(), SearchBackendError> {
    if status.is_success() {
        return Ok(());
    }
    if status.is_server_error() {
        return Err(SearchBackendError::Unavailable(status.as_u16()));
    }
    let text = String::from_utf8_lossy(body);
    Err(SearchBackendError::BadQuery {
        status: status.as_u16(),
        body: text.chars().take(MAX_ERROR_BODY_LEN).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let client = ElasticsearchClient::new(reqwest::Client::new(), "http://localhost:9200/");
        assert_eq!(client.base_url(), "http://localhost:9200");
        assert_eq!(
            search_url(client.base_url(), "dataset-test"),
            "http://localhost:9200/dataset-test/_search"
        );
    }

    #[test]
    fn success_statuses_pass() {
        assert!(check_status(StatusCode::OK, b"{}").is_ok());
        assert!(check_status(StatusCode::CREATED, b"").is_ok());
    }

    #[test]
    fn server_errors_are_unavailable() {
        let err = check_status(StatusCode::SERVICE_UNAVAILABLE, b"").unwrap_err();
        assert!(matches!(err, SearchBackendError::Unavailable(503)));
        assert_eq!(err.kind(), ErrorKind::BackendUnavailable);
    }

    #[test]
    fn client_errors_are_bad_queries() {
        let err = check_status(StatusCode::NOT_FOUND, br#"{"error":"index_not_found"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadQuery);
        match err {
            SearchBackendError::BadQuery { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("index_not_found"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn error_body_is_truncated() {
        let long = "x".repeat(MAX_ERROR_BODY_LEN * 2);
        let err = check_status(StatusCode::BAD_REQUEST, long.as_bytes()).unwrap_err();
        let SearchBackendError::BadQuery { body, .. } = err else {
            panic!("expected bad query");
        };
        assert_eq!(body.len(), MAX_ERROR_BODY_LEN);
    }
}
