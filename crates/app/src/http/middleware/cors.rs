use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

/// Per-route CORS headers. Every public route is readable from any origin.
#[derive(Debug, Clone, Copy)]
pub struct CorsPolicy {
    pub methods: &'static str,
    pub max_age: Duration,
}

impl CorsPolicy {
    pub fn read_only(max_age: Duration) -> Self {
        Self {
            methods: "GET, OPTIONS",
            max_age,
        }
    }
}

pub async fn apply_cors(State(policy): State<CorsPolicy>, req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    set_cors_headers(response.headers_mut(), &policy);
    response
}

pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

fn set_cors_headers(headers: &mut HeaderMap, policy: &CorsPolicy) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(policy.methods),
    );
    headers.insert(
        ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from(policy.max_age.as_secs()),
    );
}
