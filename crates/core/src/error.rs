use thiserror::Error;

/// Classification shared by every error the service can surface to a client.
/// The HTTP layer maps each kind to exactly one status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptySearchTerm,
    MalformedParameter,
    OffsetExceedsMaximum,
    TooManyTopicFilters,
    TooManyDimensionFilters,
    InvalidTopicFilter,
    TopicNotFound,
    BackendUnavailable,
    BadQuery,
    MalformedBackendResponse,
    InternalError,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("empty search term")]
    EmptySearchTerm,
    #[error("failed to parse {0} parameter, value must be a non-negative integer: {1}")]
    MalformedParameter(&'static str, String),
    #[error("the maximum offset has been reached, the offset cannot be more than {0}")]
    OffsetExceedsMaximum(usize),
    #[error("too many topic filters, limited to a maximum of {0}")]
    TooManyTopicFilters(usize),
    #[error("too many dimension filters, limited to a maximum of {0}")]
    TooManyDimensionFilters(usize),
    #[error("invalid list of topics to filter by: {}", .0.join(","))]
    InvalidTopicFilter(Vec<String>),
    #[error("topic not found: {0}")]
    TopicNotFound(String),
    #[error("invalid slug: {0}")]
    InvalidSlug(String),
    #[error("invalid taxonomy: {0}")]
    InvalidTaxonomy(String),
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::EmptySearchTerm => ErrorKind::EmptySearchTerm,
            CoreError::MalformedParameter(..) => ErrorKind::MalformedParameter,
            CoreError::OffsetExceedsMaximum(_) => ErrorKind::OffsetExceedsMaximum,
            CoreError::TooManyTopicFilters(_) => ErrorKind::TooManyTopicFilters,
            CoreError::TooManyDimensionFilters(_) => ErrorKind::TooManyDimensionFilters,
            CoreError::InvalidTopicFilter(_) => ErrorKind::InvalidTopicFilter,
            CoreError::TopicNotFound(_) => ErrorKind::TopicNotFound,
            // Only raised while loading static data, never by a request.
            CoreError::InvalidSlug(_) | CoreError::InvalidTaxonomy(_) => ErrorKind::InternalError,
        }
    }
}
