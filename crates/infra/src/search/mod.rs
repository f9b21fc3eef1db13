pub mod client;
pub mod query_builder;
pub mod response;

pub use client::{ElasticsearchClient, SearchBackendError};
pub use query_builder::{compile, CompiledQuery};
pub use response::normalize;
