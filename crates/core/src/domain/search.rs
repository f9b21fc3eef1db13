use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::dimensions::Dimension;
use crate::domain::filters::FilterClause;
use crate::error::CoreError;
use crate::types::page::PageParameters;

/// Validated dataset search, ready to be compiled for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub term: String,
    pub page: PageParameters,
    pub filters: Vec<FilterClause>,
}

pub fn parse_term(raw: Option<&str>) -> Result<String, CoreError> {
    let term = raw.map(str::trim).unwrap_or_default();
    if term.is_empty() {
        return Err(CoreError::EmptySearchTerm);
    }
    Ok(term.to_string())
}

/// Dataset document as indexed in the search backend. Fields absent from the
/// stored source stay absent in the output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic3: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<Dimension>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultItem {
    #[serde(flatten)]
    pub document: DatasetDocument,
    /// Highlighted snippets keyed by field name, e.g. `title` or `dimensions.label`.
    pub matches: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultsEnvelope {
    pub count: usize,
    pub total_count: usize,
    pub limit: usize,
    pub offset: usize,
    pub items: Vec<SearchResultItem>,
}
