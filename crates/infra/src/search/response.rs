use std::collections::BTreeMap;

use dataset_search_core::domain::search::{
    DatasetDocument, SearchResultItem, SearchResultsEnvelope,
};
use dataset_search_core::types::page::PageParameters;
use serde::Deserialize;

use super::client::SearchBackendError;
use super::query_builder::{DIMENSION_LABEL_FIELD, DIMENSION_NAME_FIELD};

type Highlights = BTreeMap<String, Vec<String>>;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Hits,
}

#[derive(Debug, Deserialize)]
struct Hits {
    total: HitsTotal,
    #[serde(default)]
    hits: Vec<RawHit>,
}

/// Elasticsearch 7+ reports `{"value": n, "relation": "eq"}`, older versions a bare number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HitsTotal {
    Count(usize),
    Object { value: usize },
}

impl HitsTotal {
    fn value(&self) -> usize {
        match self {
            HitsTotal::Count(value) | HitsTotal::Object { value } => *value,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "_source")]
    source: DatasetDocument,
    #[serde(default)]
    highlight: Highlights,
    #[serde(default)]
    inner_hits: Option<InnerHits>,
}

#[derive(Debug, Deserialize)]
struct InnerHits {
    #[serde(default)]
    dimensions: Option<NestedHits>,
}

#[derive(Debug, Deserialize)]
struct NestedHits {
    hits: NestedHitList,
}

#[derive(Debug, Deserialize)]
struct NestedHitList {
    #[serde(default)]
    hits: Vec<NestedHit>,
}

#[derive(Debug, Deserialize)]
struct NestedHit {
    #[serde(default)]
    highlight: Highlights,
}

/// Parses a raw `_search` response body and reshapes it into the client envelope.
/// Nothing is returned unless the whole body parses.
pub fn normalize(
    body: &[u8],
    page: &PageParameters,
) -> Result<SearchResultsEnvelope, SearchBackendError> {
    let response: SearchResponse =
        serde_json::from_slice(body).map_err(SearchBackendError::MalformedResponse)?;
    Ok(assemble(response, page))
}

fn assemble(response: SearchResponse, page: &PageParameters) -> SearchResultsEnvelope {
    let total_count = response.hits.total.value();
    let items: Vec<SearchResultItem> = response.hits.hits.into_iter().map(into_item).collect();
    SearchResultsEnvelope {
        count: items.len(),
        total_count,
        limit: page.limit,
        offset: page.offset,
        items,
    }
}

fn into_item(hit: RawHit) -> SearchResultItem {
    let mut matches = hit.highlight;
    let groups = hit
        .inner_hits
        .and_then(|inner| inner.dimensions)
        .map(|nested| nested.hits.hits)
        .unwrap_or_default();
    // Each group overwrites the previous one, so only the last match per field survives.
    for mut group in groups {
        for field in [DIMENSION_LABEL_FIELD, DIMENSION_NAME_FIELD] {
            if let Some(snippets) = group.highlight.remove(field) {
                matches.insert(field.to_string(), snippets);
            }
        }
    }
    SearchResultItem {
        document: hit.source,
        matches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(limit: usize, offset: usize) -> PageParameters {
        PageParameters::validate(limit, offset, 1000).unwrap()
    }

    fn body(value: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn copies_source_and_top_level_highlights() {
        let raw = body(json!({
            "took": 3,
            "hits": {
                "total": {"value": 120, "relation": "eq"},
                "max_score": 4.2,
                "hits": [{
                    "_index": "dataset-test",
                    "_id": "abc",
                    "_score": 4.2,
                    "_source": {
                        "alias": "Population estimates",
                        "description": "Mid-year population",
                        "link": "https://example.com/pop",
                        "title": "Population",
                        "topic1": "peoplepopulationandcommunity",
                        "topic2": "populationandmigration",
                        "dimensions": [{"label": "Sex", "name": "sex"}]
                    },
                    "highlight": {"title": ["<b><em>Population</em></b>"]}
                }]
            }
        }));
        let envelope = normalize(&raw, &page(10, 20)).unwrap();
        assert_eq!(envelope.count, 1);
        assert_eq!(envelope.total_count, 120);
        assert_eq!((envelope.limit, envelope.offset), (10, 20));

        let item = &envelope.items[0];
        assert_eq!(item.document.alias.as_deref(), Some("Population estimates"));
        assert_eq!(item.document.link.as_deref(), Some("https://example.com/pop"));
        assert_eq!(item.document.topic3, None);
        assert_eq!(item.document.dimensions[0].name, "sex");
        assert_eq!(item.matches["title"], vec!["<b><em>Population</em></b>"]);
    }

    #[test]
    fn last_nested_group_wins_per_field() {
        let raw = body(json!({
            "hits": {
                "total": {"value": 1},
                "hits": [{
                    "_score": 1.0,
                    "_source": {"alias": "a", "description": "d", "title": "t"},
                    "highlight": {"dimensions.label": ["stale"]},
                    "inner_hits": {"dimensions": {"hits": {"total": {"value": 3}, "hits": [
                        {"highlight": {"dimensions.label": ["<b><em>Age</em></b> first"], "dimensions.name": ["<b><em>age</em></b>"]}},
                        {"highlight": {"dimensions.label": ["<b><em>Age</em></b> second"]}},
                        {"highlight": {}}
                    ]}}}
                }]
            }
        }));
        let envelope = normalize(&raw, &page(50, 0)).unwrap();
        let matches = &envelope.items[0].matches;
        assert_eq!(matches["dimensions.label"], vec!["<b><em>Age</em></b> second"]);
        assert_eq!(matches["dimensions.name"], vec!["<b><em>age</em></b>"]);
    }

    #[test]
    fn count_reflects_items_on_last_page() {
        let raw = body(json!({
            "hits": {
                "total": 52,
                "hits": [
                    {"_score": null, "_source": {"title": "one"}},
                    {"_score": null, "_source": {"title": "two"}}
                ]
            }
        }));
        let envelope = normalize(&raw, &page(50, 50)).unwrap();
        assert_eq!(envelope.count, 2);
        assert_eq!(envelope.total_count, 52);
        assert!(envelope.items.iter().all(|item| item.matches.is_empty()));
    }

    #[test]
    fn malformed_body_is_rejected() {
        let err = normalize(b"<html>gateway timeout</html>", &page(50, 0)).unwrap_err();
        assert!(matches!(err, SearchBackendError::MalformedResponse(_)));

        let missing_total = body(json!({"hits": {"hits": []}}));
        let err = normalize(&missing_total, &page(50, 0)).unwrap_err();
        assert!(matches!(err, SearchBackendError::MalformedResponse(_)));
    }

    #[test]
    fn normalize_is_repeatable() {
        let raw = body(json!({
            "hits": {
                "total": {"value": 1},
                "hits": [{
                    "_source": {"title": "Deaths"},
                    "highlight": {"title": ["<b><em>Deaths</em></b>"]},
                    "inner_hits": {"dimensions": {"hits": {"hits": [
                        {"highlight": {"dimensions.name": ["<b><em>cause</em></b>"]}}
                    ]}}}
                }]
            }
        }));
        let first = normalize(&raw, &page(5, 0)).unwrap();
        let second = normalize(&raw, &page(5, 0)).unwrap();
        assert_eq!(first, second);
    }
}
