use std::collections::BTreeMap;

use dataset_search_core::domain::filters::FilterClause;
use dataset_search_core::domain::taxonomy::TopicLevel;
use serde::Serialize;

pub const HIGHLIGHT_PRE_TAG: &str = "<b><em>";
pub const HIGHLIGHT_POST_TAG: &str = "</em></b>";

pub const DIMENSIONS_PATH: &str = "dimensions";
pub const DIMENSION_LABEL_FIELD: &str = "dimensions.label";
pub const DIMENSION_NAME_FIELD: &str = "dimensions.name";

/// Top-level searchable fields and their boosts.
const SEARCH_FIELDS: [(&str, f32); 6] = [
    ("title", 3.0),
    ("alias", 2.0),
    ("description", 1.0),
    ("topic1", 1.0),
    ("topic2", 1.0),
    ("topic3", 1.0),
];

const NESTED_FIELDS: [&str; 2] = [DIMENSION_LABEL_FIELD, DIMENSION_NAME_FIELD];

/// Elasticsearch `_search` request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    pub from: usize,
    pub size: usize,
    pub track_total_hits: bool,
    pub query: Clause,
    pub sort: Vec<BTreeMap<&'static str, SortOrder>>,
    pub highlight: Highlight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Clause {
    Bool(Box<BoolQuery>),
    Match(BTreeMap<String, MatchOptions>),
    Terms(BTreeMap<String, Vec<String>>),
    Nested(Box<NestedQuery>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoolQuery {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub should: Vec<Clause>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_should_match: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<Clause>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchOptions {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedQuery {
    pub path: &'static str,
    pub query: Clause,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_hits: Option<InnerHitsRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InnerHitsRequest {
    pub highlight: Highlight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub pre_tags: Vec<&'static str>,
    pub post_tags: Vec<&'static str>,
    pub fields: BTreeMap<String, HighlightField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightField {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortOrder {
    pub order: &'static str,
}

/// Builds the backend query for a validated search.
///
/// Any field matching is enough (`minimum_should_match = 1`); filters are
/// AND-ed alongside without contributing to the score. Results are ordered by
/// score only, so equal-score documents come back in backend order.
pub fn compile(term: &str, limit: usize, offset: usize, filters: &[FilterClause]) -> CompiledQuery {
    let term = term.trim();
    let mut should: Vec<Clause> = SEARCH_FIELDS
        .iter()
        .map(|(field, boost)| match_clause(field, term, Some(*boost)))
        .collect();
    should.push(dimensions_clause(term));

    let query = Clause::Bool(Box::new(BoolQuery {
        should,
        minimum_should_match: Some(1),
        filter: filters.iter().map(filter_clause).collect(),
    }));

    CompiledQuery {
        from: offset,
        size: limit,
        track_total_hits: true,
        query,
        sort: vec![BTreeMap::from([("_score", SortOrder { order: "desc" })])],
        highlight: highlight(SEARCH_FIELDS.iter().map(|(field, _)| *field)),
    }
}

fn match_clause(field: &str, term: &str, boost: Option<f32>) -> Clause {
    Clause::Match(BTreeMap::from([(
        field.to_string(),
        MatchOptions {
            query: term.to_string(),
            boost,
        },
    )]))
}

fn dimensions_clause(term: &str) -> Clause {
    Clause::Nested(Box::new(NestedQuery {
        path: DIMENSIONS_PATH,
        query: Clause::Bool(Box::new(BoolQuery {
            should: NESTED_FIELDS
                .iter()
                .map(|field| match_clause(field, term, None))
                .collect(),
            minimum_should_match: Some(1),
            filter: Vec::new(),
        })),
        inner_hits: Some(InnerHitsRequest {
            highlight: highlight(NESTED_FIELDS),
        }),
    }))
}

fn filter_clause(filter: &FilterClause) -> Clause {
    match filter {
        FilterClause::Topics { level, slugs } => terms_clause(topic_field(*level), slugs),
        FilterClause::DimensionNames(names) => Clause::Nested(Box::new(NestedQuery {
            path: DIMENSIONS_PATH,
            query: terms_clause(DIMENSION_NAME_FIELD, names),
            inner_hits: None,
        })),
    }
}

fn terms_clause(field: &str, values: &[String]) -> Clause {
    Clause::Terms(BTreeMap::from([(field.to_string(), values.to_vec())]))
}

fn topic_field(level: TopicLevel) -> &'static str {
    match level {
        TopicLevel::One => "topic1",
        TopicLevel::Two => "topic2",
        TopicLevel::Three => "topic3",
    }
}

fn highlight<'a>(fields: impl IntoIterator<Item = &'a str>) -> Highlight {
    Highlight {
        pre_tags: vec![HIGHLIGHT_PRE_TAG],
        post_tags: vec![HIGHLIGHT_POST_TAG],
        fields: fields
            .into_iter()
            .map(|field| (field.to_string(), HighlightField {}))
            .collect(),
    }
}
