use crate::domain::taxonomy::{TopicLevel, TopicVocabulary};
use crate::error::CoreError;

pub const MAX_TOPIC_FILTERS: usize = 10;
pub const MAX_DIMENSION_FILTERS: usize = 10;

/// Exact-match constraint narrowing the candidate set. Filters never affect scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterClause {
    Topics { level: TopicLevel, slugs: Vec<String> },
    DimensionNames(Vec<String>),
}

/// Validates a comma separated topic list and groups the slugs by level,
/// emitting at most one clause per level in level order.
pub fn validate_topics(
    raw: Option<&str>,
    vocabulary: &TopicVocabulary,
) -> Result<Vec<FilterClause>, CoreError> {
    let Some(topics) = split_list(raw) else {
        return Ok(Vec::new());
    };
    if topics.len() > MAX_TOPIC_FILTERS {
        return Err(CoreError::TooManyTopicFilters(MAX_TOPIC_FILTERS));
    }

    let mut invalid = Vec::new();
    let mut grouped: [Vec<String>; 3] = Default::default();
    for topic in topics {
        match vocabulary.level(topic) {
            Some(level) => grouped[usize::from(level.as_u8() - 1)].push(topic.to_string()),
            None => invalid.push(topic.to_string()),
        }
    }
    if !invalid.is_empty() {
        return Err(CoreError::InvalidTopicFilter(invalid));
    }

    Ok(TopicLevel::ALL
        .into_iter()
        .zip(grouped)
        .filter(|(_, slugs)| !slugs.is_empty())
        .map(|(level, slugs)| FilterClause::Topics { level, slugs })
        .collect())
}

pub fn validate_dimensions(raw: Option<&str>) -> Result<Option<FilterClause>, CoreError> {
    let Some(names) = split_list(raw) else {
        return Ok(None);
    };
    if names.len() > MAX_DIMENSION_FILTERS {
        return Err(CoreError::TooManyDimensionFilters(MAX_DIMENSION_FILTERS));
    }
    let names: Vec<String> = names
        .into_iter()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        return Ok(None);
    }
    Ok(Some(FilterClause::DimensionNames(names)))
}

// Empty segments are kept so that "a,,b" counts three entries.
fn split_list(raw: Option<&str>) -> Option<Vec<&str>> {
    let raw = raw.filter(|value| !value.trim().is_empty())?;
    Some(raw.split(',').map(str::trim).collect())
}
