use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::slug::Slug;

pub const MAX_TOPIC_DEPTH: usize = 3;

/// Taxonomy document as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxonomyDefinition {
    pub topics: Vec<TopicDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopicDefinition {
    pub title: String,
    /// Derived from `title` when missing.
    #[serde(default, rename = "filterable_title", alias = "formatted_title")]
    pub slug: Option<String>,
    #[serde(default)]
    pub child_topics: Vec<TopicDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicNode {
    pub title: String,
    #[serde(rename = "filterable_title")]
    pub slug: Slug,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub child_topics: Vec<TopicNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TopicLevel {
    One,
    Two,
    Three,
}

impl TopicLevel {
    pub const ALL: [TopicLevel; 3] = [TopicLevel::One, TopicLevel::Two, TopicLevel::Three];

    fn from_depth(depth: usize) -> Option<Self> {
        match depth {
            1 => Some(TopicLevel::One),
            2 => Some(TopicLevel::Two),
            3 => Some(TopicLevel::Three),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            TopicLevel::One => 1,
            TopicLevel::Two => 2,
            TopicLevel::Three => 3,
        }
    }
}

/// Immutable topic forest, at most three levels deep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Taxonomy {
    pub topics: Vec<TopicNode>,
}

/// A node found by [`Taxonomy::find_topic`] together with its immediate parent.
#[derive(Debug, Clone, Copy)]
pub struct TopicMatch<'a> {
    pub node: &'a TopicNode,
    pub parent: Option<&'a TopicNode>,
}

/// Response shape for a single-topic lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_topic: Option<String>,
    pub title: String,
    pub topic: String,
    pub child_topics: Vec<String>,
}

impl Taxonomy {
    pub fn build(definition: TaxonomyDefinition) -> Result<Self, CoreError> {
        let topics = build_nodes(definition.topics, 1)?;
        Ok(Self { topics })
    }

    /// Depth-first, pre-order search. The first node carrying `slug` wins.
    pub fn find_node(&self, slug: &str) -> Option<&TopicNode> {
        self.find_topic(slug).map(|found| found.node)
    }

    pub fn find_topic(&self, slug: &str) -> Option<TopicMatch<'_>> {
        find_in(&self.topics, None, slug)
    }

    pub fn topic_detail(&self, slug: &str) -> Result<TopicDetail, CoreError> {
        self.find_topic(slug)
            .map(TopicDetail::from)
            .ok_or_else(|| CoreError::TopicNotFound(slug.to_string()))
    }
}

impl From<TopicMatch<'_>> for TopicDetail {
    fn from(found: TopicMatch<'_>) -> Self {
        TopicDetail {
            parent_topic: found.parent.map(|parent| parent.slug.to_string()),
            title: found.node.title.clone(),
            topic: found.node.slug.to_string(),
            child_topics: found
                .node
                .child_topics
                .iter()
                .map(|child| child.slug.to_string())
                .collect(),
        }
    }
}

fn build_nodes(definitions: Vec<TopicDefinition>, depth: usize) -> Result<Vec<TopicNode>, CoreError> {
    definitions
        .into_iter()
        .map(|definition| build_node(definition, depth))
        .collect()
}

fn build_node(definition: TopicDefinition, depth: usize) -> Result<TopicNode, CoreError> {
    let title = definition.title.trim().to_string();
    if title.is_empty() {
        return Err(CoreError::InvalidTaxonomy(format!(
            "topic without title at level {depth}"
        )));
    }
    if depth > MAX_TOPIC_DEPTH {
        return Err(CoreError::InvalidTaxonomy(format!(
            "topic {title} is nested deeper than {MAX_TOPIC_DEPTH} levels"
        )));
    }
    let slug = match definition.slug.as_deref() {
        Some(raw) => Slug::try_from(raw)?,
        None => Slug::from_title(&title)?,
    };
    let child_topics = build_nodes(definition.child_topics, depth + 1)?;
    Ok(TopicNode {
        title,
        slug,
        child_topics,
    })
}

fn find_in<'a>(
    nodes: &'a [TopicNode],
    parent: Option<&'a TopicNode>,
    slug: &str,
) -> Option<TopicMatch<'a>> {
    nodes.iter().find_map(|node| {
        if node.slug.as_str() == slug {
            return Some(TopicMatch { node, parent });
        }
        find_in(&node.child_topics, Some(node), slug)
    })
}

/// Flat slug to level map used to validate topic filters without walking the tree.
#[derive(Debug, Clone, Default)]
pub struct TopicVocabulary {
    levels: HashMap<Slug, TopicLevel>,
}

impl TopicVocabulary {
    pub fn from_taxonomy(taxonomy: &Taxonomy) -> Self {
        let mut levels = HashMap::new();
        collect_levels(&taxonomy.topics, 1, &mut levels);
        Self { levels }
    }

    pub fn level(&self, slug: &str) -> Option<TopicLevel> {
        self.levels.get(slug).copied()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl FromIterator<(Slug, TopicLevel)> for TopicVocabulary {
    fn from_iter<I: IntoIterator<Item = (Slug, TopicLevel)>>(iter: I) -> Self {
        Self {
            levels: iter.into_iter().collect(),
        }
    }
}

fn collect_levels(nodes: &[TopicNode], depth: usize, levels: &mut HashMap<Slug, TopicLevel>) {
    let Some(level) = TopicLevel::from_depth(depth) else {
        return;
    };
    for node in nodes {
        // Keep the first level seen so the map agrees with `find_node`.
        levels.entry(node.slug.clone()).or_insert(level);
        collect_levels(&node.child_topics, depth + 1, levels);
    }
}
