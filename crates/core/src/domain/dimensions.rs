use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// Static list of dataset dimensions served by `/dimensions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionsDoc {
    #[serde(rename = "items")]
    pub dimensions: Vec<Dimension>,
    #[serde(default)]
    pub total_count: usize,
}

impl DimensionsDoc {
    pub fn new(dimensions: Vec<Dimension>) -> Self {
        let total_count = dimensions.len();
        Self {
            dimensions,
            total_count,
        }
    }
}
