use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// URL-safe topic key, e.g. `peoplepopulationandcommunity`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Formats a display title into a slug: lowercase, alphanumerics only.
    /// `"Births, deaths and marriages"` becomes `birthsdeathsandmarriages`.
    pub fn from_title(title: &str) -> Result<Self, CoreError> {
        let formatted: String = title
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|ch| ch.to_ascii_lowercase())
            .collect();
        if formatted.is_empty() {
            return Err(CoreError::InvalidSlug(title.to_string()));
        }
        Ok(Slug(formatted))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Slug {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidSlug("empty slug".to_string()));
        }
        if !trimmed
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_')
        {
            return Err(CoreError::InvalidSlug(trimmed.to_string()));
        }
        Ok(Slug(trimmed.to_string()))
    }
}

impl TryFrom<String> for Slug {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Slug::try_from(value.as_str())
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl Borrow<str> for Slug {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_title_strips_punctuation_and_case() {
        let slug = Slug::from_title("Gross Domestic Product (GDP)").unwrap();
        assert_eq!(slug.as_str(), "grossdomesticproductgdp");
        let slug = Slug::from_title("Health and well-being").unwrap();
        assert_eq!(slug.as_str(), "healthandwellbeing");
    }

    #[test]
    fn from_title_rejects_symbols_only() {
        assert!(Slug::from_title(" ,- ").is_err());
    }

    #[test]
    fn try_from_rejects_uppercase_and_spaces() {
        assert!(Slug::try_from("Economy").is_err());
        assert!(Slug::try_from("people in work").is_err());
        assert!(Slug::try_from("  ").is_err());
        assert_eq!(Slug::try_from(" economy ").unwrap().as_str(), "economy");
    }

    #[test]
    fn deserialize_validates() {
        let slug: Slug = serde_json::from_str(r#""ageing""#).unwrap();
        assert_eq!(slug.to_string(), "ageing");
        assert!(serde_json::from_str::<Slug>(r#""Not A Slug""#).is_err());
    }
}
