//! Document-level primitives shared by collections (publication state, slugs).

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Publication state of a versioned document (the CMS `_status` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Draft,
    Published,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Published => "published",
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, DocumentStatus::Published)
    }
}

impl core::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ValueObject for DocumentStatus {}

/// URL-safe document slug (lowercase ASCII letters, digits and single dashes).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::validation("slug must not be empty"));
        }
        if value.starts_with('-') || value.ends_with('-') || value.contains("--") {
            return Err(DomainError::validation(format!(
                "slug '{value}' has a leading, trailing or doubled dash"
            )));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(DomainError::validation(format!(
                "slug '{value}' contains characters outside [a-z0-9-]"
            )));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Slug {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Slug {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl ValueObject for Slug {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_as_cms_value() {
        let json = serde_json::to_string(&DocumentStatus::Published).unwrap();
        assert_eq!(json, "\"published\"");
        assert_eq!(DocumentStatus::default(), DocumentStatus::Draft);
        assert!(!DocumentStatus::Draft.is_published());
    }

    #[test]
    fn slug_accepts_kebab_case() {
        let slug = Slug::new("3-bed-house-in-fitzroy").unwrap();
        assert_eq!(slug.as_str(), "3-bed-house-in-fitzroy");
    }

    #[test]
    fn slug_rejects_malformed_values() {
        for bad in ["", "-lead", "trail-", "dou--ble", "Upper", "with space", "a/b"] {
            assert!(
                matches!(Slug::new(bad), Err(DomainError::Validation(_))),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[test]
    fn slug_deserialization_validates() {
        let ok: Slug = serde_json::from_str("\"beach-house\"").unwrap();
        assert_eq!(ok.to_string(), "beach-house");
        assert!(serde_json::from_str::<Slug>("\"Beach House\"").is_err());
    }
}
