use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

use crate::error::CategoryError;

/// Category identifier: a MongoDB ObjectId, exchanged as 24 hex characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryId(ObjectId);

impl CategoryId {
    /// Fresh identifier, as the store would assign on insert
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for CategoryId {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

impl FromStr for CategoryId {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| CategoryError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl Serialize for CategoryId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for CategoryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Category entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    /// The category ID
    #[schema(value_type = String, example = "64056dc7c2c95ac1303b4b21")]
    pub id: CategoryId,
    /// The category's name
    #[schema(example = "Senjata Api")]
    pub name: String,
    #[schema(example = "Ini adalah senjata api.")]
    pub description: String,
}

impl Category {
    /// Overwrite the fields present in `update`, leaving the rest untouched
    pub fn apply_update(&mut self, update: UpdateCategory) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
    }
}

/// DTO for creating a new category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCategory {
    /// Name of new category
    #[schema(example = "Senjata Tajam")]
    pub name: String,
    /// Description of new category
    #[schema(example = "Ini adalah senjata tajam.")]
    pub description: String,
}

/// DTO for updating a category. Only the listed fields may be sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateCategory {
    /// New name of the category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Senjata Api Berat")]
    pub name: Option<String>,
    /// New description of the category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Ini adalah senjata api berat.")]
    pub description: Option<String>,
}

impl UpdateCategory {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// Query parameters for listing categories
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CategoryFilter {
    /// Case-insensitive substring of the category name; empty matches all
    #[param(example = "Senjata")]
    pub name: Option<String>,
}

impl CategoryFilter {
    /// The filter text, or `None` when it would match everything
    pub fn name_pattern(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Case-insensitive substring match on `name`
    ///
    /// Compares per-character lowercase forms, which agrees with the MongoDB
    /// `$options: "i"` match for letters with a one-to-one case mapping
    /// (ASCII, Latin-1, Greek, Cyrillic). Characters whose lowercase form is
    /// longer than one `char` (e.g. `İ`) are compared as-is.
    pub fn matches(&self, category: &Category) -> bool {
        match self.name_pattern() {
            Some(pattern) => fold(&category.name).contains(&fold(pattern)),
            None => true,
        }
    }
}

fn fold(text: &str) -> String {
    text.chars()
        .map(|c| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => l,
                _ => c,
            }
        })
        .collect()
}

/// Success envelope for the list operation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryListResponse {
    #[schema(example = true)]
    pub success: bool,
    pub data: Vec<Category>,
}

impl CategoryListResponse {
    pub fn ok(data: Vec<Category>) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Envelope carrying a human-readable outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    #[schema(example = "Category [Senjata Tajam] successfully added!")]
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str) -> Category {
        Category {
            id: CategoryId::new(),
            name: name.to_string(),
            description: "desc".to_string(),
        }
    }

    #[test]
    fn test_category_id_parses_hex() {
        let id: CategoryId = "64056dc7c2c95ac1303b4b21".parse().unwrap();
        assert_eq!(id.to_string(), "64056dc7c2c95ac1303b4b21");
    }

    #[test]
    fn test_category_id_rejects_malformed() {
        let err = "not-an-id".parse::<CategoryId>().unwrap_err();
        assert!(matches!(err, CategoryError::InvalidId(raw) if raw == "not-an-id"));
        assert!("64056dc7".parse::<CategoryId>().is_err());
    }

    #[test]
    fn test_category_serializes_id_as_hex_string() {
        let mut c = category("Senjata Api");
        c.id = "64056dc7c2c95ac1303b4b21".parse().unwrap();

        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["id"], "64056dc7c2c95ac1303b4b21");
        assert_eq!(json["name"], "Senjata Api");
    }

    #[test]
    fn test_apply_update_only_touches_present_fields() {
        let mut c = category("Senjata Api");
        c.apply_update(UpdateCategory {
            description: Some("new".to_string()),
            ..Default::default()
        });

        assert_eq!(c.name, "Senjata Api");
        assert_eq!(c.description, "new");
    }

    #[test]
    fn test_update_category_rejects_unknown_fields() {
        let result: Result<UpdateCategory, _> =
            serde_json::from_str(r#"{"name":"x","_id":"64056dc7c2c95ac1303b4b21"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_category_is_empty() {
        assert!(UpdateCategory::default().is_empty());
        let update: UpdateCategory = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert!(!update.is_empty());
    }

    #[test]
    fn test_filter_matches_case_insensitive_substring() {
        let filter = CategoryFilter {
            name: Some("senjata".to_string()),
        };
        assert!(filter.matches(&category("Senjata Api")));
        assert!(filter.matches(&category("Senjata Tajam")));

        let filter = CategoryFilter {
            name: Some("api".to_string()),
        };
        assert!(filter.matches(&category("Senjata Api")));
        assert!(!filter.matches(&category("Senjata Tajam")));
    }

    #[test]
    fn test_filter_folds_non_ascii_letters() {
        let filter = CategoryFilter {
            name: Some("ÜBER".to_string()),
        };
        assert!(filter.matches(&category("Senjata über")));

        let filter = CategoryFilter {
            name: Some("оружие".to_string()),
        };
        assert!(filter.matches(&category("ОРУЖИЕ Api")));

        let filter = CategoryFilter {
            name: Some("i".to_string()),
        };
        assert!(!filter.matches(&category("İstanbul")));
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let empty = CategoryFilter {
            name: Some(String::new()),
        };
        assert_eq!(empty.name_pattern(), None);
        assert!(empty.matches(&category("anything")));
        assert!(CategoryFilter::default().matches(&category("anything")));
    }
}
