//! Assistant v1 entity models

use crate::pagination::{Page, Pagination};
use crate::types::JsonObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Entity
// ============================================================================

/// An entity defined in a workspace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity name
    pub entity: String,

    /// Description of the entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Arbitrary metadata attached to the entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonObject>,

    /// Whether fuzzy matching is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuzzy_match: Option<bool>,

    /// Creation timestamp (only with `include_audit`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Last modification timestamp (only with `include_audit`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,

    /// Entity values (only with `export`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<EntityValue>>,
}

impl Entity {
    /// Whether fuzzy matching is enabled, treating an absent flag as off
    pub fn is_fuzzy_match(&self) -> bool {
        self.fuzzy_match.unwrap_or(false)
    }

    /// Values of this entity, empty when the server did not export them
    pub fn values(&self) -> &[EntityValue] {
        self.values.as_deref().unwrap_or_default()
    }
}

// ============================================================================
// Values
// ============================================================================

/// How an entity value is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Matched against a list of synonyms
    #[default]
    Synonyms,
    /// Matched against regular expression patterns
    Patterns,
}

/// A value of an entity as returned by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityValue {
    /// The text of the value
    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonObject>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patterns: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

/// A value to create along with an entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateValue {
    /// The text of the value
    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonObject>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patterns: Option<Vec<String>>,
}

impl CreateValue {
    /// A plain value with no synonyms or patterns
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    /// A synonyms value
    pub fn with_synonyms<I, S>(value: impl Into<String>, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value: value.into(),
            value_type: Some(ValueType::Synonyms),
            synonyms: Some(synonyms.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }
}

// ============================================================================
// Collection
// ============================================================================

/// One page of the entity listing as sent on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityCollection {
    /// Entities on this page
    pub entities: Vec<Entity>,

    /// Pagination metadata
    pub pagination: Pagination,
}

impl From<EntityCollection> for Page<Entity> {
    fn from(collection: EntityCollection) -> Self {
        Page::new(collection.entities, collection.pagination)
    }
}
