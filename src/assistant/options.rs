//! Request option records for the entity operations
//!
//! Each record is plain data: required fields are set by `new`, optional
//! fields are public and default to `None`. Operations call `validate()`
//! before any request is sent.

use super::models::CreateValue;
use crate::error::{Error, Result};
use crate::pagination::PageQuery;
use crate::types::JsonObject;

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::missing_argument(field));
    }
    Ok(())
}

// ============================================================================
// Create
// ============================================================================

/// Options for `create_entity`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateEntityOptions {
    pub workspace_id: String,
    pub entity: String,
    pub description: Option<String>,
    pub metadata: Option<JsonObject>,
    pub fuzzy_match: Option<bool>,
    pub values: Option<Vec<CreateValue>>,
    pub include_audit: Option<bool>,
}

impl CreateEntityOptions {
    pub fn new(workspace_id: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            entity: entity.into(),
            ..Default::default()
        }
    }

    /// Append a value, creating the list if needed
    pub fn add_value(&mut self, value: CreateValue) {
        self.values.get_or_insert_with(Vec::new).push(value);
    }

    pub fn validate(&self) -> Result<()> {
        require("workspace_id", &self.workspace_id)?;
        require("entity", &self.entity)
    }
}

// ============================================================================
// Get
// ============================================================================

/// Options for `get_entity`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetEntityOptions {
    pub workspace_id: String,
    pub entity: String,
    /// Include the entity's values in the response
    pub export: Option<bool>,
    /// Include `created` and `updated` timestamps
    pub include_audit: Option<bool>,
}

impl GetEntityOptions {
    pub fn new(workspace_id: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            entity: entity.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("workspace_id", &self.workspace_id)?;
        require("entity", &self.entity)
    }
}

// ============================================================================
// Update
// ============================================================================

/// Options for `update_entity`
///
/// Only the `new_*` fields that are set are sent. With `append` unset or
/// false, `new_values` replaces the existing values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateEntityOptions {
    pub workspace_id: String,
    pub entity: String,
    pub new_entity: Option<String>,
    pub new_description: Option<String>,
    pub new_metadata: Option<JsonObject>,
    pub new_fuzzy_match: Option<bool>,
    pub new_values: Option<Vec<CreateValue>>,
    pub append: Option<bool>,
    pub include_audit: Option<bool>,
}

impl UpdateEntityOptions {
    pub fn new(workspace_id: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            entity: entity.into(),
            ..Default::default()
        }
    }

    /// Append a value to `new_values`, creating the list if needed
    pub fn add_value(&mut self, value: CreateValue) {
        self.new_values.get_or_insert_with(Vec::new).push(value);
    }

    pub fn validate(&self) -> Result<()> {
        require("workspace_id", &self.workspace_id)?;
        require("entity", &self.entity)
    }
}

// ============================================================================
// Delete
// ============================================================================

/// Options for `delete_entity`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteEntityOptions {
    pub workspace_id: String,
    pub entity: String,
}

impl DeleteEntityOptions {
    pub fn new(workspace_id: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            entity: entity.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("workspace_id", &self.workspace_id)?;
        require("entity", &self.entity)
    }
}

// ============================================================================
// List
// ============================================================================

/// Options for `list_entities`, also the base query of an entity traversal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEntitiesOptions {
    pub workspace_id: String,
    /// Include each entity's values
    pub export: Option<bool>,
    /// Number of records per page
    pub page_limit: Option<u64>,
    /// Include `pagination.matched` in the response
    pub include_count: Option<bool>,
    /// Attribute to sort by; prefix with `-` for descending order
    pub sort: Option<String>,
    /// Cursor of the page to fetch
    pub cursor: Option<String>,
    pub include_audit: Option<bool>,
}

impl ListEntitiesOptions {
    pub fn new(workspace_id: impl Into<String>) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("workspace_id", &self.workspace_id)
    }
}

impl PageQuery for ListEntitiesOptions {
    fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    fn with_cursor(&self, cursor: Option<String>) -> Self {
        Self {
            cursor,
            ..self.clone()
        }
    }

    fn page_limit(&self) -> Option<u64> {
        self.page_limit
    }
}
