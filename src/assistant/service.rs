//! Assistant v1 service client (entity operations)

use super::models::{CreateValue, Entity, EntityCollection};
use super::options::{
    CreateEntityOptions, DeleteEntityOptions, GetEntityOptions, ListEntitiesOptions,
    UpdateEntityOptions,
};
use crate::auth::AuthConfig;
use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig, RetryPolicy};
use crate::pagination::{retrying, Page, PageFetcher, PagedListTraverser, Retrying};
use crate::types::JsonObject;
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;
use url::Url;

/// API version date sent with every request unless overridden
pub const DEFAULT_VERSION: &str = "2019-02-28";

/// Request body shared by create and update
#[derive(Debug, Serialize)]
struct EntityBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    entity: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a JsonObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fuzzy_match: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    values: Option<&'a [CreateValue]>,
}

/// Watson Assistant v1 client
pub struct Assistant {
    client: HttpClient,
    service_url: Url,
    version: String,
}

impl Assistant {
    /// Create a client for `service_url` with default HTTP settings
    pub fn new(service_url: &str, auth: AuthConfig) -> Result<Self> {
        let client = HttpClient::with_auth(HttpClientConfig::default(), auth)?;
        Self::with_client(client, service_url)
    }

    /// Create a client on top of an already configured `HttpClient`
    pub fn with_client(client: HttpClient, service_url: &str) -> Result<Self> {
        let service_url = Url::parse(service_url)?;
        if service_url.cannot_be_a_base() {
            return Err(Error::invalid_value(
                "service_url",
                format!("'{service_url}' cannot carry a path"),
            ));
        }

        Ok(Self {
            client,
            service_url,
            version: DEFAULT_VERSION.to_string(),
        })
    }

    /// Create a client from a loaded `ServiceConfig`
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let client = config.build_client()?;
        Ok(Self::with_client(client, &config.service_url)?.with_version(&config.version))
    }

    /// Override the API version date
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn service_url(&self) -> &Url {
        &self.service_url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    // ========================================================================
    // Entity operations
    // ========================================================================

    /// Create an entity
    pub async fn create_entity(&self, options: &CreateEntityOptions) -> Result<Entity> {
        options.validate()?;
        debug!(
            "Creating entity '{}' in workspace {}",
            options.entity, options.workspace_id
        );

        let body = EntityBody {
            entity: Some(&options.entity),
            description: options.description.as_deref(),
            metadata: options.metadata.as_ref(),
            fuzzy_match: options.fuzzy_match,
            values: options.values.as_deref(),
        };
        let config = self
            .request_config()
            .query_opt("include_audit", options.include_audit)
            .json(serde_json::to_value(&body)?);

        let url = self.entities_url(&options.workspace_id, None)?;
        self.client.post_json(url.as_str(), config).await
    }

    /// Get an entity
    pub async fn get_entity(&self, options: &GetEntityOptions) -> Result<Entity> {
        options.validate()?;
        debug!(
            "Getting entity '{}' in workspace {}",
            options.entity, options.workspace_id
        );

        let config = self
            .request_config()
            .query_opt("export", options.export)
            .query_opt("include_audit", options.include_audit);

        let url = self.entities_url(&options.workspace_id, Some(&options.entity))?;
        self.client.get_json(url.as_str(), config).await
    }

    /// Update an entity
    ///
    /// Watson updates with POST on the entity's own path.
    pub async fn update_entity(&self, options: &UpdateEntityOptions) -> Result<Entity> {
        options.validate()?;
        debug!(
            "Updating entity '{}' in workspace {}",
            options.entity, options.workspace_id
        );

        let body = EntityBody {
            entity: options.new_entity.as_deref(),
            description: options.new_description.as_deref(),
            metadata: options.new_metadata.as_ref(),
            fuzzy_match: options.new_fuzzy_match,
            values: options.new_values.as_deref(),
        };
        let config = self
            .request_config()
            .query_opt("append", options.append)
            .query_opt("include_audit", options.include_audit)
            .json(serde_json::to_value(&body)?);

        let url = self.entities_url(&options.workspace_id, Some(&options.entity))?;
        self.client.post_json(url.as_str(), config).await
    }

    /// Delete an entity
    pub async fn delete_entity(&self, options: &DeleteEntityOptions) -> Result<()> {
        options.validate()?;
        debug!(
            "Deleting entity '{}' in workspace {}",
            options.entity, options.workspace_id
        );

        let url = self.entities_url(&options.workspace_id, Some(&options.entity))?;
        self.client.delete(url.as_str(), self.request_config()).await
    }

    /// List one page of entities
    pub async fn list_entities(&self, options: &ListEntitiesOptions) -> Result<EntityCollection> {
        options.validate()?;

        let config = self
            .request_config()
            .query_opt("export", options.export)
            .query_opt("page_limit", options.page_limit)
            .query_opt("include_count", options.include_count)
            .query_opt("sort", options.sort.as_deref())
            .query_opt("cursor", options.cursor.as_deref())
            .query_opt("include_audit", options.include_audit);

        let url = self.entities_url(&options.workspace_id, None)?;
        self.client.get_json(url.as_str(), config).await
    }

    /// Traverse every entity matching `options`, page by page
    pub fn entities(
        &self,
        options: ListEntitiesOptions,
    ) -> PagedListTraverser<Entity, ListEntitiesOptions, &Self> {
        PagedListTraverser::new(self, options)
    }

    /// Like `entities`, with each page request retried under `policy`
    pub fn entities_with_retry(
        &self,
        options: ListEntitiesOptions,
        policy: RetryPolicy,
    ) -> PagedListTraverser<Entity, ListEntitiesOptions, Retrying<&Self>> {
        PagedListTraverser::new(retrying(self, policy), options)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn request_config(&self) -> RequestConfig {
        RequestConfig::new().query("version", &self.version)
    }

    /// `{service_url}/v1/workspaces/{workspace_id}/entities[/{entity}]`
    fn entities_url(&self, workspace_id: &str, entity: Option<&str>) -> Result<Url> {
        let mut url = self.service_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Error::config("service URL cannot carry a path"))?;
            segments
                .pop_if_empty()
                .extend(["v1", "workspaces", workspace_id, "entities"]);
            if let Some(entity) = entity {
                segments.push(entity);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl PageFetcher<Entity, ListEntitiesOptions> for Assistant {
    async fn fetch(&self, query: ListEntitiesOptions) -> Result<Page<Entity>> {
        self.list_entities(&query).await.map(Page::from)
    }
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("service_url", &self.service_url.as_str())
            .field("version", &self.version)
            .field("client", &self.client)
            .finish()
    }
}
