//! Watson Assistant v1
//!
//! Entity CRUD plus a cursor traversal over the entity listing:
//!
//! ```no_run
//! # async fn demo() -> watson_sdk::Result<()> {
//! use futures::TryStreamExt;
//! use watson_sdk::assistant::{Assistant, ListEntitiesOptions};
//! use watson_sdk::auth::AuthConfig;
//!
//! let assistant = Assistant::new(
//!     "https://api.us-south.assistant.watson.cloud.ibm.com",
//!     AuthConfig::iam("my-apikey"),
//! )?;
//!
//! let mut options = ListEntitiesOptions::new("my-workspace");
//! options.page_limit = Some(50);
//!
//! let traverser = assistant.entities(options);
//! let mut entities = traverser.all();
//! while let Some(entity) = entities.try_next().await? {
//!     println!("{}", entity.entity);
//! }
//! # Ok(())
//! # }
//! ```

mod models;
mod options;
mod service;

pub use models::{CreateValue, Entity, EntityCollection, EntityValue, ValueType};
pub use options::{
    CreateEntityOptions, DeleteEntityOptions, GetEntityOptions, ListEntitiesOptions,
    UpdateEntityOptions,
};
pub use service::{Assistant, DEFAULT_VERSION};
