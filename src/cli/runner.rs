//! CLI runner - executes commands

use crate::assistant::{
    Assistant, CreateEntityOptions, CreateValue, DeleteEntityOptions, GetEntityOptions,
    ListEntitiesOptions, UpdateEntityOptions,
};
use crate::cli::commands::{Cli, Commands, EntityCommand, OutputFormat};
use crate::config::{AuthConfigDef, ServiceConfig};
use crate::error::{Error, Result};
use futures::TryStreamExt;
use serde::Serialize;
use serde_json::json;
use std::time::Instant;
use tracing::info;

/// Environment variable prefix used when no config file is given
const ENV_PREFIX: &str = "ASSISTANT";

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.service_config()?;
        let assistant = Assistant::from_config(&config)?;

        match &self.cli.command {
            Commands::Entities { action } => self.entities(&assistant, &config, action).await,
        }
    }

    /// Resolve the service config: file, then environment, then flag overrides
    pub fn service_config(&self) -> Result<ServiceConfig> {
        let mut config = match (&self.cli.config, &self.cli.service_url) {
            (Some(path), _) => ServiceConfig::from_file(path)?,
            (None, Some(url)) => ServiceConfig::new(url.clone()),
            (None, None) => ServiceConfig::from_env(ENV_PREFIX).map_err(|e| {
                Error::config(format!(
                    "No service configured (use --config, --service-url or {ENV_PREFIX}_URL): {e}"
                ))
            })?,
        };

        if let Some(url) = &self.cli.service_url {
            config.service_url.clone_from(url);
        }
        if let Some(apikey) = &self.cli.apikey {
            config.auth = AuthConfigDef::Iam {
                apikey: apikey.clone(),
                url: None,
            };
        }
        if let Some(version) = &self.cli.version_date {
            config.version.clone_from(version);
        }

        config.validate()?;
        Ok(config)
    }

    async fn entities(
        &self,
        assistant: &Assistant,
        config: &ServiceConfig,
        action: &EntityCommand,
    ) -> Result<()> {
        match action {
            EntityCommand::List {
                workspace,
                page_limit,
                sort,
                export,
                all,
            } => {
                let options = ListEntitiesOptions {
                    workspace_id: workspace.clone(),
                    page_limit: *page_limit,
                    sort: sort.clone(),
                    export: export.then_some(true),
                    ..Default::default()
                };
                if *all {
                    self.list_all(assistant, config, options).await
                } else {
                    let page = assistant.list_entities(&options).await?;
                    self.output(&page);
                    Ok(())
                }
            }
            EntityCommand::Get {
                workspace,
                entity,
                export,
            } => {
                let mut options = GetEntityOptions::new(workspace, entity);
                options.export = export.then_some(true);
                options.include_audit = Some(true);
                let entity = assistant.get_entity(&options).await?;
                self.output(&entity);
                Ok(())
            }
            EntityCommand::Create {
                workspace,
                entity,
                description,
                fuzzy_match,
                values,
            } => {
                let mut options = CreateEntityOptions::new(workspace, entity);
                options.description.clone_from(description);
                options.fuzzy_match = fuzzy_match.then_some(true);
                for value in values {
                    options.add_value(CreateValue::new(value));
                }
                let entity = assistant.create_entity(&options).await?;
                self.output(&entity);
                Ok(())
            }
            EntityCommand::Update {
                workspace,
                entity,
                new_entity,
                new_description,
                new_values,
                append,
            } => {
                let mut options = UpdateEntityOptions::new(workspace, entity);
                options.new_entity.clone_from(new_entity);
                options.new_description.clone_from(new_description);
                for value in new_values {
                    options.add_value(CreateValue::new(value));
                }
                options.append = append.then_some(true);
                let entity = assistant.update_entity(&options).await?;
                self.output(&entity);
                Ok(())
            }
            EntityCommand::Delete { workspace, entity } => {
                assistant
                    .delete_entity(&DeleteEntityOptions::new(workspace, entity))
                    .await?;
                self.output(&json!({ "deleted": entity, "workspace_id": workspace }));
                Ok(())
            }
        }
    }

    /// Stream every entity, printing each as it arrives
    async fn list_all(
        &self,
        assistant: &Assistant,
        config: &ServiceConfig,
        options: ListEntitiesOptions,
    ) -> Result<()> {
        let start = Instant::now();
        let traverser = assistant.entities_with_retry(options, config.retry_policy());
        let mut entities = traverser.all();
        let mut count = 0usize;

        while let Some(entity) = entities.try_next().await? {
            self.output(&entity);
            count += 1;
        }

        info!(
            "Listed {} entities in {:.2}s",
            count,
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    fn output<T: Serialize>(&self, value: &T) {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value),
            OutputFormat::Pretty => serde_json::to_string_pretty(value),
        };
        println!("{}", rendered.unwrap_or_default());
    }
}
