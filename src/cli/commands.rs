//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Watson SDK command-line client
#[derive(Parser, Debug)]
#[command(name = "watson-sdk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Service configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Service instance URL (overrides the config file)
    #[arg(long, global = true, env = "ASSISTANT_URL")]
    pub service_url: Option<String>,

    /// IAM API key (overrides the config file)
    #[arg(long, global = true, env = "ASSISTANT_APIKEY", hide_env_values = true)]
    pub apikey: Option<String>,

    /// API version date, e.g. 2019-02-28
    #[arg(long, global = true)]
    pub version_date: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage workspace entities
    Entities {
        #[command(subcommand)]
        action: EntityCommand,
    },
}

/// Entity subcommands
#[derive(Subcommand, Debug)]
pub enum EntityCommand {
    /// List entities, one page or all of them
    List {
        /// Workspace ID
        #[arg(short, long)]
        workspace: String,

        /// Records per page
        #[arg(long)]
        page_limit: Option<u64>,

        /// Sort attribute (prefix with '-' for descending)
        #[arg(long)]
        sort: Option<String>,

        /// Include entity values
        #[arg(long)]
        export: bool,

        /// Follow the cursor through every page
        #[arg(long)]
        all: bool,
    },

    /// Show one entity
    Get {
        #[arg(short, long)]
        workspace: String,

        #[arg(short, long)]
        entity: String,

        /// Include entity values
        #[arg(long)]
        export: bool,
    },

    /// Create an entity
    Create {
        #[arg(short, long)]
        workspace: String,

        #[arg(short, long)]
        entity: String,

        #[arg(long)]
        description: Option<String>,

        /// Enable fuzzy matching
        #[arg(long)]
        fuzzy_match: bool,

        /// Entity value (repeatable)
        #[arg(long = "value")]
        values: Vec<String>,
    },

    /// Update an entity
    Update {
        #[arg(short, long)]
        workspace: String,

        #[arg(short, long)]
        entity: String,

        /// New entity name
        #[arg(long)]
        new_entity: Option<String>,

        #[arg(long)]
        new_description: Option<String>,

        /// New value (repeatable)
        #[arg(long = "new-value")]
        new_values: Vec<String>,

        /// Append new values instead of replacing existing ones
        #[arg(long)]
        append: bool,
    },

    /// Delete an entity
    Delete {
        #[arg(short, long)]
        workspace: String,

        #[arg(short, long)]
        entity: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_all() {
        let cli = Cli::try_parse_from([
            "watson-sdk",
            "--service-url",
            "https://api.example.com",
            "entities",
            "list",
            "--workspace",
            "ws",
            "--page-limit",
            "5",
            "--all",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Entities {
                action:
                    EntityCommand::List {
                        workspace,
                        page_limit,
                        all,
                        export,
                        ..
                    },
            } => {
                assert_eq!(workspace, "ws");
                assert_eq!(page_limit, Some(5));
                assert!(all);
                assert!(!export);
            }
            other => panic!("Expected entities list, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_create_with_values() {
        let cli = Cli::try_parse_from([
            "watson-sdk",
            "entities",
            "create",
            "-w",
            "ws",
            "-e",
            "beverage",
            "--value",
            "coffee",
            "--value",
            "tea",
            "--fuzzy-match",
            "--format",
            "pretty",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Pretty);
        match cli.command {
            Commands::Entities {
                action:
                    EntityCommand::Create {
                        entity,
                        values,
                        fuzzy_match,
                        ..
                    },
            } => {
                assert_eq!(entity, "beverage");
                assert_eq!(values, vec!["coffee", "tea"]);
                assert!(fuzzy_match);
            }
            other => panic!("Expected entities create, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_requires_workspace() {
        let result = Cli::try_parse_from(["watson-sdk", "entities", "get", "--entity", "x"]);
        assert!(result.is_err());
    }
}
