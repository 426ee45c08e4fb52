//! CLI module
//!
//! Command-line interface for the Assistant entity operations.
//!
//! # Commands
//!
//! - `entities list` - List one page, or every entity with `--all`
//! - `entities get` - Show one entity
//! - `entities create` - Create an entity
//! - `entities update` - Update an entity
//! - `entities delete` - Delete an entity

mod commands;
mod runner;

pub use commands::{Cli, Commands, EntityCommand, OutputFormat};
pub use runner::Runner;
