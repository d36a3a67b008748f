//! CLI module
//!
//! Command-line interface for exercising provider profiles.
//!
//! # Commands
//!
//! - `providers` - List built-in provider profiles
//! - `resources` - List resources a profile exposes
//! - `validate` - Validate a profile definition
//! - `list` - List a resource (first page or full concatenation)
//! - `get` - Fetch a single resource by id
//! - `delete` - Delete a resource by id

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
