//! CLI commands and argument parsing

use clap::{Parser, Subcommand};

/// stratus - multi-cloud REST client toolkit
#[derive(Parser, Debug)]
#[command(name = "stratus")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Provider profile: a built-in name or a YAML file path
    #[arg(short, long, global = true)]
    pub provider: Option<String>,

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
    /// List built-in provider profiles
    Providers,

    /// List resources a profile exposes
    Resources,

    /// Validate a profile definition
    Validate,

    /// List a resource
    List {
        /// Resource name (e.g., droplets, instances)
        resource: String,

        /// Extra parameters as key=value (list values comma-joined)
        #[arg(long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Fetch only the first page instead of concatenating all pages
        #[arg(long)]
        first_page: bool,
    },

    /// Fetch a single resource by id
    Get {
        /// Resource name
        resource: String,
        /// Resource id
        id: String,
    },

    /// Delete a resource by id
    Delete {
        /// Resource name
        resource: String,
        /// Resource id
        id: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Human-readable output
    Pretty,
}
