//! CLI command execution

use super::commands::{Cli, Commands, OutputFormat};
use crate::catalog;
use crate::config::{load_profile, ProviderProfile};
use crate::error::{Error, Result, ResultExt};
use crate::resource::{ListOptions, ProviderClient};
use crate::types::JsonValue;
use tracing::info;

/// Executes parsed CLI commands
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner from parsed arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Providers => self.run_providers(),
            Commands::Resources => self.run_resources(),
            Commands::Validate => self.run_validate(),
            Commands::List {
                resource,
                params,
                first_page,
            } => self.run_list(resource, params, *first_page).await,
            Commands::Get { resource, id } => self.run_get(resource, id).await,
            Commands::Delete { resource, id } => self.run_delete(resource, id).await,
        }
    }

    fn run_providers(&self) -> Result<()> {
        for name in catalog::list_builtin() {
            println!("{name}");
        }
        Ok(())
    }

    fn run_resources(&self) -> Result<()> {
        let profile = self.load_profile()?;
        for resource in &profile.resources {
            match self.cli.format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({
                        "name": resource.name,
                        "path": resource.path,
                    })
                ),
                OutputFormat::Pretty => println!("{}\t{}", resource.name, resource.path),
            }
        }
        Ok(())
    }

    fn run_validate(&self) -> Result<()> {
        let profile = self.load_profile()?;
        info!(provider = %profile.metadata.name, "profile is valid");
        println!(
            "OK: {} ({} resources)",
            profile.metadata.name,
            profile.resources.len()
        );
        Ok(())
    }

    async fn run_list(&self, resource: &str, params: &[String], first_page: bool) -> Result<()> {
        let client = self.build_client()?;
        let mut options = ListOptions::new();
        for raw in params {
            let (key, value) = raw
                .split_once('=')
                .ok_or_else(|| Error::config(format!("expected KEY=VALUE, got '{raw}'")))?;
            options = options.param(key, value);
        }

        let pages = client.list(resource, options).await?;
        let records: Vec<JsonValue> = if first_page {
            pages.first_page().items().to_vec()
        } else {
            pages.collect().await?
        };

        info!(resource, count = records.len(), "listed records");
        for record in &records {
            self.print_record(record);
        }
        Ok(())
    }

    async fn run_get(&self, resource: &str, id: &str) -> Result<()> {
        let client = self.build_client()?;
        match client.get(resource, id).await? {
            Some(record) => {
                self.print_record(&record);
                Ok(())
            }
            None => Err(Error::not_found(format!("{resource} {id}"))),
        }
    }

    async fn run_delete(&self, resource: &str, id: &str) -> Result<()> {
        let client = self.build_client()?;
        client.delete(resource, id).await?;
        println!("deleted {resource} {id}");
        Ok(())
    }

    fn print_record(&self, record: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => println!("{record}"),
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(record).unwrap_or_default());
            }
        }
    }

    fn load_profile(&self) -> Result<ProviderProfile> {
        let reference = self
            .cli
            .provider
            .as_deref()
            .ok_or_else(|| Error::missing_field("--provider"))?;
        if catalog::is_builtin(reference) {
            catalog::load_builtin(reference)
        } else {
            load_profile(reference).with_context(|| format!("loading profile '{reference}'"))
        }
    }

    fn build_client(&self) -> Result<ProviderClient> {
        ProviderClient::new(self.load_profile()?)
    }
}
