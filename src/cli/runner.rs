//! CLI runner - executes commands

use std::fs;

use crate::cli::commands::{Cli, Commands, ConnectorKind};
use crate::connector::Connector;
use crate::error::{Error, Result};
use crate::github::GithubConnector;
use crate::model::Context;
use crate::slack::SlackConnector;
use crate::types::JsonValue;

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
        let connector = self.connector();

        match &self.cli.command {
            Commands::Spec => {
                print_json(&connector.spec())?;
                Ok(())
            }
            Commands::Check => {
                let config = self.load_config()?;
                let result = connector.check(&config).await?;
                print_json(&result)?;
                if result.success {
                    Ok(())
                } else {
                    Err(Error::Other(
                        result
                            .message
                            .unwrap_or_else(|| "connection check failed".to_string()),
                    ))
                }
            }
            Commands::Fetch { date } => {
                let config = self.load_config()?;
                let activities = connector.fetch_activities(&config, date).await?;
                print_json(&activities)?;
                Ok(())
            }
            Commands::Enrich {
                context_json,
                context,
            } => {
                let config = self.load_config()?;
                let raw = match (context_json, context) {
                    (Some(inline), _) => inline.clone(),
                    (None, Some(path)) => fs::read_to_string(path)
                        .map_err(|e| Error::config(format!("cannot read context file: {e}")))?,
                    (None, None) => {
                        return Err(Error::config(
                            "Context not specified (use --context-json or --context)",
                        ))
                    }
                };
                let parsed: Context = serde_json::from_str(&raw)?;
                let enriched = connector.enrich_context(parsed, &config).await?;
                print_json(&enriched)?;
                Ok(())
            }
        }
    }

    fn connector(&self) -> Box<dyn Connector> {
        match self.cli.connector {
            ConnectorKind::Github => Box::new(GithubConnector::new()),
            ConnectorKind::Slack => Box::new(SlackConnector::new()),
        }
    }

    /// Load config from --config-json or --config
    fn load_config(&self) -> Result<JsonValue> {
        if let Some(inline) = &self.cli.config_json {
            return Ok(serde_json::from_str(inline)?);
        }
        if let Some(path) = &self.cli.config {
            let content = fs::read_to_string(path)
                .map_err(|e| Error::config(format!("cannot read config file: {e}")))?;
            return Ok(serde_json::from_str(&content)?);
        }
        Err(Error::config(
            "Config not specified (use --config-json or --config)",
        ))
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
