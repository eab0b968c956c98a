//! CLI command definitions and dispatch.

pub mod admin;
pub mod links;
pub mod migrate;
pub mod phrase;
pub mod serve;

use clap::{Parser, Subcommand};

use qrfolio_core::config::AppConfig;
use qrfolio_core::error::AppError;
use qrfolio_database::DatabasePool;

use crate::output::OutputFormat;

/// qrfolio: QR payment portfolio administration
#[derive(Debug, Parser)]
#[command(name = "qrfolio", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file, without extension
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay (`config/{env}.toml`); falls back to QRFOLIO_ENV
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Admin account management
    Admin(admin::AdminArgs),
    /// Registration phrase management
    Phrase(phrase::PhraseArgs),
    /// Share link inspection
    Links(links::LinksArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = self.load_config()?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Admin(args) => admin::execute(args, &config).await,
            Commands::Phrase(args) => phrase::execute(args, &config, self.format).await,
            Commands::Links(args) => links::execute(args, &config, self.format).await,
        }
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        let env = self
            .env
            .clone()
            .or_else(|| std::env::var("QRFOLIO_ENV").ok())
            .unwrap_or_else(|| "development".to_string());
        AppConfig::load_from(&self.config, &env)
    }
}

/// Helper: open the database pool from config
pub async fn connect(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}

/// Helper: read a value from a flag or prompt for it.
pub fn prompt_text(value: &Option<String>, prompt: &str) -> Result<String, AppError> {
    match value {
        Some(v) => Ok(v.clone()),
        None => dialoguer::Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_phrase_generate() {
        let cli = Cli::parse_from(["qrfolio", "phrase", "generate", "--expires-in", "48"]);
        assert_eq!(cli.config, "config/default");
        match cli.command {
            Commands::Phrase(args) => match args.command {
                phrase::PhraseCommand::Generate { expires_in } => assert_eq!(expires_in, Some(48)),
                other => panic!("unexpected {other:?}"),
            },
            other => panic!("unexpected {other:?}"),
        }
    }
}
