//! Share link inspection commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use qrfolio_core::config::AppConfig;
use qrfolio_core::error::AppError;
use qrfolio_database::ShareLinkRepository;
use qrfolio_entity::share::ShareLink;

use crate::output::{self, OutputFormat};

/// Arguments for link commands
#[derive(Debug, Args)]
pub struct LinksArgs {
    /// Links subcommand
    #[command(subcommand)]
    pub command: LinksCommand,
}

/// Link subcommands
#[derive(Debug, Subcommand)]
pub enum LinksCommand {
    /// List the most recent links across all owners
    List {
        /// Maximum number of links to show
        #[arg(short, long, default_value = "50")]
        limit: i64,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct LinkRow {
    /// Link ID
    id: String,
    /// Owner
    owner: String,
    /// Token prefix
    token: String,
    /// Type
    link_type: String,
    /// Expires at
    expires_at: String,
    /// Used
    used: bool,
    /// Access count
    accesses: i32,
    /// Created at
    created_at: String,
}

impl From<&ShareLink> for LinkRow {
    fn from(link: &ShareLink) -> Self {
        let prefix: String = link.token.chars().take(8).collect();
        Self {
            id: link.id.to_string(),
            owner: link.user_id.to_string(),
            token: format!("{prefix}..."),
            link_type: link.link_type().to_string(),
            expires_at: output::timestamp(link.expires_at()),
            used: link.is_used(),
            accesses: link.access_count,
            created_at: output::timestamp(Some(link.created_at)),
        }
    }
}

/// Execute link commands
pub async fn execute(
    args: &LinksArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let db = super::connect(config).await?;
    let repo = ShareLinkRepository::new(db.pool().clone());

    let result: Result<(), AppError> = async {
        match &args.command {
            LinksCommand::List { limit } => {
                let total = repo.count_all().await?;
                let links = repo.list_recent((*limit).max(1)).await?;
                let rows: Vec<LinkRow> = links.iter().map(LinkRow::from).collect();
                output::print_list(&rows, format);
                if format == OutputFormat::Table {
                    output::print_kv("Total links", &total.to_string());
                }
            }
        }
        Ok(())
    }
    .await;

    db.close().await;
    result
}
