//! Registration phrase commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use qrfolio_core::config::AppConfig;
use qrfolio_core::error::AppError;
use qrfolio_core::traits::SystemClock;
use qrfolio_database::repositories::{AccessRequestRepository, PhraseRepository, UserRepository};
use qrfolio_entity::invite::RegistrationPhrase;
use qrfolio_service::{AdminService, LogMailer, NotificationService, RequestContext};

use crate::output::{self, OutputFormat};

/// Arguments for phrase commands
#[derive(Debug, Args)]
pub struct PhraseArgs {
    /// Phrase subcommand
    #[command(subcommand)]
    pub command: PhraseCommand,
}

/// Phrase subcommands
#[derive(Debug, Subcommand)]
pub enum PhraseCommand {
    /// Mint a new registration phrase
    Generate {
        /// Lifetime in hours; omit for a phrase that never expires
        #[arg(long)]
        expires_in: Option<i64>,
    },
    /// List every phrase, newest first
    List,
}

#[derive(Debug, Serialize, Tabled)]
struct PhraseRow {
    /// Phrase ID
    id: String,
    /// Phrase
    phrase: String,
    /// Used
    used: bool,
    /// Expires at
    expires_at: String,
    /// Created by
    created_by: String,
}

impl From<&RegistrationPhrase> for PhraseRow {
    fn from(p: &RegistrationPhrase) -> Self {
        Self {
            id: p.id.to_string(),
            phrase: p.phrase.clone(),
            used: p.is_used,
            expires_at: output::timestamp(p.expires_at),
            created_by: p.created_by.clone(),
        }
    }
}

/// Execute phrase commands
pub async fn execute(
    args: &PhraseArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let db = super::connect(config).await?;
    let pool = db.pool().clone();
    let phrases = Arc::new(PhraseRepository::new(pool.clone()));

    let result = match &args.command {
        PhraseCommand::Generate { expires_in } => {
            let admin = AdminService::new(
                Arc::new(UserRepository::new(pool.clone())),
                Arc::clone(&phrases),
                Arc::new(AccessRequestRepository::new(pool)),
                Arc::new(NotificationService::new(Arc::new(LogMailer), &config.email)),
                Arc::new(SystemClock),
                &config.auth,
            );
            let ctx = RequestContext::new(Uuid::nil(), "cli", true);
            admin.generate_phrase(&ctx, *expires_in).await.map(|phrase| {
                output::print_success(&format!("Phrase generated: {}", phrase.phrase));
                output::print_kv("Expires", &output::timestamp(phrase.expires_at));
            })
        }
        PhraseCommand::List => phrases.find_all().await.map(|all| {
            let rows: Vec<PhraseRow> = all.iter().map(PhraseRow::from).collect();
            output::print_list(&rows, format);
        }),
    };

    db.close().await;
    result
}
