//! Admin account management commands.

use clap::{Args, Subcommand};
use validator::ValidateEmail;

use qrfolio_auth::{PasswordHasher, PasswordPolicy};
use qrfolio_core::config::AppConfig;
use qrfolio_core::error::AppError;
use qrfolio_database::repositories::UserRepository;
use qrfolio_entity::user::CreateUser;

use crate::output;

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Create an administrator account, bypassing registration phrases
    Create {
        /// Email
        #[arg(short, long)]
        email: Option<String>,
        /// Display name
        #[arg(short, long)]
        name: Option<String>,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
}

/// Execute admin commands
pub async fn execute(args: &AdminArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        AdminCommand::Create {
            email,
            name,
            password,
        } => {
            let email = super::prompt_text(email, "Admin email")?
                .trim()
                .to_lowercase();
            if !email.validate_email() {
                return Err(AppError::validation("Invalid email address"));
            }
            let name = super::prompt_text(name, "Display name")?.trim().to_string();
            if name.chars().count() < 2 {
                return Err(AppError::validation("Name must be at least 2 characters"));
            }

            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Admin password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };
            PasswordPolicy::new(&config.auth).validate(&password)?;
            let password_hash = PasswordHasher::new().hash_password(&password)?;

            let db = super::connect(config).await?;
            let users = UserRepository::new(db.pool().clone());
            if users.find_by_email(&email).await?.is_some() {
                db.close().await;
                return Err(AppError::conflict(format!("User '{email}' already exists")));
            }

            let user = users
                .create(&CreateUser {
                    email,
                    name,
                    password_hash,
                    is_admin: true,
                    registration_phrase_id: None,
                })
                .await?;
            db.close().await;

            output::print_success(&format!("Admin '{}' created", user.email));
            output::print_kv("ID", &user.id.to_string());
        }
    }

    Ok(())
}
