//! Postgres repository implementations.

pub mod access_request;
pub mod phrase;
pub mod qr_code;
pub mod settings;
pub mod share;
pub mod user;

pub use access_request::AccessRequestRepository;
pub use phrase::PhraseRepository;
pub use qr_code::QrCodeRepository;
pub use settings::SettingsRepository;
pub use share::ShareLinkRepository;
pub use user::UserRepository;

use qrfolio_core::error::{AppError, ErrorKind};

/// Map a sqlx error, turning unique violations into `Conflict`.
pub(crate) fn map_write_error(err: sqlx::Error, context: &str, conflict: &str) -> AppError {
    let is_unique = matches!(&err, sqlx::Error::Database(db) if db.is_unique_violation());
    if is_unique {
        AppError::with_source(ErrorKind::Conflict, conflict, err)
    } else {
        AppError::with_source(ErrorKind::Database, context, err)
    }
}
