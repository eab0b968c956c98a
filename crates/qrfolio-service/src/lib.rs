//! # qrfolio-service
//!
//! Business logic for qrfolio. Each service orchestrates repositories, the
//! blob store, the mailer and the auth primitives to implement one area of
//! the application.
//!
//! Services follow constructor injection: every dependency is handed in as
//! an `Arc` at construction time.

pub mod account;
pub mod admin;
pub mod context;
pub mod notification;
pub mod page;
pub mod qr_code;
pub mod settings;
pub mod share;
mod upload;

pub use account::AccountService;
pub use admin::{AccessRequestService, AdminService};
pub use context::{RequestContext, Requester};
pub use notification::{LogMailer, NotificationService, ResendMailer};
pub use page::PublicPageService;
pub use qr_code::QrCodeService;
pub use settings::SettingsService;
pub use share::{LinkValidation, RejectReason, ShareLinkManager, TokenGenerator};
