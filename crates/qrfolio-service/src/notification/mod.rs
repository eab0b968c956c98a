//! Outbound email: delivery backends, templates and the invite notifier.

pub mod mailer;
pub mod service;
pub mod templates;

pub use mailer::{LogMailer, ResendMailer};
pub use service::NotificationService;
