//! Share link lifecycle: issue, validate (redeem), revoke.

pub mod link;
pub mod manager;

pub use link::TokenGenerator;
pub use manager::{IssueRequest, LinkValidation, RejectReason, ShareLinkManager, SharedLink};
