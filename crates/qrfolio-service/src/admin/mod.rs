//! Administration: invite phrases, access request review and the public
//! access request form.

pub mod access_request;
pub mod service;

pub use access_request::{AccessRequestInput, AccessRequestService};
pub use service::{AdminService, AdminStats, ReviewDecision};
