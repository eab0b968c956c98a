//! Invite-only registration: phrases and access requests.

pub mod access_request;
pub mod phrase;

pub use access_request::{AccessRequest, AccessRequestStatus, CreateAccessRequest};
pub use phrase::{CreatePhrase, PhraseRejection, RegistrationPhrase};
