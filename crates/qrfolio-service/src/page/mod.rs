//! Public share page assembly.

pub mod service;

pub use service::{PublicPage, PublicPageService, SharePage};
