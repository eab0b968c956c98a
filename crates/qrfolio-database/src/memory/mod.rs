//! In-process store backends.

pub mod share;

pub use share::MemoryShareLinkStore;
