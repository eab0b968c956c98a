//! # qrfolio-database
//!
//! PostgreSQL connection management, repository implementations for every
//! qrfolio entity, and the [`ShareLinkStore`] abstraction with Postgres and
//! in-memory backends.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryShareLinkStore;
pub use repositories::ShareLinkRepository;
pub use store::ShareLinkStore;
