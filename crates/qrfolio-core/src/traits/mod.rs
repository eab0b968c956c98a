//! Core traits defined in `qrfolio-core` and implemented by other crates.

pub mod clock;
pub mod mailer;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use mailer::{EmailMessage, Mailer};
pub use storage::{BlobStore, ByteStream};
