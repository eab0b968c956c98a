//! Share link entities.

pub mod log;
pub mod model;

pub use log::{NewShareLinkLog, ShareLinkLog};
pub use model::{LinkKind, LinkState, LinkType, NewShareLink, ShareLink, ShareLinkRow};
