//! Per-user public page settings.

pub mod model;
pub mod style;

pub use model::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR, PageAppearance,
    UpdateSettings, UserSettings,
};
pub use style::DisplayStyle;
