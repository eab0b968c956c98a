//! User settings entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::style::DisplayStyle;

/// Default accent color.
pub const DEFAULT_PRIMARY_COLOR: &str = "#3b82f6";
/// Default secondary color.
pub const DEFAULT_SECONDARY_COLOR: &str = "#1e40af";
/// Default page background.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

/// Stored `user_settings` row, one per user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub id: Uuid,
    pub user_id: Uuid,
    pub display_style: DisplayStyle,
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
    pub logo_url: Option<String>,
    pub custom_css: Option<String>,
    pub show_account_details: bool,
    pub page_title: Option<String>,
    pub page_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The appearance of a public page, independent of whether a settings row
/// exists yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAppearance {
    pub display_style: DisplayStyle,
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
    pub logo_url: Option<String>,
    pub custom_css: Option<String>,
    pub show_account_details: bool,
    pub page_title: Option<String>,
    pub page_description: Option<String>,
}

impl Default for PageAppearance {
    fn default() -> Self {
        Self {
            display_style: DisplayStyle::Carousel,
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            secondary_color: DEFAULT_SECONDARY_COLOR.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            logo_url: None,
            custom_css: None,
            show_account_details: true,
            page_title: None,
            page_description: None,
        }
    }
}

impl From<UserSettings> for PageAppearance {
    fn from(s: UserSettings) -> Self {
        Self {
            display_style: s.display_style,
            primary_color: s.primary_color,
            secondary_color: s.secondary_color,
            background_color: s.background_color,
            logo_url: s.logo_url,
            custom_css: s.custom_css,
            show_account_details: s.show_account_details,
            page_title: s.page_title,
            page_description: s.page_description,
        }
    }
}

/// Partial settings update. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettings {
    pub display_style: Option<DisplayStyle>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub background_color: Option<String>,
    pub logo_url: Option<String>,
    pub custom_css: Option<String>,
    pub show_account_details: Option<bool>,
    pub page_title: Option<String>,
    pub page_description: Option<String>,
}

impl UpdateSettings {
    /// Apply this update on top of an existing appearance.
    pub fn apply_to(&self, base: &PageAppearance) -> PageAppearance {
        PageAppearance {
            display_style: self.display_style.unwrap_or(base.display_style),
            primary_color: self
                .primary_color
                .clone()
                .unwrap_or_else(|| base.primary_color.clone()),
            secondary_color: self
                .secondary_color
                .clone()
                .unwrap_or_else(|| base.secondary_color.clone()),
            background_color: self
                .background_color
                .clone()
                .unwrap_or_else(|| base.background_color.clone()),
            logo_url: self.logo_url.clone().or_else(|| base.logo_url.clone()),
            custom_css: self.custom_css.clone().or_else(|| base.custom_css.clone()),
            show_account_details: self
                .show_account_details
                .unwrap_or(base.show_account_details),
            page_title: self.page_title.clone().or_else(|| base.page_title.clone()),
            page_description: self
                .page_description
                .clone()
                .or_else(|| base.page_description.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let a = PageAppearance::default();
        assert_eq!(a.display_style, DisplayStyle::Carousel);
        assert_eq!(a.primary_color, "#3b82f6");
        assert_eq!(a.secondary_color, "#1e40af");
        assert_eq!(a.background_color, "#ffffff");
        assert!(a.show_account_details);
    }

    #[test]
    fn test_apply_partial_update() {
        let update = UpdateSettings {
            display_style: Some(DisplayStyle::Grid),
            page_title: Some("Pay me".to_string()),
            ..Default::default()
        };
        let merged = update.apply_to(&PageAppearance::default());
        assert_eq!(merged.display_style, DisplayStyle::Grid);
        assert_eq!(merged.page_title.as_deref(), Some("Pay me"));
        assert_eq!(merged.primary_color, DEFAULT_PRIMARY_COLOR);
    }
}
