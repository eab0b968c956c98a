//! Public page layout style.

use std::str::FromStr;

use qrfolio_core::AppError;
use serde::{Deserialize, Serialize};

/// How the public share page lays out QR codes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "display_style", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    /// One code at a time with previous/next navigation.
    #[default]
    Carousel,
    /// All codes in a responsive grid.
    Grid,
    /// All codes stacked in a single column.
    Single,
}

impl DisplayStyle {
    /// Return the stored name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Carousel => "carousel",
            Self::Grid => "grid",
            Self::Single => "single",
        }
    }
}

impl FromStr for DisplayStyle {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "carousel" => Ok(Self::Carousel),
            "grid" => Ok(Self::Grid),
            "single" => Ok(Self::Single),
            other => Err(AppError::validation(format!(
                "Unknown display style '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for DisplayStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("grid".parse::<DisplayStyle>().unwrap(), DisplayStyle::Grid);
        assert!("masonry".parse::<DisplayStyle>().is_err());
        assert_eq!(DisplayStyle::default(), DisplayStyle::Carousel);
    }
}
