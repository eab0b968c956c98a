//! Turns a redeemed share link into the content of the public page.

use std::sync::Arc;

use serde::Serialize;
use tracing::error;

use qrfolio_core::result::AppResult;
use qrfolio_database::repositories::{QrCodeRepository, SettingsRepository, UserRepository};
use qrfolio_entity::qr_code::QrCode;
use qrfolio_entity::settings::PageAppearance;
use qrfolio_entity::share::ShareLink;

use crate::context::Requester;
use crate::share::{LinkValidation, RejectReason, ShareLinkManager};

/// Fallback owner name when the account cannot be loaded.
const UNKNOWN_OWNER: &str = "User";
/// Fallback page description.
const DEFAULT_DESCRIPTION: &str = "Choose your preferred payment method";

/// Everything needed to render an accepted share page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPage {
    /// Heading.
    pub title: String,
    /// Subheading.
    pub description: String,
    /// Owner's appearance settings.
    pub appearance: PageAppearance,
    /// Active codes in display order.
    pub codes: Vec<QrCode>,
}

impl PublicPage {
    /// Apply title and description fallbacks and keep only active codes.
    pub fn assemble(owner_name: Option<&str>, appearance: PageAppearance, codes: Vec<QrCode>) -> Self {
        let title = appearance
            .page_title
            .clone()
            .unwrap_or_else(|| format!("{}'s Payment Methods", owner_name.unwrap_or(UNKNOWN_OWNER)));
        let description = appearance
            .page_description
            .clone()
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

        let mut codes: Vec<QrCode> = codes.into_iter().filter(|c| c.is_active).collect();
        codes.sort_by_key(|c| (c.display_order, c.created_at));

        Self {
            title,
            description,
            appearance,
            codes,
        }
    }

    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Result of opening `/share/{token}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SharePage {
    /// The link was refused.
    Rejected(RejectReason),
    /// The link was accepted.
    Page(PublicPage),
}

/// Validates share tokens and loads the owner's public content.
#[derive(Debug, Clone)]
pub struct PublicPageService {
    links: Arc<ShareLinkManager>,
    qr_codes: Arc<QrCodeRepository>,
    settings: Arc<SettingsRepository>,
    users: Arc<UserRepository>,
}

impl PublicPageService {
    /// Creates a new public page service.
    pub fn new(
        links: Arc<ShareLinkManager>,
        qr_codes: Arc<QrCodeRepository>,
        settings: Arc<SettingsRepository>,
        users: Arc<UserRepository>,
    ) -> Self {
        Self {
            links,
            qr_codes,
            settings,
            users,
        }
    }

    /// Redeem `token` and, on success, assemble the page.
    pub async fn open(&self, token: &str, requester: &Requester) -> SharePage {
        let link = match self.links.validate(token, requester).await {
            LinkValidation::Valid(link) => link,
            LinkValidation::Rejected(reason) => return SharePage::Rejected(reason),
        };

        match self.load(&link).await {
            Ok(page) => SharePage::Page(page),
            Err(e) => {
                error!(link_id = %link.id, error = %e, "Failed to load share page content");
                SharePage::Rejected(RejectReason::ValidationError)
            }
        }
    }

    async fn load(&self, link: &ShareLink) -> AppResult<PublicPage> {
        let codes = self.qr_codes.find_active_by_owner(link.user_id).await?;
        let settings = self.settings.ensure(link.user_id).await?;
        let owner = self.users.find_by_id(link.user_id).await?;

        Ok(PublicPage::assemble(
            owner.as_ref().map(|u| u.name.as_str()),
            PageAppearance::from(settings),
            codes,
        ))
    }
}
