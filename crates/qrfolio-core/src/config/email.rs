//! Outbound email configuration.

use serde::{Deserialize, Serialize};

/// Email provider configuration.
///
/// When `resend_api_key` is absent, mail is logged instead of sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Resend API key.
    #[serde(default)]
    pub resend_api_key: Option<String>,
    /// Resend API endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Sender address.
    #[serde(default = "default_from")]
    pub from: String,
    /// Address notified about new access requests.
    #[serde(default)]
    pub admin_address: Option<String>,
    /// Public application URL used in email links.
    #[serde(default = "default_app_url")]
    pub app_url: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: None,
            endpoint: default_endpoint(),
            from: default_from(),
            admin_address: None,
            app_url: default_app_url(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.resend.com/emails".to_string()
}

fn default_from() -> String {
    "onboarding@resend.dev".to_string()
}

fn default_app_url() -> String {
    "http://localhost:3000".to_string()
}
