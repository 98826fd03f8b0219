use serde::Deserialize;
use std::env;

pub const DEFAULT_API_BASE: &str = "https://graph.facebook.com/v17.0";

/// Configuration for booking notifications.
///
/// Cloud API delivery is attempted only when both the token and the phone
/// number id are present. Without them every notification falls back to a
/// click-to-chat link.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    /// WhatsApp Cloud API bearer token
    pub whatsapp_token: Option<String>,
    /// Sender phone number id registered with the Cloud API
    pub phone_id: Option<String>,
    /// Salon number, international format without `+`; empty lets the client pick a contact
    pub recipient: String,
    /// Base URL of the Graph API, overridable for tests
    pub api_base: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            whatsapp_token: None,
            phone_id: None,
            recipient: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl NotifyConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let non_empty = |key: &str| env::var(key).ok().filter(|value| !value.trim().is_empty());

        Self {
            whatsapp_token: non_empty("WHATSAPP_TOKEN"),
            phone_id: non_empty("WHATSAPP_PHONE_ID"),
            recipient: non_empty("WHATSAPP_RECIPIENT").unwrap_or_default(),
            api_base: non_empty("WHATSAPP_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        }
    }

    pub fn cloud_api_enabled(&self) -> bool {
        self.whatsapp_token.is_some()
            && self
                .phone_id
                .as_deref()
                .is_some_and(|id| id != "placeholder")
    }
}
