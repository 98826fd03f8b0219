//! # SalonBook Notifications
//!
//! Tells the salon about new bookings over WhatsApp. Delivery goes through
//! the WhatsApp Cloud API when it is configured; otherwise, or when the API
//! call fails, the caller gets a click-to-chat link that the client opens
//! to send the same message by hand.
//!
//! There is no retry and no queue. A failed API call is logged once and the
//! link fallback is returned.

use eyre::{eyre, Result};
use salonbook_core::models::{booking::Booking, service::Service, user::User};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

pub mod config;
pub mod message;

use config::NotifyConfig;

/// How a notification reached (or will reach) the salon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum NotificationOutcome {
    /// Delivered by the Cloud API.
    Api,
    /// Must be sent by the client through this prefilled link.
    Link { url: String },
}

#[derive(Debug, Serialize)]
struct CloudTextMessage<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    text: CloudText<'a>,
}

#[derive(Debug, Serialize)]
struct CloudText<'a> {
    body: &'a str,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    config: NotifyConfig,
    client: reqwest::Client,
}

impl Notifier {
    pub fn new(config: NotifyConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Notify the salon that `client` booked `service`.
    pub async fn send_booking_notification(
        &self,
        booking: &Booking,
        client: &User,
        service: &Service,
    ) -> NotificationOutcome {
        let text = message::compose_booking_message(booking, client, service);

        if self.config.cloud_api_enabled() {
            match self.send_via_cloud_api(&text).await {
                Ok(()) => {
                    info!("Booking {} notified through the Cloud API", booking.id);
                    return NotificationOutcome::Api;
                }
                Err(e) => error!("Error sending WhatsApp notification: {:?}", e),
            }
        } else {
            debug!("WhatsApp Cloud API not configured, returning click-to-chat link");
        }

        NotificationOutcome::Link {
            url: message::click_to_chat_link(&self.config.recipient, &text),
        }
    }

    async fn send_via_cloud_api(&self, text: &str) -> Result<()> {
        let token = self
            .config
            .whatsapp_token
            .as_deref()
            .ok_or_else(|| eyre!("WHATSAPP_TOKEN not set"))?;
        let phone_id = self
            .config
            .phone_id
            .as_deref()
            .ok_or_else(|| eyre!("WHATSAPP_PHONE_ID not set"))?;

        let payload = CloudTextMessage {
            messaging_product: "whatsapp",
            to: &self.config.recipient,
            kind: "text",
            text: CloudText { body: text },
        };

        let response = self
            .client
            .post(format!("{}/{}/messages", self.config.api_base, phone_id))
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(eyre!("Cloud API returned {}: {}", status, error_text));
        }

        Ok(())
    }
}
