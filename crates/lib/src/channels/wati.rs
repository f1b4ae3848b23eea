//! Wati channel: WhatsApp session messages via the Wati REST API.

use crate::channels::outbound::MessageSender;
use async_trait::async_trait;
use serde::Deserialize;

const WATI_API_BASE: &str = "https://live-server.wati.io";

/// Inbound webhook payload from Wati. All fields are optional so the handler
/// can tell a missing wa_id (client error) apart from other shapes; unknown
/// fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatiWebhookEvent {
    /// WhatsApp id of the sending contact.
    pub wa_id: Option<String>,

    /// Message body for text messages.
    #[serde(default)]
    pub text: Option<String>,

    /// Message type ("text", "image", ...).
    #[serde(default, rename = "type")]
    pub message_type: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum WatiError {
    #[error("wati api token not configured")]
    MissingToken,
    #[error("wati request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("wati api error: {0}")]
    Api(String),
}

/// Wati connector: outbound sendSessionMessage calls.
pub struct WatiChannel {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl WatiChannel {
    pub fn new(base_url: Option<String>, token: Option<String>) -> Self {
        let base_url = base_url
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| WATI_API_BASE.to_string());
        Self {
            base_url,
            token,
            client: reqwest::Client::new(),
        }
    }

    /// POST /api/v1/sendSessionMessage/{waId} — deliver a session text message.
    pub async fn send_session_message(&self, wa_id: &str, text: &str) -> Result<(), WatiError> {
        let token = self.token.as_ref().ok_or(WatiError::MissingToken)?;
        let url = format!("{}/api/v1/sendSessionMessage/{}", self.base_url, wa_id);
        let res = self
            .client
            .post(&url)
            .bearer_auth(token)
            .query(&[("messageText", text)])
            .send()
            .await?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(WatiError::Api(format!("{} {}", status, body)));
        }
        Ok(())
    }
}

#[async_trait]
impl MessageSender for WatiChannel {
    async fn send_message(&self, recipient_id: &str, text: &str) -> Result<(), String> {
        self.send_session_message(recipient_id, text)
            .await
            .map_err(|e| e.to_string())
    }
}
