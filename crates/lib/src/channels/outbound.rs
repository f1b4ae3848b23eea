//! Outbound delivery seam between the responder and a channel connector.

use async_trait::async_trait;

/// Sends a text message to a recipient on the messaging platform.
/// Fire-and-forget from the responder's perspective.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Send a text message to a recipient (e.g. a WhatsApp wa_id).
    async fn send_message(&self, recipient_id: &str, text: &str) -> Result<(), String>;
}
