//! Inbound event from the messaging channel: delivered to the responder for classification.

/// A message that passed the webhook's authorization gate.
/// Read once by the responder and consumed into exactly one outbound reply.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    pub sender_id: String,
    pub text: String,
    pub message_type: String,
}
