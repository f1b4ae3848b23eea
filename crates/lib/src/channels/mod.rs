//! Communication channels (Wati / WhatsApp).
//!
//! The outbound sender trait is the seam between the responder and the
//! transport; Wati is the only connector. Inbound events carry one authorized
//! message to classify and answer.

mod inbound;
mod outbound;
mod wati;

pub use inbound::InboundEvent;
pub use outbound::MessageSender;
pub use wati::{WatiChannel, WatiError, WatiWebhookEvent};
