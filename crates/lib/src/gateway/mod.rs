//! Gateway: HTTP webhook ingress for the messaging channel.
//!
//! A single port serves the health probe and the Wati webhook. Inbound events
//! are authorized, classified, and answered before the acknowledgement is
//! returned.

mod server;

pub use server::{app, run_gateway, serve, GatewayState};
