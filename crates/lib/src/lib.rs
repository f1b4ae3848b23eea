//! Rumbo core library — config, channels, flight data, intent routing,
//! and the webhook gateway used by the CLI.

pub mod channels;
pub mod config;
pub mod flights;
pub mod gateway;
pub mod init;
pub mod intent;
pub mod responder;
