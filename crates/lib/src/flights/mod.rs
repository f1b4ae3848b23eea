//! Flight data providers: search and status lookups for the responder.
//!
//! Providers are behind a trait so the backing store can be an API, a
//! database, or the bundled in-memory catalog.

mod catalog;

pub use catalog::FlightCatalog;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A flight offer returned by a search provider. The responder only formats it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub airline: String,
    pub flight_number: String,
    pub departure: String,
    pub price: String,
}

/// Backing store for flight lookups.
#[async_trait]
pub trait FlightProvider: Send + Sync {
    /// Flights from origin to destination. Empty when the route is unknown.
    async fn search_flights(&self, origin: &str, destination: &str) -> Vec<Flight>;

    /// Ready-to-send status text for a flight number. The provider owns all
    /// formatting, including the not-found wording.
    async fn flight_status(&self, flight_number: &str) -> String;
}
