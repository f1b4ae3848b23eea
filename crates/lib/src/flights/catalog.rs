//! In-memory flight catalog: routes and statuses keyed by lowercased strings.

use super::{Flight, FlightProvider};
use async_trait::async_trait;
use std::collections::HashMap;

/// Static catalog provider. Ships demo routes so the gateway answers real
/// queries out of the box; embedders and tests can build their own.
pub struct FlightCatalog {
    routes: HashMap<(String, String), Vec<Flight>>,
    statuses: HashMap<String, String>,
}

impl Default for FlightCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn flight(airline: &str, number: &str, departure: &str, price: &str) -> Flight {
    Flight {
        airline: airline.to_string(),
        flight_number: number.to_string(),
        departure: departure.to_string(),
        price: price.to_string(),
    }
}

impl FlightCatalog {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            statuses: HashMap::new(),
        }
    }

    /// Catalog pre-loaded with a handful of demo routes and statuses.
    pub fn with_demo_routes() -> Self {
        let mut catalog = Self::new();
        catalog.add_route(
            "madrid",
            "paris",
            vec![
                flight("Iberia", "IB1234", "08:30", "120€"),
                flight("Air Europa", "UX1027", "15:45", "95€"),
                flight("Vueling", "VY8412", "21:10", "78€"),
            ],
        );
        catalog.add_route(
            "madrid",
            "londres",
            vec![
                flight("Iberia", "IB3170", "07:15", "135€"),
                flight("British Airways", "BA0461", "12:40", "142€"),
            ],
        );
        catalog.add_route(
            "barcelona",
            "roma",
            vec![flight("Vueling", "VY6100", "09:50", "64€")],
        );
        catalog.set_status(
            "IB1234",
            "El vuelo IB1234 sale hoy a las 08:30 desde la T4 (puerta J40). Sin retrasos previstos. ✅",
        );
        catalog.set_status(
            "UX1027",
            "El vuelo UX1027 tiene un retraso estimado de 25 minutos. Nueva salida: 16:10. ⏱",
        );
        catalog.set_status(
            "VY8412",
            "El vuelo VY8412 embarca a las 20:35 por la puerta B22.",
        );
        catalog
    }

    /// Register the flights offered from origin to destination (keys are lowercased).
    pub fn add_route(&mut self, origin: &str, destination: &str, flights: Vec<Flight>) {
        let key = (origin.trim().to_lowercase(), destination.trim().to_lowercase());
        self.routes.insert(key, flights);
    }

    /// Register the status text for a flight number (key is lowercased).
    pub fn set_status(&mut self, flight_number: &str, status: &str) {
        self.statuses
            .insert(flight_number.trim().to_lowercase(), status.to_string());
    }
}

#[async_trait]
impl FlightProvider for FlightCatalog {
    async fn search_flights(&self, origin: &str, destination: &str) -> Vec<Flight> {
        let key = (origin.trim().to_lowercase(), destination.trim().to_lowercase());
        self.routes.get(&key).cloned().unwrap_or_default()
    }

    async fn flight_status(&self, flight_number: &str) -> String {
        let key = flight_number.trim().to_lowercase();
        match self.statuses.get(&key) {
            Some(status) => status.clone(),
            None => format!(
                "No tenemos información del vuelo {}. Revisa el número e inténtalo de nuevo.",
                flight_number.trim().to_uppercase()
            ),
        }
    }
}
