//! Reply dispatch: turns a classified intent into exactly one outbound message.

use crate::channels::{InboundEvent, MessageSender};
use crate::flights::{Flight, FlightProvider};
use crate::intent::{classify, FlightQuery, Intent};
use std::sync::Arc;

const GREETING: &str = "¡Hola! Bienvenido a Rumbo, tu agencia de viajes. ✈️\n¿En qué puedo ayudarte hoy?\n1. Buscar vuelos (Ej: 'Vuelo Madrid a Paris')\n2. Estado de mi vuelo (Ej: 'Estado IB1234')\n3. Contactar agente";

const SEARCH_USAGE: &str = "Por favor, indica el origen y destino. Ej: 'Vuelo Madrid a Paris'";

const STATUS_USAGE: &str = "Por favor, indica el número de vuelo. Ej: 'Estado IB1234'";

const AGENT_HANDOFF: &str = "Un agente se pondrá en contacto contigo en breve. 👨‍💻";

const FALLBACK: &str = "Lo siento, no entendí eso. ¿Podrías repetir o elegir una de las opciones?\n1. Buscar vuelos\n2. Estado de mi vuelo\n3. Contactar agente";

/// Classifies inbound events and sends the reply through the outbound channel.
/// Stateless: holds only the two collaborators, so concurrent events are independent.
pub struct Responder {
    sender: Arc<dyn MessageSender>,
    flights: Arc<dyn FlightProvider>,
}

impl Responder {
    pub fn new(sender: Arc<dyn MessageSender>, flights: Arc<dyn FlightProvider>) -> Self {
        Self { sender, flights }
    }

    /// Handle one inbound event: classify the text, build the reply, send it.
    /// Every event produces exactly one outbound send.
    pub async fn handle_event(&self, event: &InboundEvent) -> Result<(), String> {
        let reply = match classify(&event.text) {
            Intent::Greeting => GREETING.to_string(),
            Intent::FlightSearch(query) => {
                let flights = self
                    .flights
                    .search_flights(&query.origin, &query.destination)
                    .await;
                format_search_reply(&query, &flights)
            }
            Intent::FlightSearchUsage => SEARCH_USAGE.to_string(),
            Intent::FlightStatus(number) => self.flights.flight_status(&number).await,
            Intent::FlightStatusUsage => STATUS_USAGE.to_string(),
            Intent::Agent => AGENT_HANDOFF.to_string(),
            Intent::Unknown => FALLBACK.to_string(),
        };
        self.sender.send_message(&event.sender_id, &reply).await
    }
}

/// Header line plus one line per flight. An empty result keeps the header only.
fn format_search_reply(query: &FlightQuery, flights: &[Flight]) -> String {
    let mut reply = format!(
        "He encontrado estos vuelos para ti de {} a {}:\n",
        query.origin, query.destination
    );
    for flight in flights {
        reply.push_str(&format!(
            "- {} ({}): {} - {}\n",
            flight.airline, flight.flight_number, flight.departure, flight.price
        ));
    }
    reply
}
