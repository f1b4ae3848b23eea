//! Intent classification for inbound chat text.
//!
//! A flat, ordered rule list over normalized text; the first matching rule
//! wins and every input lands in exactly one intent. Parameter extraction is
//! split/trim heuristics over free text ("vuelo madrid a paris"), not a
//! grammar; ambiguous input degrades silently.

/// Origin/destination pair extracted from a search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightQuery {
    pub origin: String,
    pub destination: String,
}

/// What the responder should do with an inbound text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Greeting / menu request ("hola", "inicio").
    Greeting,
    /// Flight search with extracted origin and destination.
    FlightSearch(FlightQuery),
    /// Search keyword present but origin/destination could not be extracted.
    FlightSearchUsage,
    /// Status lookup for the extracted flight number.
    FlightStatus(String),
    /// Status keyword present but no flight number followed it.
    FlightStatusUsage,
    /// Hand off to a human agent.
    Agent,
    /// No rule matched.
    Unknown,
}

/// Trim and lower-case inbound text before matching.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

type Predicate = fn(&str) -> bool;
type Build = fn(&str) -> Intent;

fn wants_greeting(text: &str) -> bool {
    text.contains("hola") || text.contains("inicio")
}

fn wants_search(text: &str) -> bool {
    text.contains("vuelo")
}

fn wants_status(text: &str) -> bool {
    text.contains("estado")
}

fn wants_agent(text: &str) -> bool {
    text.contains("agente")
}

fn build_greeting(_text: &str) -> Intent {
    Intent::Greeting
}

fn build_search(text: &str) -> Intent {
    match parse_flight_search(text) {
        Some(query) => Intent::FlightSearch(query),
        None => Intent::FlightSearchUsage,
    }
}

fn build_status(text: &str) -> Intent {
    match parse_flight_status(text) {
        Some(number) => Intent::FlightStatus(number),
        None => Intent::FlightStatusUsage,
    }
}

fn build_agent(_text: &str) -> Intent {
    Intent::Agent
}

/// Ordered rule list; evaluated top to bottom, first match wins.
const RULES: &[(Predicate, Build)] = &[
    (wants_greeting, build_greeting),
    (wants_search, build_search),
    (wants_status, build_status),
    (wants_agent, build_agent),
];

/// Classify raw inbound text. Total: every string falls into exactly one intent.
pub fn classify(text: &str) -> Intent {
    let text = normalize(text);
    for (matches, build) in RULES {
        if matches(&text) {
            return build(&text);
        }
    }
    Intent::Unknown
}

/// Extract origin/destination from normalized search text.
///
/// Splits on the literal `" a "`: `"vuelo madrid a paris"` gives origin
/// "madrid" and destination "paris". Fewer than two segments => None. Extra
/// `" a "` occurrences degrade silently (the second segment is taken as the
/// destination).
pub fn parse_flight_search(text: &str) -> Option<FlightQuery> {
    let parts: Vec<&str> = text.split(" a ").collect();
    if parts.len() < 2 {
        return None;
    }
    let origin = parts[0].rsplit("vuelo").next().unwrap_or("").trim();
    let destination = parts[1].trim();
    Some(FlightQuery {
        origin: origin.to_string(),
        destination: destination.to_string(),
    })
}

/// Extract the flight number from normalized status text: everything after
/// the last "estado", trimmed. None when nothing follows the keyword.
pub fn parse_flight_status(text: &str) -> Option<String> {
    let number = text.rsplit("estado").next().unwrap_or("").trim();
    if number.is_empty() {
        None
    } else {
        Some(number.to_string())
    }
}
