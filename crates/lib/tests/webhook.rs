//! Integration test: exercise the Wati webhook over real HTTP.
//!
//! The outbound channel is replaced by a recorder so no Wati account is
//! needed; the flight provider is the bundled demo catalog. The webhook
//! processes an event fully before acknowledging, so each POST's sends are
//! visible as soon as the response returns.

use async_trait::async_trait;
use lib::channels::MessageSender;
use lib::config::Config;
use lib::flights::FlightCatalog;
use lib::gateway::{self, GatewayState};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const ALLOWED: &str = "34600111222";

#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send_message(&self, recipient_id: &str, text: &str) -> Result<(), String> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient_id.to_string(), text.to_string()));
        Ok(())
    }
}

fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
    listener.local_addr().expect("local_addr").port()
}

/// Start the gateway with a recording sender; returns the webhook URL and recorder.
async fn start_gateway() -> (String, Arc<RecordingSender>) {
    let port = free_port();
    let mut config = Config::default();
    config.gateway.port = port;
    config.gateway.bind = "127.0.0.1".to_string();
    config.channels.wati.allowed_sender = Some(ALLOWED.to_string());

    let sender = Arc::new(RecordingSender::default());
    let state = GatewayState::new(
        config,
        sender.clone(),
        Arc::new(FlightCatalog::with_demo_routes()),
    );
    tokio::spawn(async move {
        let _ = gateway::serve(state).await;
    });

    let health = format!("http://127.0.0.1:{}/", port);
    let client = reqwest::Client::new();
    for _ in 0..100 {
        if let Ok(resp) = client.get(&health).send().await {
            if resp.status().is_success() {
                return (format!("http://127.0.0.1:{}/wati/webhook", port), sender);
            }
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("gateway did not come up on port {} within 5s", port);
}

#[tokio::test]
async fn missing_wa_id_is_a_client_error_and_sends_nothing() {
    let (url, sender) = start_gateway().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(&url)
        .json(&serde_json::json!({ "text": "hola", "type": "text" }))
        .send()
        .await
        .expect("post webhook");
    assert_eq!(resp.status().as_u16(), 400);
    let body: serde_json::Value = resp.json().await.expect("parse JSON");
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("error"));
    assert_eq!(
        body.get("message").and_then(|v| v.as_str()),
        Some("No waId provided")
    );
    assert!(sender.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unlisted_sender_gets_the_success_body_and_sends_nothing() {
    let (url, sender) = start_gateway().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(&url)
        .json(&serde_json::json!({ "waId": "34999888777", "text": "hola", "type": "text" }))
        .send()
        .await
        .expect("post webhook");
    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = resp.json().await.expect("parse JSON");
    // Indistinguishable from the authorized acknowledgement.
    assert_eq!(body, serde_json::json!({ "status": "success" }));
    assert!(sender.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn authorized_greeting_is_answered() {
    let (url, sender) = start_gateway().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(&url)
        .json(&serde_json::json!({ "waId": ALLOWED, "text": "Hola", "type": "text" }))
        .send()
        .await
        .expect("post webhook");
    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = resp.json().await.expect("parse JSON");
    assert_eq!(body, serde_json::json!({ "status": "success" }));

    let sent = sender.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, ALLOWED);
    assert!(sent[0].1.contains("Bienvenido a Rumbo"));
}

#[tokio::test]
async fn authorized_search_lists_demo_flights() {
    let (url, sender) = start_gateway().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(&url)
        .json(&serde_json::json!({ "waId": ALLOWED, "text": "Vuelo Madrid a Paris", "type": "text" }))
        .send()
        .await
        .expect("post webhook");
    assert_eq!(resp.status().as_u16(), 200);

    let sent = sender.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    let reply = &sent[0].1;
    assert!(reply.starts_with("He encontrado estos vuelos para ti de madrid a paris:\n"));
    assert!(reply.contains("- Iberia (IB1234): 08:30 - 120€"));
}
