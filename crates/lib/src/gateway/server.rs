//! Gateway HTTP server: health probe and the Wati webhook.

use crate::channels::{InboundEvent, MessageSender, WatiChannel, WatiWebhookEvent};
use crate::config::{self, Config};
use crate::flights::{FlightCatalog, FlightProvider};
use crate::responder::Responder;
use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

/// Shared state for the gateway (config, allow-list, responder).
#[derive(Clone)]
pub struct GatewayState {
    pub config: Arc<Config>,
    /// When Some, only this sender id may trigger the responder.
    pub allowed_sender: Option<String>,
    pub responder: Arc<Responder>,
}

impl GatewayState {
    /// Build state from config and the two collaborators. The allow-list is
    /// resolved once here (env override included).
    pub fn new(
        config: Config,
        sender: Arc<dyn MessageSender>,
        flights: Arc<dyn FlightProvider>,
    ) -> Self {
        let allowed_sender = config::resolve_allowed_sender(&config);
        Self {
            config: Arc::new(config),
            allowed_sender,
            responder: Arc::new(Responder::new(sender, flights)),
        }
    }
}

/// Build the gateway router.
pub fn app(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(health_http))
        .route("/wati/webhook", post(wati_webhook))
        .with_state(state)
}

/// Run the gateway with the default collaborators: the Wati REST connector
/// and the demo flight catalog. Blocks until shutdown (e.g. Ctrl+C).
pub async fn run_gateway(config: Config) -> Result<()> {
    let token = config::resolve_wati_token(&config);
    if token.is_none() {
        log::warn!("wati api token not configured; outbound sends will fail");
    }
    let wati = Arc::new(WatiChannel::new(
        config.channels.wati.api_url.clone(),
        token,
    ));
    let flights = Arc::new(FlightCatalog::with_demo_routes());
    let state = GatewayState::new(config, wati, flights);
    serve(state).await
}

/// Serve the gateway on config.gateway.bind:config.gateway.port until shutdown.
pub async fn serve(state: GatewayState) -> Result<()> {
    let bind = state.config.gateway.bind.trim().to_string();
    if !config::is_loopback_bind(&bind) && state.allowed_sender.is_none() {
        log::warn!(
            "gateway binding to {} with no allowed sender configured; webhook is open to any sender",
            bind
        );
    }
    let bind_addr = format!("{}:{}", bind, state.config.gateway.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding to {}", bind_addr))?;
    log::info!("gateway listening on {}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("gateway server exited")?;
    log::info!("gateway stopped");
    Ok(())
}

/// Future that completes when the process should shut down (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("shutdown signal received, draining connections");
}

/// POST /wati/webhook — receives a Wati message event.
///
/// Order matters: the raw payload is logged before anything else, a missing
/// wa_id is a client error, an allow-list mismatch is dropped behind the same
/// success body as the happy path, and responder faults never reach the caller.
async fn wati_webhook(
    State(state): State<GatewayState>,
    body: Bytes,
) -> (StatusCode, Json<serde_json::Value>) {
    log::info!("wati webhook received: {}", String::from_utf8_lossy(&body));

    // Lenient parse: a malformed body is handled like a payload with no fields.
    let event: WatiWebhookEvent = serde_json::from_slice(&body).unwrap_or_default();

    let Some(wa_id) = event.wa_id.filter(|id| !id.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": "error", "message": "No waId provided" })),
        );
    };

    if let Some(ref allowed) = state.allowed_sender {
        if wa_id != *allowed {
            log::info!("access denied for sender: {}", wa_id);
            // Same body as the happy path so callers cannot probe the allow-list.
            return (StatusCode::OK, Json(json!({ "status": "success" })));
        }
    }

    if event.message_type.as_deref() == Some("text") || event.text.is_some() {
        let inbound = InboundEvent {
            sender_id: wa_id,
            text: event.text.unwrap_or_default(),
            message_type: event.message_type.unwrap_or_default(),
        };
        if let Err(e) = state.responder.handle_event(&inbound).await {
            log::warn!("responder failed: {}", e);
        }
    }

    (StatusCode::OK, Json(json!({ "status": "success" })))
}

/// GET / returns a simple health JSON (for probes).
async fn health_http(State(state): State<GatewayState>) -> Json<serde_json::Value> {
    Json(json!({
        "runtime": "running",
        "port": state.config.gateway.port,
    }))
}
