//! Configuration types and loading.
//!
//! Config is loaded from a JSON file (e.g. `~/.rumbo/config.json`) and environment.
//! Kept minimal: gateway bind/port and the Wati channel credentials.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Gateway server settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Channel settings (Wati).
    #[serde(default)]
    pub channels: ChannelsConfig,
}

/// Gateway bind and port settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    /// Port for the webhook HTTP server (default 8787).
    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Bind address (default "127.0.0.1").
    #[serde(default = "default_gateway_bind")]
    pub bind: String,
}

fn default_gateway_port() -> u16 {
    8787
}

fn default_gateway_bind() -> String {
    "127.0.0.1".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_gateway_port(),
            bind: default_gateway_bind(),
        }
    }
}

/// Per-channel config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelsConfig {
    #[serde(default)]
    pub wati: WatiChannelConfig,
}

/// Wati channel config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatiChannelConfig {
    /// Tenant API base URL (e.g. "https://live-server-12345.wati.io"). When unset the shared live server is used.
    pub api_url: Option<String>,

    /// Bearer token for the Wati REST API. Overridden by WATI_API_TOKEN env when set.
    pub api_token: Option<String>,

    /// Only this wa_id may trigger the responder. Overridden by RUMBO_ALLOWED_SENDER env. Unset means open access.
    pub allowed_sender: Option<String>,
}

/// Env value when set and non-empty, otherwise the config value (trimmed, non-empty).
fn resolve_env_or_config(env_key: &str, config_value: Option<&str>) -> Option<String> {
    std::env::var(env_key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            config_value
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
}

/// Resolve the Wati API token: env WATI_API_TOKEN overrides config.
pub fn resolve_wati_token(config: &Config) -> Option<String> {
    resolve_env_or_config("WATI_API_TOKEN", config.channels.wati.api_token.as_deref())
}

/// Resolve the allow-listed sender: env RUMBO_ALLOWED_SENDER overrides config.
/// None disables the allow-list check entirely.
pub fn resolve_allowed_sender(config: &Config) -> Option<String> {
    resolve_env_or_config(
        "RUMBO_ALLOWED_SENDER",
        config.channels.wati.allowed_sender.as_deref(),
    )
}

/// True if the bind address is loopback (127.0.0.1, ::1, etc.).
pub fn is_loopback_bind(bind: &str) -> bool {
    let b = bind.trim();
    b == "127.0.0.1" || b == "::1" || b == "localhost"
}

/// Resolve config path from env or default.
pub fn default_config_path() -> PathBuf {
    std::env::var("RUMBO_CONFIG_PATH").map(PathBuf::from).unwrap_or_else(|_| {
        dirs::home_dir()
            .map(|h| h.join(".rumbo").join("config.json"))
            .unwrap_or_else(|| PathBuf::from("config.json"))
    })
}

/// Load config from the default path (or RUMBO_CONFIG_PATH). Missing file => default config.
/// Returns the config and the path that was used.
pub fn load_config(path: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let path = path.unwrap_or_else(default_config_path);
    let config = if !path.exists() {
        log::debug!("config file not found, using defaults: {}", path.display());
        Config::default()
    } else {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        serde_json::from_str(&s)
            .with_context(|| format!("parsing config from {}", path.display()))?
    };
    Ok((config, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_gateway_port_and_bind() {
        let g = GatewayConfig::default();
        assert_eq!(g.port, 8787);
        assert_eq!(g.bind, "127.0.0.1");
    }

    #[test]
    fn parses_wati_section() {
        let config: Config = serde_json::from_str(
            r#"{
                "gateway": { "port": 9000 },
                "channels": {
                    "wati": {
                        "apiUrl": "https://live-server-12345.wati.io",
                        "apiToken": "tok",
                        "allowedSender": "34600111222"
                    }
                }
            }"#,
        )
        .expect("parse config");
        assert_eq!(config.gateway.port, 9000);
        assert_eq!(config.gateway.bind, "127.0.0.1");
        assert_eq!(
            config.channels.wati.api_url.as_deref(),
            Some("https://live-server-12345.wati.io")
        );
        assert_eq!(config.channels.wati.api_token.as_deref(), Some("tok"));
        assert_eq!(
            config.channels.wati.allowed_sender.as_deref(),
            Some("34600111222")
        );
    }

    #[test]
    fn empty_object_gives_defaults() {
        let config: Config = serde_json::from_str("{}").expect("parse config");
        assert_eq!(config.gateway.port, 8787);
        assert!(config.channels.wati.api_token.is_none());
        assert!(config.channels.wati.allowed_sender.is_none());
    }

    #[test]
    fn loopback_binds() {
        assert!(is_loopback_bind("127.0.0.1"));
        assert!(is_loopback_bind("localhost"));
        assert!(is_loopback_bind("::1"));
        assert!(!is_loopback_bind("0.0.0.0"));
    }
}
