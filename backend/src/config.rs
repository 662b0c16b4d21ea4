use std::env;
use std::net::{AddrParseError, SocketAddr};

use axum::http::HeaderValue;
use tracing::warn;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_RECORD_KEY: &str = "wheels";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://127.0.0.1:8080,http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Name the single wheel record is stored under.
    pub record_key: String,
    pub allowed_origins: Vec<HeaderValue>,
}

impl ServerConfig {
    /// Reads `BIND_ADDR`, `WHEEL_RECORD_KEY` and `ALLOWED_ORIGINS`. Call after
    /// `.env` has been loaded.
    pub fn from_env() -> Result<Self, AddrParseError> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()?;
        let record_key = env::var("WHEEL_RECORD_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RECORD_KEY.to_string());
        let origins = env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());

        Ok(Self {
            bind_addr,
            record_key,
            allowed_origins: parse_origins(&origins),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            record_key: DEFAULT_RECORD_KEY.to_string(),
            allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring invalid origin {:?}", origin);
                None
            }
        })
        .collect()
}
