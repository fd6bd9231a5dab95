use anyhow::Context;
use std::{net::SocketAddr, time::Duration};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    /// Root directory for receipts and campaign images.
    pub upload_dir: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("TRACER_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid TRACER_LISTEN_ADDR")?;
        let db_path = std::env::var("TRACER_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let upload_dir =
            std::env::var("TRACER_UPLOAD_DIR").unwrap_or_else(|_| "./uploads".into());
        let cors_allow = std::env::var("TRACER_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("TRACER_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        Ok(Self {
            listen_addr,
            db_path,
            upload_dir,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}
