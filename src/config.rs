// src/config.rs

use std::env;
use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Shared key for the admin routes. Admin access is closed when unset.
    pub admin_key: Option<String>,
    pub rust_log: String,
    pub default_language: String,
    /// Optional JSON file with extra languages.
    pub content_path: Option<String>,
    pub session_ttl_secs: u64,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://survey.db?mode=rwc".to_string());

        let admin_key = env::var("ADMIN_KEY").ok().filter(|k| !k.is_empty());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let default_language = env::var("DEFAULT_LANGUAGE")
            .unwrap_or_else(|_| "en".to_string());

        let content_path = env::var("CONTENT_PATH").ok();

        let session_ttl_secs = env::var("SESSION_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        Self {
            database_url,
            admin_key,
            rust_log,
            default_language,
            content_path,
            session_ttl_secs,
            port,
            cors_origins,
        }
    }
}
