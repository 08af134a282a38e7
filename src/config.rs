// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local development.
//! When the Firebase emulator hosts are set, the REST adapters talk to the
//! emulators instead of the production endpoints.

use std::env;
use std::time::Duration;

/// Production Identity Toolkit endpoint.
pub const AUTH_BASE_URL: &str = "https://identitytoolkit.googleapis.com";
/// Production Firebase Storage endpoint.
pub const STORAGE_BASE_URL: &str = "https://firebasestorage.googleapis.com";
/// Acceleration magnitude (m/s²) above which a sample counts as a shake.
pub const DEFAULT_SHAKE_THRESHOLD: f64 = 20.0;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GCP / Firebase project ID
    pub firebase_project_id: String,
    /// Web API key used for the Identity Toolkit REST calls
    pub firebase_api_key: String,
    /// Storage bucket holding uploaded images (e.g. "my-app.appspot.com")
    pub storage_bucket: String,
    /// Base URL for the Identity Toolkit API (production or emulator)
    pub auth_base_url: String,
    /// Base URL for the Firebase Storage API (production or emulator)
    pub storage_base_url: String,
    /// Shake threshold in m/s²
    pub shake_threshold: f64,
    /// Minimum time between two emitted shakes; zero disables the cooldown
    pub shake_cooldown: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            firebase_project_id: "test-project".to_string(),
            firebase_api_key: "test-api-key".to_string(),
            storage_bucket: "test-project.appspot.com".to_string(),
            auth_base_url: AUTH_BASE_URL.to_string(),
            storage_base_url: STORAGE_BASE_URL.to_string(),
            shake_threshold: DEFAULT_SHAKE_THRESHOLD,
            shake_cooldown: Duration::ZERO,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let auth_base_url = match env::var("FIREBASE_AUTH_EMULATOR_HOST") {
            Ok(host) => format!("http://{}/identitytoolkit.googleapis.com", host.trim()),
            Err(_) => AUTH_BASE_URL.to_string(),
        };
        let storage_base_url = match env::var("FIREBASE_STORAGE_EMULATOR_HOST") {
            Ok(host) => format!("http://{}", host.trim()),
            Err(_) => STORAGE_BASE_URL.to_string(),
        };

        let shake_threshold = match env::var("SHAKE_THRESHOLD") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|t| t.is_finite() && *t >= 0.0)
                .ok_or(ConfigError::Invalid("SHAKE_THRESHOLD"))?,
            Err(_) => DEFAULT_SHAKE_THRESHOLD,
        };
        let shake_cooldown = match env::var("SHAKE_COOLDOWN_MS") {
            Ok(raw) => Duration::from_millis(
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("SHAKE_COOLDOWN_MS"))?,
            ),
            Err(_) => Duration::ZERO,
        };

        Ok(Self {
            firebase_project_id: env::var("FIREBASE_PROJECT_ID")
                .unwrap_or_else(|_| "local-dev".to_string()),
            firebase_api_key: env::var("FIREBASE_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("FIREBASE_API_KEY"))?,
            storage_bucket: env::var("FIREBASE_STORAGE_BUCKET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("FIREBASE_STORAGE_BUCKET"))?,
            auth_base_url,
            storage_base_url,
            shake_threshold,
            shake_cooldown,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
