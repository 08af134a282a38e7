// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity service: email/password accounts backed by Firebase Auth.
//!
//! Uses the Identity Toolkit REST API:
//! - `accounts:signInWithPassword` for sign-in
//! - `accounts:signUp` for registration (which also signs the new user in)
//!
//! The signed-in identity is held in memory only; sign-out is local.

use crate::config::Config;
use crate::error::AppError;
use crate::models::Identity;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Capability interface of the identity collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Sign in an existing account; on success it becomes the current identity.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AppError>;

    /// Create an account; on success it becomes the current identity.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AppError>;

    /// Forget the current identity.
    fn sign_out(&self);

    /// The signed-in identity, if any.
    fn current_identity(&self) -> Option<Identity>;
}

/// Firebase Auth REST client.
pub struct FirebaseAuth {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    current: RwLock<Option<Identity>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

/// Response body shared by `signInWithPassword` and `signUp`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    email: Option<String>,
    id_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl FirebaseAuth {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.auth_base_url.trim_end_matches('/').to_string(),
            api_key: config.firebase_api_key.clone(),
            current: RwLock::new(None),
        }
    }

    /// POST an email/password pair to an `accounts:*` endpoint.
    async fn password_call(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, AppError> {
        let url = format!("{}/v1/accounts:{}", self.base_url, endpoint);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&PasswordRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("{} request failed: {}", endpoint, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            // Firebase puts a stable code such as EMAIL_NOT_FOUND in error.message
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| format!("HTTP {}: {}", status, body));

            return Err(AppError::Auth(message));
        }

        let account: AccountResponse = response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("JSON parse error: {}", e)))?;

        let identity = Identity::new(account.local_id, account.email, account.id_token);
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    fn set_current(&self, identity: Option<Identity>) {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = identity;
    }
}

#[async_trait]
impl IdentityService for FirebaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AppError> {
        let identity = self
            .password_call("signInWithPassword", email, password)
            .await?;
        tracing::info!(uid = %identity.uid, "Signed in");
        Ok(identity)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AppError> {
        let identity = self.password_call("signUp", email, password).await?;
        tracing::info!(uid = %identity.uid, "Account created");
        Ok(identity)
    }

    fn sign_out(&self) {
        self.set_current(None);
        tracing::info!("Signed out");
    }

    fn current_identity(&self) -> Option<Identity> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
