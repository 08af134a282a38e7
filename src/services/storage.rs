// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Blob storage backed by Firebase Storage.
//!
//! Talks to the Firebase Storage REST API (`/v0/b/{bucket}/o`):
//! - media uploads (`POST ?name=...`)
//! - folder listing (`GET ?prefix=...&delimiter=/`, paginated)
//! - metadata reads, whose `downloadTokens` make up the download URL
//!
//! Requests carry the current user's ID token; security rules decide access.

use crate::config::Config;
use crate::error::AppError;
use crate::models::image::{IMAGE_CONTENT_TYPE, IMAGE_EXTENSION};
use crate::models::ObjectHandle;
use crate::services::identity::IdentityService;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// Capability interface of the blob storage collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write `bytes` at `key`, replacing any existing object.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), AppError>;

    /// List the objects directly under `prefix` (not recursive).
    async fn list(&self, prefix: &str) -> Result<Vec<ObjectHandle>, AppError>;

    /// Resolve a URL the object can be downloaded from.
    async fn resolve_url(&self, handle: &ObjectHandle) -> Result<String, AppError>;
}

/// Firebase Storage REST client.
pub struct FirebaseStorage {
    http: reqwest::Client,
    base_url: String,
    bucket: String,
    identity: Arc<dyn IdentityService>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    items: Vec<ListItem>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListItem {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectMetadata {
    download_tokens: Option<String>,
}

impl FirebaseStorage {
    pub fn new(config: &Config, identity: Arc<dyn IdentityService>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.storage_base_url.trim_end_matches('/').to_string(),
            bucket: config.storage_bucket.clone(),
            identity,
        }
    }

    fn objects_url(&self) -> String {
        format!("{}/v0/b/{}/o", self.base_url, self.bucket)
    }

    fn object_url(&self, full_path: &str) -> String {
        format!("{}/{}", self.objects_url(), urlencoding::encode(full_path))
    }

    /// Attach the signed-in user's token, if any.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.identity.current_identity() {
            Some(identity) => request.bearer_auth(identity.id_token),
            None => request,
        }
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Store(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Store(format!("JSON parse error: {}", e)))
    }
}

fn content_type_for(key: &str) -> &'static str {
    if key.ends_with(IMAGE_EXTENSION) {
        IMAGE_CONTENT_TYPE
    } else {
        "application/octet-stream"
    }
}

#[async_trait]
impl BlobStore for FirebaseStorage {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), AppError> {
        let size = bytes.len();
        let request = self
            .http
            .post(self.objects_url())
            .query(&[("uploadType", "media"), ("name", key)])
            .header(reqwest::header::CONTENT_TYPE, content_type_for(key))
            .body(bytes);

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| AppError::Store(format!("Upload request failed: {}", e)))?;

        let _: serde_json::Value = self.check_response_json(response).await?;
        tracing::debug!(key, size, "Object stored");
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectHandle>, AppError> {
        let mut handles = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![("prefix", prefix.to_string()), ("delimiter", "/".to_string())];
            if let Some(token) = page_token.take() {
                query.push(("pageToken", token));
            }

            let request = self.http.get(self.objects_url()).query(&query);
            let response = self
                .authorize(request)
                .send()
                .await
                .map_err(|e| AppError::Store(format!("List request failed: {}", e)))?;

            let page: ListResponse = self.check_response_json(response).await?;
            handles.extend(
                page.items
                    .into_iter()
                    .map(|item| ObjectHandle::from_path(item.name)),
            );

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(prefix, count = handles.len(), "Listed objects");
        Ok(handles)
    }

    async fn resolve_url(&self, handle: &ObjectHandle) -> Result<String, AppError> {
        let object_url = self.object_url(&handle.full_path);

        let response = self
            .authorize(self.http.get(&object_url))
            .send()
            .await
            .map_err(|e| AppError::Store(format!("Metadata request failed: {}", e)))?;

        let metadata: ObjectMetadata = self.check_response_json(response).await?;

        // Several comma-separated tokens may exist; any of them works
        let token = metadata
            .download_tokens
            .as_deref()
            .and_then(|tokens| tokens.split(',').map(str::trim).find(|t| !t.is_empty()))
            .ok_or_else(|| {
                AppError::Store(format!("No download token for {}", handle.full_path))
            })?;

        Ok(format!(
            "{}?alt=media&token={}",
            object_url,
            urlencoding::encode(token)
        ))
    }
}
