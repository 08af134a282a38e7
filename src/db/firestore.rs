// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper implementing [`DocumentStore`].

use crate::db::DocumentStore;
use crate::error::AppError;
use crate::models::Document;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

/// Prefix of the metadata keys the deserializer adds next to document fields.
const FIRESTORE_META_PREFIX: &str = "_firestore_";

/// Raw document shape: the Firestore ID plus any top-level fields.
#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(alias = "_firestore_id")]
    id: Option<String>,
    #[serde(flatten)]
    fields: HashMap<String, serde_json::Value>,
}

impl From<RawDocument> for Document {
    fn from(raw: RawDocument) -> Self {
        let fields: BTreeMap<String, String> = raw
            .fields
            .into_iter()
            .filter(|(name, _)| !name.starts_with(FIRESTORE_META_PREFIX))
            .filter_map(|(name, value)| match value {
                serde_json::Value::String(s) => Some((name, s)),
                _ => None,
            })
            .collect();

        Document {
            id: raw.id.unwrap_or_default(),
            fields,
        }
    }
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Store(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| AppError::Store(format!("Failed to connect to Firestore Emulator: {}", e)))?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Store("Database not connected (offline mode)".to_string()))
    }

    /// Create or replace a document with the given string fields.
    ///
    /// The client only ever reads; this exists to seed collections.
    pub async fn set_document(
        &self,
        collection: &str,
        document: &Document,
    ) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collection)
            .document_id(&document.id)
            .object(&document.fields)
            .execute()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;
        Ok(())
    }

    /// Delete a document by ID.
    pub async fn delete_document(&self, collection: &str, id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collection)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FirestoreDb {
    async fn list_collection(&self, name: &str) -> Result<Vec<Document>, AppError> {
        let raw: Vec<RawDocument> = self
            .get_client()?
            .fluent()
            .select()
            .from(name)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        tracing::debug!(collection = name, count = raw.len(), "Listed collection");

        Ok(raw.into_iter().map(Document::from).collect())
    }
}
