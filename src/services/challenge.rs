// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Challenge selection: one uniformly random phrase from the store.

use crate::db::{collections, DocumentStore};
use crate::models::{Challenge, Document};
use rand::seq::SliceRandom;
use std::sync::Arc;

/// Picks a random challenge from the full `challenges` collection.
#[derive(Clone)]
pub struct ChallengeSelector {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl ChallengeSelector {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            collection: collections::CHALLENGES.to_string(),
        }
    }

    /// Fetch the whole collection and pick one entry at random.
    ///
    /// `None` means "no challenge found": the collection was empty, the
    /// picked document had no phrase, or the fetch failed. Only the log
    /// tells these apart.
    pub async fn refresh(&self) -> Option<Challenge> {
        let documents = match self.store.list_collection(&self.collection).await {
            Ok(documents) => documents,
            Err(e) => {
                tracing::warn!(error = %e, collection = %self.collection, "Error getting challenges");
                return None;
            }
        };

        if documents.is_empty() {
            tracing::info!(collection = %self.collection, "Challenge collection is empty");
            return None;
        }

        let picked = pick_random(&documents);
        if picked.is_none() {
            tracing::warn!("Picked challenge document has no name field");
        }
        picked
    }
}

/// Uniform choice over all documents, including ones without a phrase.
fn pick_random(documents: &[Document]) -> Option<Challenge> {
    documents
        .choose(&mut rand::thread_rng())
        .and_then(Document::challenge)
}
