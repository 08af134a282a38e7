//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

use crate::error::AppError;
use crate::models::Document;
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    /// Challenge phrases, one per document (`name` field)
    pub const CHALLENGES: &str = "challenges";
}

/// Read access to a document collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document of a collection, in store order.
    async fn list_collection(&self, name: &str) -> Result<Vec<Document>, AppError>;
}
