// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Upload coordinator: stores a picked image under the user's namespace.

use crate::error::{AppError, PreconditionError};
use crate::models::ImageKey;
use crate::services::storage::BlobStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct UploadCoordinator {
    blobs: Arc<dyn BlobStore>,
}

impl UploadCoordinator {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// Upload `image` as `images/{uid}-{name}.jpg`, replacing any earlier
    /// upload with the same name.
    ///
    /// Preconditions are checked before the blob store is touched.
    pub async fn upload(
        &self,
        image: Option<Vec<u8>>,
        name: &str,
        uid: Option<&str>,
    ) -> Result<ImageKey, AppError> {
        let image = match image {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => return Err(PreconditionError::MissingImage.into()),
        };
        if name.is_empty() {
            return Err(PreconditionError::MissingName.into());
        }
        let uid = uid.ok_or(PreconditionError::MissingIdentity)?;

        let key = ImageKey::for_upload(uid, name);
        let size = image.len();
        self.blobs.put(key.as_str(), image).await?;

        tracing::info!(key = %key, size, "Image uploaded");
        Ok(key)
    }
}
