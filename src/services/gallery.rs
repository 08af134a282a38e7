// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gallery lister: a user's uploads with download URLs.

use crate::error::AppError;
use crate::models::image::IMAGES_PREFIX;
use crate::models::{ObjectHandle, UploadedImage};
use crate::services::storage::BlobStore;
use futures_util::future::try_join_all;
use std::sync::Arc;

#[derive(Clone)]
pub struct GalleryLister {
    blobs: Arc<dyn BlobStore>,
}

impl GalleryLister {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// List every image uploaded by `uid`.
    ///
    /// URL resolution runs concurrently for all images; if any one fails the
    /// whole listing fails.
    pub async fn list(&self, uid: &str) -> Result<Vec<UploadedImage>, AppError> {
        let owned: Vec<ObjectHandle> = self
            .blobs
            .list(IMAGES_PREFIX)
            .await?
            .into_iter()
            .filter(|handle| handle.is_owned_by(uid))
            .collect();

        let urls = try_join_all(owned.iter().map(|handle| self.blobs.resolve_url(handle))).await?;

        let images: Vec<UploadedImage> = owned
            .iter()
            .zip(urls)
            .map(|(handle, url)| UploadedImage {
                name: handle.display_name(uid),
                url,
            })
            .collect();

        tracing::debug!(uid, count = images.len(), "Gallery listed");
        Ok(images)
    }
}
