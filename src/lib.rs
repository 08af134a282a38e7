// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Photo Challenge: shake for a photography challenge, upload, browse.
//!
//! This crate provides the client core of the app: navigation, the
//! motion-triggered challenge refresh, and the upload and gallery
//! coordinators. Authentication, documents and blobs are delegated to
//! Firebase through the collaborator traits in [`services`] and [`db`].

pub mod client;
pub mod config;
pub mod console;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

use config::Config;
use db::DocumentStore;
use services::{
    BlobStore, ChallengeSelector, GalleryLister, IdentityService, MotionSensor, SessionGate,
    UploadCoordinator,
};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub identity: Arc<dyn IdentityService>,
    pub session: SessionGate,
    pub challenges: ChallengeSelector,
    pub uploads: UploadCoordinator,
    pub gallery: GalleryLister,
    pub sensor: Arc<dyn MotionSensor>,
}

impl AppState {
    /// Wire the client services on top of the backend collaborators.
    pub fn new(
        config: Config,
        identity: Arc<dyn IdentityService>,
        store: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
        sensor: Arc<dyn MotionSensor>,
    ) -> Self {
        Self {
            config,
            session: SessionGate::new(identity.clone()),
            identity,
            challenges: ChallengeSelector::new(store),
            uploads: UploadCoordinator::new(blobs.clone()),
            gallery: GalleryLister::new(blobs),
            sensor,
        }
    }
}
