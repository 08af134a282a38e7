// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - client logic and backend collaborators.

pub mod challenge;
pub mod gallery;
pub mod identity;
pub mod motion;
pub mod navigation;
pub mod session;
pub mod storage;
pub mod upload;

pub use challenge::ChallengeSelector;
pub use gallery::GalleryLister;
pub use identity::{FirebaseAuth, IdentityService};
pub use motion::{
    exceeds_threshold, ChannelSensor, MotionSensor, MotionTrigger, ShakeDetector, TriggerState,
};
pub use navigation::Navigator;
pub use session::SessionGate;
pub use storage::{BlobStore, FirebaseStorage};
pub use upload::UploadCoordinator;
