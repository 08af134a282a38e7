// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod challenge;
pub mod identity;
pub mod image;
pub mod notice;
pub mod screen;
pub mod sensor;

pub use challenge::{Challenge, Document};
pub use identity::Identity;
pub use image::{ImageKey, ObjectHandle, UploadedImage};
pub use notice::Notice;
pub use screen::{NavItem, Route, Screen};
pub use sensor::{AccelSample, SamplingCadence};
