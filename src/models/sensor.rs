// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Accelerometer samples.

use std::time::Duration;

/// One accelerometer reading, in m/s² per axis (gravity included).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AccelSample {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm of the three axes, computed in f64.
    pub fn magnitude(&self) -> f64 {
        let (x, y, z) = (self.x as f64, self.y as f64, self.z as f64);
        (x * x + y * y + z * z).sqrt()
    }
}

/// Rate at which a sensor delivers samples to a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingCadence(pub Duration);

impl SamplingCadence {
    /// The platform's "normal" rate, suitable for screen-level UI changes.
    pub const NORMAL: SamplingCadence = SamplingCadence(Duration::from_millis(200));

    pub fn interval(&self) -> Duration {
        self.0
    }
}
