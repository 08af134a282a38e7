// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Motion trigger: turns accelerometer samples into discrete "shake" events.
//!
//! While armed, the trigger holds a sensor registration and classifies every
//! sample by its magnitude. The registration is tied to a [`SensorGuard`], so
//! it is released on every exit path: `disarm()`, re-arming, or drop.

use crate::error::AppError;
use crate::models::{AccelSample, SamplingCadence};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Samples buffered per registration before new ones are dropped.
const SAMPLE_BUFFER: usize = 64;

/// Identifies one sensor registration.
pub type RegistrationId = u64;

/// An active sensor registration and its sample stream.
pub struct Registration {
    pub id: RegistrationId,
    pub samples: mpsc::Receiver<AccelSample>,
}

/// Capability interface of the accelerometer.
pub trait MotionSensor: Send + Sync {
    /// Start delivering samples at `cadence`.
    fn register(&self, cadence: SamplingCadence) -> Result<Registration, AppError>;

    /// Stop delivering samples to a registration. Unknown IDs are ignored.
    fn unregister(&self, id: RegistrationId);
}

/// Releases a sensor registration when dropped.
pub struct SensorGuard {
    sensor: Arc<dyn MotionSensor>,
    id: RegistrationId,
}

impl SensorGuard {
    pub fn new(sensor: Arc<dyn MotionSensor>, id: RegistrationId) -> Self {
        Self { sensor, id }
    }

    pub fn id(&self) -> RegistrationId {
        self.id
    }
}

impl Drop for SensorGuard {
    fn drop(&mut self) {
        self.sensor.unregister(self.id);
        tracing::debug!(registration = self.id, "Motion sensor unregistered");
    }
}

/// In-process sensor fed by [`ChannelSensor::push`].
///
/// Every pushed sample is fanned out to all current registrations.
#[derive(Default)]
pub struct ChannelSensor {
    next_id: AtomicU64,
    listeners: Mutex<HashMap<RegistrationId, mpsc::Sender<AccelSample>>>,
}

impl ChannelSensor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a sample to every registration. Returns how many received it.
    pub fn push(&self, sample: AccelSample) -> usize {
        let listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        listeners
            .values()
            .filter(|tx| match tx.try_send(sample) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!("Motion sample dropped (listener lagging)");
                    false
                }
                Err(mpsc::error::TrySendError::Closed(_)) => false,
            })
            .count()
    }

    /// Number of live registrations.
    pub fn active_registrations(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

impl MotionSensor for ChannelSensor {
    fn register(&self, cadence: SamplingCadence) -> Result<Registration, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(SAMPLE_BUFFER);

        self.listeners
            .lock()
            .map_err(|_| AppError::Sensor("listener table poisoned".to_string()))?
            .insert(id, tx);

        tracing::debug!(
            registration = id,
            interval_ms = cadence.interval().as_millis() as u64,
            "Motion sensor registered"
        );
        Ok(Registration { id, samples: rx })
    }

    fn unregister(&self, id: RegistrationId) {
        // Dropping the sender ends the registration's sample stream
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&id);
    }
}

/// True if a sample's magnitude is strictly above `threshold`.
pub fn exceeds_threshold(sample: &AccelSample, threshold: f64) -> bool {
    sample.magnitude() > threshold
}

/// Per-sample shake classification with an optional cooldown.
///
/// With a zero cooldown every above-threshold sample is a shake, so a single
/// physical shake spanning several samples emits several events.
#[derive(Debug, Clone)]
pub struct ShakeDetector {
    threshold: f64,
    cooldown: Duration,
    last_emit: Option<Instant>,
}

impl ShakeDetector {
    pub fn new(threshold: f64, cooldown: Duration) -> Self {
        Self {
            threshold,
            cooldown,
            last_emit: None,
        }
    }

    /// Classify one sample observed at `now`; true means "emit a shake".
    pub fn observe(&mut self, sample: &AccelSample, now: Instant) -> bool {
        if !exceeds_threshold(sample, self.threshold) {
            return false;
        }

        if !self.cooldown.is_zero() {
            if let Some(last) = self.last_emit {
                if now.saturating_duration_since(last) < self.cooldown {
                    return false;
                }
            }
        }

        self.last_emit = Some(now);
        true
    }
}

/// Whether the trigger currently holds a sensor registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    Armed,
}

struct Armed {
    guard: SensorGuard,
    task: JoinHandle<()>,
}

/// Two-state motion trigger (idle / armed).
pub struct MotionTrigger {
    sensor: Arc<dyn MotionSensor>,
    threshold: f64,
    cooldown: Duration,
    armed: Option<Armed>,
}

impl MotionTrigger {
    pub fn new(sensor: Arc<dyn MotionSensor>, threshold: f64, cooldown: Duration) -> Self {
        Self {
            sensor,
            threshold,
            cooldown,
            armed: None,
        }
    }

    pub fn state(&self) -> TriggerState {
        match self.armed {
            Some(_) => TriggerState::Armed,
            None => TriggerState::Idle,
        }
    }

    /// Register with the sensor and call `on_shake` for every detected shake.
    ///
    /// Arming an armed trigger keeps the existing registration.
    /// Must be called from within a Tokio runtime.
    pub fn arm<F>(&mut self, on_shake: F) -> Result<(), AppError>
    where
        F: Fn() + Send + 'static,
    {
        if self.armed.is_some() {
            return Ok(());
        }

        let Registration { id, mut samples } = self.sensor.register(SamplingCadence::NORMAL)?;
        let guard = SensorGuard::new(self.sensor.clone(), id);
        let mut detector = ShakeDetector::new(self.threshold, self.cooldown);

        let task = tokio::spawn(async move {
            while let Some(sample) = samples.recv().await {
                if detector.observe(&sample, Instant::now()) {
                    tracing::debug!(
                        magnitude = sample.magnitude(),
                        "Shake detected"
                    );
                    on_shake();
                }
            }
        });

        tracing::info!(registration = id, threshold = self.threshold, "Motion trigger armed");
        self.armed = Some(Armed { guard, task });
        Ok(())
    }

    /// Release the sensor registration. No-op when idle.
    pub fn disarm(&mut self) {
        if let Some(Armed { guard, task }) = self.armed.take() {
            let id = guard.id();
            drop(guard);
            task.abort();
            tracing::info!(registration = id, "Motion trigger disarmed");
        }
    }
}

impl Drop for MotionTrigger {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        assert!(!exceeds_threshold(&AccelSample::new(20.0, 0.0, 0.0), 20.0));
        assert!(exceeds_threshold(&AccelSample::new(20.001, 0.0, 0.0), 20.0));
        assert!(!exceeds_threshold(&AccelSample::new(0.0, 0.0, 9.81), 20.0));
        // 12² + 16² = 20²
        assert!(!exceeds_threshold(&AccelSample::new(12.0, 16.0, 0.0), 20.0));
        assert!(exceeds_threshold(&AccelSample::new(12.0, 16.0, 0.1), 20.0));
    }

    #[test]
    fn test_no_cooldown_emits_every_sample() {
        let mut detector = ShakeDetector::new(20.0, Duration::ZERO);
        let now = Instant::now();
        let hard = AccelSample::new(25.0, 0.0, 0.0);

        assert!(detector.observe(&hard, now));
        assert!(detector.observe(&hard, now));
        assert!(detector.observe(&hard, now));
    }

    #[test]
    fn test_cooldown_suppresses_repeats() {
        let mut detector = ShakeDetector::new(20.0, Duration::from_millis(500));
        let start = Instant::now();
        let hard = AccelSample::new(25.0, 0.0, 0.0);

        assert!(detector.observe(&hard, start));
        assert!(!detector.observe(&hard, start + Duration::from_millis(200)));
        assert!(detector.observe(&hard, start + Duration::from_millis(500)));
    }

    #[test]
    fn test_channel_sensor_unregister() {
        let sensor = ChannelSensor::new();
        let reg = sensor.register(SamplingCadence::NORMAL).unwrap();
        assert_eq!(sensor.active_registrations(), 1);
        assert_eq!(sensor.push(AccelSample::new(1.0, 1.0, 1.0)), 1);

        sensor.unregister(reg.id);
        assert_eq!(sensor.active_registrations(), 0);
        assert_eq!(sensor.push(AccelSample::new(1.0, 1.0, 1.0)), 0);
    }

    #[test]
    fn test_guard_unregisters_on_drop() {
        let sensor = Arc::new(ChannelSensor::new());
        let reg = sensor.register(SamplingCadence::NORMAL).unwrap();
        let guard = SensorGuard::new(sensor.clone(), reg.id);
        assert_eq!(sensor.active_registrations(), 1);

        drop(guard);
        assert_eq!(sensor.active_registrations(), 0);
    }
}
