// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client controller: screens, motion trigger and UI state.
//!
//! The controller reacts to user intents (navigate, sign in, upload) and to
//! shakes. Anything slow runs on spawned tasks whose results land in `watch`
//! channels, so the latest write wins:
//! - two challenge refreshes in flight race; the one resolving last is shown
//! - nothing is cancelled when the user navigates away
//!
//! Failures become [`Notice`]s; details only go to the log.

use crate::error::{AppError, PreconditionError};
use crate::models::challenge::{INITIAL_CHALLENGE_TEXT, NO_CHALLENGE_TEXT};
use crate::models::{NavItem, Notice, Route, Screen, UploadedImage};
use crate::services::{MotionTrigger, Navigator, TriggerState};
use crate::AppState;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Receiving end of the notice stream.
pub type NoticeReceiver = mpsc::UnboundedReceiver<Notice>;

/// The client controller. One per UI session.
pub struct ChallengeClient {
    state: Arc<AppState>,
    navigator: Navigator,
    trigger: MotionTrigger,
    challenge_text: Arc<watch::Sender<String>>,
    gallery: Arc<watch::Sender<Vec<UploadedImage>>>,
    notices: mpsc::UnboundedSender<Notice>,
}

impl ChallengeClient {
    /// Create a client on the home screen.
    pub fn new(state: Arc<AppState>) -> (Self, NoticeReceiver) {
        let (notices, notice_rx) = mpsc::unbounded_channel();
        let trigger = MotionTrigger::new(
            state.sensor.clone(),
            state.config.shake_threshold,
            state.config.shake_cooldown,
        );

        let client = Self {
            state,
            navigator: Navigator::default(),
            trigger,
            challenge_text: Arc::new(watch::Sender::new(INITIAL_CHALLENGE_TEXT.to_string())),
            gallery: Arc::new(watch::Sender::new(Vec::new())),
            notices,
        };
        (client, notice_rx)
    }

    pub fn route(&self) -> &Route {
        self.navigator.current()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.session.is_authenticated()
    }

    pub fn nav_options(&self) -> Vec<NavItem> {
        self.state.session.nav_options()
    }

    /// Switch screens and run the entry/exit effects of both screens.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn navigate(&mut self, target: &str) {
        let previous = self.navigator.navigate(target);
        let current = self.navigator.current().clone();
        tracing::info!(from = %previous, to = %current, "Navigate");

        if previous.is(Screen::Challenge) && !current.is(Screen::Challenge) {
            self.trigger.disarm();
        }

        match current.screen() {
            Some(Screen::Challenge) => self.arm_motion_trigger(),
            Some(Screen::Gallery) => {
                // Each visit starts from an empty gallery
                self.gallery.send_replace(Vec::new());
                self.load_gallery();
            }
            Some(Screen::Logout) => {
                self.state.identity.sign_out();
                self.gallery.send_replace(Vec::new());
                self.navigate(Screen::Home.id());
            }
            Some(_) => {}
            None => tracing::debug!(route = %current, "No screen for route"),
        }
    }

    /// Sign in and go to the challenge screen.
    pub async fn sign_in(&mut self, email: &str, password: &str) {
        match self.state.identity.sign_in(email, password).await {
            Ok(_) => self.navigate(Screen::Challenge.id()),
            Err(e) => {
                log_auth_failure("signInWithEmail", &e);
                self.notify(Notice::AuthenticationFailed);
            }
        }
    }

    /// Create an account and go to the login screen.
    pub async fn register(&mut self, email: &str, password: &str) {
        match self.state.identity.sign_up(email, password).await {
            Ok(_) => self.navigate(Screen::Login.id()),
            Err(e) => {
                log_auth_failure("createUserWithEmail", &e);
                self.notify(Notice::RegistrationFailed);
            }
        }
    }

    pub fn trigger_state(&self) -> TriggerState {
        self.trigger.state()
    }

    pub fn challenge_text(&self) -> String {
        self.challenge_text.borrow().clone()
    }

    pub fn subscribe_challenge_text(&self) -> watch::Receiver<String> {
        self.challenge_text.subscribe()
    }

    /// Start a challenge refresh, as a shake would.
    pub fn request_challenge(&self) -> JoinHandle<()> {
        spawn_refresh(&self.state, &self.challenge_text)
    }

    fn arm_motion_trigger(&mut self) {
        let state = self.state.clone();
        let text = self.challenge_text.clone();

        let armed = self.trigger.arm(move || {
            spawn_refresh(&state, &text);
        });
        if let Err(e) = armed {
            tracing::warn!(error = %e, "Failed to arm motion trigger");
        }
    }

    /// Upload a picked image for the signed-in user.
    pub async fn upload(&self, image: Option<Vec<u8>>, name: &str) {
        let uid = self.state.session.current_uid();

        let notice = match self.state.uploads.upload(image, name, uid.as_deref()).await {
            Ok(_) => Notice::UploadSucceeded,
            Err(AppError::Precondition(PreconditionError::MissingIdentity)) => Notice::LoginRequired,
            Err(AppError::Precondition(reason)) => {
                tracing::debug!(%reason, "Upload skipped");
                Notice::UploadInputMissing
            }
            Err(e) => {
                tracing::warn!(error = %e, name, "Upload failed");
                Notice::UploadFailed
            }
        };
        self.notify(notice);
    }

    pub fn gallery_images(&self) -> Vec<UploadedImage> {
        self.gallery.borrow().clone()
    }

    pub fn subscribe_gallery(&self) -> watch::Receiver<Vec<UploadedImage>> {
        self.gallery.subscribe()
    }

    /// Reload the gallery for the signed-in user.
    ///
    /// Does nothing when signed out. A failed listing shows an empty gallery.
    /// A listing that completes after the user changed is discarded.
    pub fn load_gallery(&self) -> Option<JoinHandle<()>> {
        let Some(uid) = self.state.session.current_uid() else {
            tracing::debug!("Gallery requested without a signed-in user");
            return None;
        };

        let state = self.state.clone();
        let gallery = self.gallery.clone();
        Some(tokio::spawn(async move {
            let images = match state.gallery.list(&uid).await {
                Ok(images) => images,
                Err(e) => {
                    tracing::warn!(error = %e, uid = %uid, "Failed to list gallery");
                    Vec::new()
                }
            };

            if state.session.current_uid().as_deref() != Some(uid.as_str()) {
                tracing::debug!(uid = %uid, "Discarding gallery of previous user");
                return;
            }
            gallery.send_replace(images);
        }))
    }

    fn notify(&self, notice: Notice) {
        tracing::debug!(%notice, "Notice");
        // A closed receiver just means nobody is showing notices
        let _ = self.notices.send(notice);
    }
}

/// Run one refresh on its own task; the result overwrites whatever is shown.
fn spawn_refresh(state: &Arc<AppState>, text: &Arc<watch::Sender<String>>) -> JoinHandle<()> {
    let selector = state.challenges.clone();
    let text = text.clone();
    tokio::spawn(async move {
        let shown = match selector.refresh().await {
            Some(challenge) => challenge.text,
            None => NO_CHALLENGE_TEXT.to_string(),
        };
        text.send_replace(shown);
    })
}

fn log_auth_failure(operation: &str, error: &AppError) {
    if error.is_credential_error() {
        tracing::info!(operation, error = %error, "Authentication rejected");
    } else {
        tracing::warn!(operation, error = %error, "Authentication failure");
    }
}
