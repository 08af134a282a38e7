// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session gate: decides which navigation targets are offered.

use crate::models::{NavItem, Screen};
use crate::services::identity::IdentityService;
use std::sync::Arc;

#[derive(Clone)]
pub struct SessionGate {
    identity: Arc<dyn IdentityService>,
}

impl SessionGate {
    pub fn new(identity: Arc<dyn IdentityService>) -> Self {
        Self { identity }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.current_identity().is_some()
    }

    /// UID of the signed-in user, if any.
    pub fn current_uid(&self) -> Option<String> {
        self.identity.current_identity().map(|identity| identity.uid)
    }

    /// Navigation bar entries. The challenge screen is offered to everyone.
    pub fn nav_options(&self) -> Vec<NavItem> {
        let screens: &[Screen] = if self.is_authenticated() {
            &[Screen::Home, Screen::Challenge, Screen::Gallery, Screen::Logout]
        } else {
            &[Screen::Home, Screen::Challenge, Screen::Login]
        };
        screens.iter().copied().map(NavItem::from).collect()
    }
}
