// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Navigation controller.

use crate::models::Route;

/// Holds the current route. No history: there is no "back".
#[derive(Debug, Default)]
pub struct Navigator {
    current: Route,
}

impl Navigator {
    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Switch to `target` unconditionally and return the previous route.
    pub fn navigate(&mut self, target: &str) -> Route {
        std::mem::replace(&mut self.current, Route::parse(target))
    }
}
