// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Screens and navigation routes.

use std::fmt;
use std::str::FromStr;

/// One of the fixed set of client screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    Login,
    Register,
    Challenge,
    Gallery,
    Logout,
}

impl Screen {
    pub const ALL: [Screen; 6] = [
        Screen::Home,
        Screen::Login,
        Screen::Register,
        Screen::Challenge,
        Screen::Gallery,
        Screen::Logout,
    ];

    /// Identifier used when navigating ("home", "gallery", ...).
    pub fn id(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Login => "login",
            Screen::Register => "register",
            Screen::Challenge => "challenge",
            Screen::Gallery => "gallery",
            Screen::Logout => "logout",
        }
    }

    /// Label shown on the navigation bar button for this screen.
    pub fn nav_label(&self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Login => "Log in",
            Screen::Register => "Register",
            Screen::Challenge => "Challenge",
            Screen::Gallery => "Challenge\nGallery",
            Screen::Logout => "Log out",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error for identifiers that name no screen.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown screen: {0}")]
pub struct UnknownScreen(pub String);

impl FromStr for Screen {
    type Err = UnknownScreen;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::ALL
            .into_iter()
            .find(|screen| screen.id() == s)
            .ok_or_else(|| UnknownScreen(s.to_string()))
    }
}

/// The navigation state: a known screen, or whatever identifier was last
/// navigated to when it names no screen. An unrecognized route renders nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Screen(Screen),
    Unrecognized(String),
}

impl Route {
    /// Parse a navigation target. Never fails.
    pub fn parse(target: &str) -> Self {
        match target.parse::<Screen>() {
            Ok(screen) => Route::Screen(screen),
            Err(UnknownScreen(raw)) => Route::Unrecognized(raw),
        }
    }

    /// The screen to render, if any.
    pub fn screen(&self) -> Option<Screen> {
        match self {
            Route::Screen(screen) => Some(*screen),
            Route::Unrecognized(_) => None,
        }
    }

    pub fn is(&self, screen: Screen) -> bool {
        self.screen() == Some(screen)
    }
}

impl Default for Route {
    fn default() -> Self {
        Route::Screen(Screen::Home)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Screen(screen) => write!(f, "{}", screen),
            Route::Unrecognized(raw) => write!(f, "{}", raw),
        }
    }
}

/// A navigation bar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub screen: Screen,
    pub label: &'static str,
}

impl From<Screen> for NavItem {
    fn from(screen: Screen) -> Self {
        Self {
            screen,
            label: screen.nav_label(),
        }
    }
}
