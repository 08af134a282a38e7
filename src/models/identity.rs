// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Signed-in user identity.

use std::fmt;

/// The identity of the currently signed-in user.
///
/// Owned by the identity service; the rest of the client only reads `uid`.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    /// Stable user identifier (Firebase `localId`)
    pub uid: String,
    /// Email address the user signed in with
    pub email: Option<String>,
    /// Bearer token for the storage backend
    pub id_token: String,
}

impl Identity {
    pub fn new(uid: impl Into<String>, email: Option<String>, id_token: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email,
            id_token: id_token.into(),
        }
    }
}

// The token is a credential and must never end up in logs.
impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("uid", &self.uid)
            .field("email", &self.email)
            .field("id_token", &"<redacted>")
            .finish()
    }
}
