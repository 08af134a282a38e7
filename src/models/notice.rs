// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! One-shot user notifications.

use std::fmt;

/// A transient, non-blocking message for the user.
///
/// Notices never carry error detail; that goes to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    AuthenticationFailed,
    RegistrationFailed,
    UploadSucceeded,
    UploadFailed,
    UploadInputMissing,
    LoginRequired,
}

impl Notice {
    pub fn text(&self) -> &'static str {
        match self {
            Notice::AuthenticationFailed => "Authentication failed.",
            Notice::RegistrationFailed => "Registration failed.",
            Notice::UploadSucceeded => "Image Uploaded Successfully",
            Notice::UploadFailed => "Failed to Upload Image",
            Notice::UploadInputMissing => "Please select an image and enter a name.",
            Notice::LoginRequired => "Please log in to upload images.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
