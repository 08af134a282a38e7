// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Challenge phrases and the store documents they are read from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field of a challenge document that holds the phrase.
pub const NAME_FIELD: &str = "name";

/// Text shown before the first shake.
pub const INITIAL_CHALLENGE_TEXT: &str = "Shake your phone to get a new challenge!";

/// Text shown when a refresh produced nothing to display.
pub const NO_CHALLENGE_TEXT: &str = "No challenge found";

/// A photography challenge phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub text: String,
}

impl Challenge {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A document as returned by the document store: an ID and its string fields.
///
/// Non-string fields are dropped by the store adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub fields: BTreeMap<String, String>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style helper to set a string field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Read a named string field.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The challenge phrase held by this document, if it has one.
    pub fn challenge(&self) -> Option<Challenge> {
        self.get_string(NAME_FIELD).map(Challenge::new)
    }
}
