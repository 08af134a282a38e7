// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Uploaded image naming.
//!
//! Images live under `images/{uid}-{name}.jpg`. Ownership is a naming
//! convention only: the `{uid}-` prefix is what the gallery filters on, and
//! re-using a name overwrites the earlier upload.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Folder holding every user's uploads.
pub const IMAGES_PREFIX: &str = "images/";
/// Extension appended to every uploaded object.
pub const IMAGE_EXTENSION: &str = ".jpg";
/// Content type sent with uploads.
pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Storage key for an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageKey(String);

impl ImageKey {
    /// Build `images/{uid}-{name}.jpg`.
    pub fn for_upload(uid: &str, name: &str) -> Self {
        Self(format!(
            "{}{}{}",
            IMAGES_PREFIX,
            file_name(uid, name),
            IMAGE_EXTENSION
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn file_name(uid: &str, name: &str) -> String {
    format!("{}-{}", uid, name)
}

/// Prefix every file name of `uid` starts with.
pub fn owner_prefix(uid: &str) -> String {
    file_name(uid, "")
}

/// Reference to an object in the blob store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectHandle {
    /// Full object path, e.g. `images/u1-sunset.jpg`
    pub full_path: String,
    /// Final path segment, e.g. `u1-sunset.jpg`
    pub name: String,
}

impl ObjectHandle {
    pub fn from_path(full_path: impl Into<String>) -> Self {
        let full_path = full_path.into();
        let name = full_path
            .rsplit('/')
            .next()
            .unwrap_or(full_path.as_str())
            .to_string();
        Self { full_path, name }
    }

    /// True if this object was uploaded by `uid`.
    pub fn is_owned_by(&self, uid: &str) -> bool {
        self.name.starts_with(&owner_prefix(uid))
    }

    /// Recover the user-supplied name by stripping `{uid}-` and `.jpg`.
    ///
    /// Only one prefix and one suffix are removed, so names containing `-` or
    /// `.` come back intact. Names containing `/` never get here: they were
    /// stored in a sub-folder that the gallery listing does not descend into.
    pub fn display_name(&self, uid: &str) -> String {
        let prefix = owner_prefix(uid);
        let name = self.name.strip_prefix(&prefix).unwrap_or(&self.name);
        name.strip_suffix(IMAGE_EXTENSION).unwrap_or(name).to_string()
    }
}

/// A gallery entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    /// Name the user entered at upload time
    pub name: String,
    /// Fetchable download URL
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_key_format() {
        let key = ImageKey::for_upload("abc123", "sunset");
        assert_eq!(key.as_str(), "images/abc123-sunset.jpg");
    }

    #[test]
    fn test_handle_from_path() {
        let handle = ObjectHandle::from_path("images/abc123-sunset.jpg");
        assert_eq!(handle.name, "abc123-sunset.jpg");
        assert_eq!(handle.full_path, "images/abc123-sunset.jpg");

        let bare = ObjectHandle::from_path("loose.jpg");
        assert_eq!(bare.name, "loose.jpg");
    }

    #[test]
    fn test_ownership_requires_separator() {
        let handle = ObjectHandle::from_path("images/abc123-sunset.jpg");
        assert!(handle.is_owned_by("abc123"));
        assert!(!handle.is_owned_by("abc"));
        assert!(!handle.is_owned_by("abc1234"));
    }

    #[test]
    fn test_display_name_round_trip() {
        let key = ImageKey::for_upload("abc123", "sunset");
        let handle = ObjectHandle::from_path(key.as_str());
        assert_eq!(handle.display_name("abc123"), "sunset");
    }

    #[test]
    fn test_display_name_with_separators() {
        let key = ImageKey::for_upload("abc123", "beach-day.v2.jpg");
        let handle = ObjectHandle::from_path(key.as_str());
        assert_eq!(handle.display_name("abc123"), "beach-day.v2.jpg");
    }

    #[test]
    fn test_slash_in_name_leaves_images_folder() {
        let key = ImageKey::for_upload("abc123", "trip/day1");
        let handle = ObjectHandle::from_path(key.as_str());
        // The final segment no longer carries the owner prefix
        assert_eq!(handle.name, "day1.jpg");
        assert!(!handle.is_owned_by("abc123"));
    }
}
