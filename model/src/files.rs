//! Uploaded file metadata.

#[cfg(test)]
#[path = "files_test.rs"]
mod files_test;

use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// Whether a MIME type string denotes an image (and therefore gets a thumbnail).
#[must_use]
pub fn is_image_type(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// Metadata for one uploaded file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: String,
    pub name: String,
    /// MIME type string as reported by the uploader.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
    pub uploaded_at: Timestamp,
    /// Locator for the file content.
    pub url: String,
    /// Locator for a preview image; only present for image types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl UploadedFile {
    #[must_use]
    pub fn is_image(&self) -> bool {
        is_image_type(&self.mime_type)
    }

    /// True when `thumbnail_url` is present exactly for image types.
    #[must_use]
    pub fn has_consistent_thumbnail(&self) -> bool {
        self.is_image() == self.thumbnail_url.is_some()
    }

    /// Enforce the thumbnail invariant: non-images lose any thumbnail, and an
    /// image without one previews its own content URL.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.is_image() {
            if self.thumbnail_url.is_none() {
                self.thumbnail_url = Some(self.url.clone());
            }
        } else {
            self.thumbnail_url = None;
        }
        self
    }

    /// Case-insensitive substring match on the file name.
    #[must_use]
    pub fn name_matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}
