//! Files panel state: list, search filter, upload batch, and delete confirmation.

#[cfg(test)]
#[path = "files_test.rs"]
mod files_test;

use std::fmt::Display;

use model::UploadedFile;

pub const EMPTY_NO_FILES: &str = "No files uploaded yet";
pub const EMPTY_NO_MATCHES: &str = "No files match your search";

#[derive(Clone, Debug, Default)]
pub struct FilesState {
    pub files: Vec<UploadedFile>,
    pub query: String,
    pub uploading: bool,
    /// File awaiting delete confirmation.
    pub pending_delete: Option<UploadedFile>,
}

impl FilesState {
    pub fn load(&mut self, files: Vec<UploadedFile>) {
        self.files = files.into_iter().map(UploadedFile::normalized).collect();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Files whose name contains the query, case-insensitively.
    #[must_use]
    pub fn filtered(&self) -> Vec<UploadedFile> {
        let query = self.query.trim();
        if query.is_empty() {
            return self.files.clone();
        }
        self.files.iter().filter(|f| f.name_matches(query)).cloned().collect()
    }

    #[must_use]
    pub fn empty_message(&self) -> &'static str {
        if self.query.trim().is_empty() { EMPTY_NO_FILES } else { EMPTY_NO_MATCHES }
    }

    /// Start an upload batch. Returns `false` if one is already running.
    pub fn begin_upload(&mut self) -> bool {
        if self.uploading {
            return false;
        }
        self.uploading = true;
        true
    }

    /// Ingest a file returned by the backend, replacing any with the same id.
    pub fn apply_upload(&mut self, file: UploadedFile) {
        let file = file.normalized();
        match self.files.iter_mut().find(|f| f.id == file.id) {
            Some(existing) => *existing = file,
            None => self.files.push(file),
        }
    }

    pub fn finish_upload(&mut self) {
        self.uploading = false;
    }

    /// Ask for confirmation before deleting `id`. Returns `false` for unknown ids.
    pub fn request_delete(&mut self, id: &str) -> bool {
        self.pending_delete = self.files.iter().find(|f| f.id == id).cloned();
        self.pending_delete.is_some()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Take the confirmed file; the caller issues the backend delete.
    pub fn confirm_delete(&mut self) -> Option<UploadedFile> {
        self.pending_delete.take()
    }

    /// Remove exactly the entry with `id`. Returns whether one was removed.
    pub fn apply_delete(&mut self, id: &str) -> bool {
        match self.files.iter().position(|f| f.id == id) {
            Some(index) => {
                self.files.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Result of one file in an upload batch.
#[derive(Clone, Debug, PartialEq)]
pub enum UploadOutcome {
    Uploaded(UploadedFile),
    Failed { name: String, error: String },
}

/// Upload `items` one at a time, handing each outcome to `on_outcome` as it
/// lands. A failed file does not stop the batch; `on_outcome` returning
/// `false` does.
pub async fn upload_sequentially<T, F, Fut, E>(
    items: Vec<T>,
    name_of: impl Fn(&T) -> String,
    mut upload: F,
    mut on_outcome: impl FnMut(UploadOutcome) -> bool,
) where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<UploadedFile, E>>,
    E: Display,
{
    for item in items {
        let name = name_of(&item);
        let outcome = match upload(item).await {
            Ok(file) => UploadOutcome::Uploaded(file),
            Err(e) => UploadOutcome::Failed { name, error: e.to_string() },
        };
        if !on_outcome(outcome) {
            return;
        }
    }
}

#[must_use]
pub fn delete_prompt(name: &str) -> String {
    format!("Are you sure you want to delete \"{name}\"? This action cannot be undone.")
}
