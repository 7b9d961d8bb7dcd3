//! Non-modal notification stack.

#[cfg(test)]
#[path = "toasts_test.rs"]
mod toasts_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Error,
}

impl ToastVariant {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "toast toast--success",
            Self::Error => "toast toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

#[derive(Clone, Debug)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    pub max_visible: usize,
    next_id: u64,
}

impl Default for ToastState {
    fn default() -> Self {
        Self::with_limit(3)
    }
}

impl ToastState {
    #[must_use]
    pub fn with_limit(max_visible: usize) -> Self {
        Self { toasts: Vec::new(), max_visible: max_visible.max(1), next_id: 1 }
    }

    /// Show a toast, dropping the oldest beyond the limit. Returns its id.
    pub fn push(&mut self, title: impl Into<String>, description: impl Into<String>, variant: ToastVariant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast { id, title: title.into(), description: description.into(), variant });
        let overflow = self.toasts.len().saturating_sub(self.max_visible);
        self.toasts.drain(..overflow);
        id
    }

    pub fn success(&mut self, description: impl Into<String>) -> u64 {
        self.push("Success", description, ToastVariant::Success)
    }

    pub fn error(&mut self, description: impl Into<String>) -> u64 {
        self.push("Error", description, ToastVariant::Error)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }
}
