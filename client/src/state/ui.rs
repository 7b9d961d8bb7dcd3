//! Layout chrome state: theme and sidebar visibility.
//!
//! DESIGN
//! ======
//! Theme has one source of truth here, provided via context. The layout
//! initializes it from storage on mount and persists every change.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use crate::util::theme::Theme;

/// Viewports at or below this width use the overlay sidebar.
pub const MOBILE_QUERY: &str = "(max-width: 767px)";

#[derive(Clone, Debug)]
pub struct UiState {
    pub theme: Theme,
    pub sidebar_open: bool,
    pub is_mobile: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self { theme: Theme::Light, sidebar_open: true, is_mobile: false }
    }
}

impl UiState {
    /// Flip the theme and return the new value.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// Overlay click: only meaningful on narrow viewports.
    pub fn close_overlay(&mut self) {
        if self.is_mobile {
            self.sidebar_open = false;
        }
    }

    /// Narrow viewports start with the sidebar closed; wide ones keep it open.
    pub fn set_mobile(&mut self, is_mobile: bool) {
        self.is_mobile = is_mobile;
        self.sidebar_open = !is_mobile;
    }

    #[must_use]
    pub fn show_overlay(&self) -> bool {
        self.is_mobile && self.sidebar_open
    }
}
