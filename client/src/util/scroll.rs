//! Chat follow-the-tail scroll state, independent of the DOM.
//!
//! The list follows new messages while the viewport is within
//! `NEAR_BOTTOM_THRESHOLD` of the bottom. Scrolling further up pauses
//! following; growth while paused raises a "jump to latest" affordance.

#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

/// Distance from the bottom, in CSS pixels, that still counts as "at the tail".
pub const NEAR_BOTTOM_THRESHOLD: f64 = 100.0;

#[must_use]
pub fn distance_from_bottom(scroll_height: f64, scroll_top: f64, client_height: f64) -> f64 {
    (scroll_height - scroll_top - client_height).max(0.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollFollow {
    following: bool,
    has_unseen: bool,
}

impl Default for ScrollFollow {
    fn default() -> Self {
        Self { following: true, has_unseen: false }
    }
}

impl ScrollFollow {
    #[must_use]
    pub fn is_following(self) -> bool {
        self.following
    }

    /// True when the "jump to latest" affordance should show.
    #[must_use]
    pub fn show_jump(self) -> bool {
        !self.following && self.has_unseen
    }

    /// Record a user scroll at `distance` from the bottom.
    pub fn on_scroll(&mut self, distance: f64) {
        self.following = distance <= NEAR_BOTTOM_THRESHOLD;
        if self.following {
            self.has_unseen = false;
        }
    }

    /// The list grew. Returns whether the view should scroll to the bottom.
    pub fn on_growth(&mut self) -> bool {
        if self.following {
            return true;
        }
        self.has_unseen = true;
        false
    }

    /// Explicit jump to the newest message; resumes following.
    pub fn jump(&mut self) {
        self.following = true;
        self.has_unseen = false;
    }
}
