//! Local input mode shared by every proxy.

use std::sync::atomic::{AtomicBool, Ordering};

/// Flags owned by the input layer.
///
/// Selection state is only meaningful while user input is enabled; with it
/// off, every unit reports itself unselected.
#[derive(Debug, Default)]
pub struct InputFlags {
    user_input: AtomicBool,
}

impl InputFlags {
    /// Creates the flags with user input on or off.
    #[must_use]
    pub fn new(user_input: bool) -> Self {
        Self {
            user_input: AtomicBool::new(user_input),
        }
    }

    /// Returns whether user input is enabled.
    #[inline]
    #[must_use]
    pub fn user_input_enabled(&self) -> bool {
        self.user_input.load(Ordering::Acquire)
    }

    /// Turns user input on or off.
    #[inline]
    pub fn set_user_input(&self, enabled: bool) {
        self.user_input.store(enabled, Ordering::Release);
    }
}
