//! Input mapping: raw window events reduced to shared actions.
//!
//! # Invariants
//! - The quit flag latches: once set it is never cleared for the process
//!   lifetime.
//! - No key other than the designated cancel key has any effect.

use tracing::debug;

/// A high-level action produced from raw input.
///
/// The frame loop consumes actions, never raw key events, so the windowing
/// layer can change without touching loop logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the frame loop before the next frame.
    Quit,
    /// Input that has no binding.
    Noop,
}

/// Latched quit state fed by the event loop.
#[derive(Debug, Default)]
pub struct Controller {
    quit: bool,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one action. [`Action::Quit`] latches; everything else is
    /// ignored.
    pub fn apply(&mut self, action: Action) {
        if action == Action::Quit && !self.quit {
            debug!("quit requested");
            self.quit = true;
        }
    }

    /// Whether a quit has been requested since process start.
    pub fn quit(&self) -> bool {
        self.quit
    }
}

pub fn crate_info() -> &'static str {
    "zenu-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_latches() {
        let mut controller = Controller::new();
        assert!(!controller.quit());
        controller.apply(Action::Quit);
        assert!(controller.quit());
        controller.apply(Action::Noop);
        assert!(controller.quit());
    }

    #[test]
    fn noop_has_no_effect() {
        let mut controller = Controller::new();
        controller.apply(Action::Noop);
        assert!(!controller.quit());
    }
}
