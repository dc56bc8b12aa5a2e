//! One-shot wait for the first layout pass after arrival.

use std::cell::RefCell;
use std::fmt;

use crate::animation::Completion;

/// Holds at most one callback and runs it on the next layout notification.
///
/// Registering again replaces a callback that has not fired yet. The
/// callback is taken out before it runs, so it may re-register.
#[derive(Default)]
pub struct LayoutReadinessGate {
    pending: RefCell<Option<Completion>>,
}

impl LayoutReadinessGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` exactly once on the next layout completion.
    pub fn on_first_layout(&self, callback: Completion) {
        *self.pending.borrow_mut() = Some(callback);
    }

    /// Report a completed layout pass. Returns whether a callback fired.
    pub fn notify_layout(&self) -> bool {
        let callback = self.pending.borrow_mut().take();
        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.pending.borrow().is_some()
    }
}

impl fmt::Debug for LayoutReadinessGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutReadinessGate")
            .field("waiting", &self.is_waiting())
            .finish()
    }
}
