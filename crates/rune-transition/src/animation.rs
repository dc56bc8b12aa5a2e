//! Transition kinds and the animation handle contract.

use serde::{Deserialize, Serialize};

/// Callback run once an animation has finished.
pub type Completion = Box<dyn FnOnce()>;

/// Which half of a page transition is playing, and in which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Arriving at a freshly pushed page.
    ForwardIn,
    /// Leaving a page for a new one.
    ForwardOut,
    /// Arriving back at a page from history.
    BackwardIn,
    /// Leaving a page by going back.
    BackwardOut,
}

impl TransitionKind {
    pub const ALL: [TransitionKind; 4] = [
        Self::ForwardIn,
        Self::ForwardOut,
        Self::BackwardIn,
        Self::BackwardOut,
    ];

    /// True for the intro half of a transition.
    pub fn is_intro(self) -> bool {
        matches!(self, Self::ForwardIn | Self::BackwardIn)
    }

    pub fn is_outro(self) -> bool {
        !self.is_intro()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ForwardIn => "forward-in",
            Self::ForwardOut => "forward-out",
            Self::BackwardIn => "backward-in",
            Self::BackwardOut => "backward-out",
        }
    }
}

/// A ready-to-run animation produced by the animation provider.
///
/// `begin` must return immediately; `on_complete` is expected to run later
/// from the UI dispatch queue. An animation that never completes strands
/// its page in the animating state.
pub trait AnimationHandle {
    fn begin(self: Box<Self>, on_complete: Completion);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intro_outro_split() {
        let intros: Vec<_> = TransitionKind::ALL
            .iter()
            .filter(|k| k.is_intro())
            .collect();
        assert_eq!(intros, [&TransitionKind::ForwardIn, &TransitionKind::BackwardIn]);
        assert!(TransitionKind::BackwardOut.is_outro());
        assert_eq!(TransitionKind::ForwardOut.name(), "forward-out");
    }
}
