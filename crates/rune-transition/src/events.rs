//! Transition lifecycle events.
//!
//! Every page pushes its events onto the coordinator's shared
//! [`EventQueue`]; embedders drain it after pumping the dispatch queue.
//!
//! ```ignore
//! queue.run_until_idle(16);
//! for event in coordinator.drain_events() {
//!     if let TransitionEvent::Completed { page, kind } = event {
//!         println!("{page} finished {kind:?}");
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::animation::TransitionKind;
use crate::locator::{Locator, NavigationMode};

/// Why an interception or back press was not turned into a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Another page holds the navigation latch.
    NavigationInFlight,
    /// This page is still playing an animation.
    Animating,
    /// This page has not finished revealing after arrival.
    Revealing,
}

/// Event emitted as a page transition progresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransitionEvent {
    /// An outro or intro animation was handed to the animation provider.
    Started {
        /// Page playing the animation.
        page: String,
        /// Transition being played.
        kind: TransitionKind,
    },
    /// The shared completion handler ran for a transition.
    Completed {
        /// Page that finished.
        page: String,
        /// Transition that finished.
        kind: TransitionKind,
    },
    /// The deferred navigation was issued against the host.
    NavigationReplayed {
        /// Page that deferred the navigation.
        page: String,
        /// Replayed mode.
        mode: NavigationMode,
        /// Destination, if known.
        target: Option<Locator>,
    },
    /// The host rejected the deferred navigation; it is dropped.
    ReplayFailed {
        /// Page that deferred the navigation.
        page: String,
        /// Mode that failed.
        mode: NavigationMode,
        /// Rendered host error.
        error: String,
    },
    /// A leave or back press arrived while a transition was running.
    InterceptionRejected {
        /// Page that received the request.
        page: String,
        /// Which guard rejected it.
        reason: RejectReason,
    },
}

impl TransitionEvent {
    /// Get the page ID for this event.
    pub fn page(&self) -> &str {
        match self {
            Self::Started { page, .. }
            | Self::Completed { page, .. }
            | Self::NavigationReplayed { page, .. }
            | Self::ReplayFailed { page, .. }
            | Self::InterceptionRejected { page, .. } => page,
        }
    }

    /// Transition kind, for the events that carry one.
    pub fn kind(&self) -> Option<TransitionKind> {
        match self {
            Self::Started { kind, .. } | Self::Completed { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Queue for collecting transition events between dispatch cycles.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<TransitionEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TransitionEvent) {
        self.events.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Drain all events from the queue, returning an iterator.
    pub fn drain(&mut self) -> impl Iterator<Item = TransitionEvent> + '_ {
        self.events.drain(..)
    }

    /// Get events for a specific page.
    pub fn events_for_page(&self, page: &str) -> Vec<&TransitionEvent> {
        self.events.iter().filter(|e| e.page() == page).collect()
    }
}
