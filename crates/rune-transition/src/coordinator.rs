//! Process-wide transition coordination.
//!
//! One [`TransitionCoordinator`] is shared by every page of an application
//! (clones share state). It holds the navigation latch that serializes
//! outro → navigate → intro sequences across pages, the locator of the page
//! most recently left, and the event queue listeners drain.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use rune_config::TransitionsConfig;
use tracing::debug;

use crate::dispatch::DispatchQueue;
use crate::events::{EventQueue, TransitionEvent};
use crate::locator::Locator;

struct Shared {
    navigation_in_flight: Cell<bool>,
    last_departure: RefCell<Option<Locator>>,
    external_locator: Locator,
    dispatcher: DispatchQueue,
    events: RefCell<EventQueue>,
}

/// Shared serialization point for page transitions.
#[derive(Clone)]
pub struct TransitionCoordinator {
    shared: Rc<Shared>,
}

impl TransitionCoordinator {
    pub fn new(dispatcher: DispatchQueue) -> Self {
        Self::with_external_locator(dispatcher, Locator::new(rune_config::DEFAULT_EXTERNAL_LOCATOR))
    }

    pub fn with_external_locator(dispatcher: DispatchQueue, external_locator: Locator) -> Self {
        Self {
            shared: Rc::new(Shared {
                navigation_in_flight: Cell::new(false),
                last_departure: RefCell::new(None),
                external_locator,
                dispatcher,
                events: RefCell::new(EventQueue::new()),
            }),
        }
    }

    pub fn from_config(config: &TransitionsConfig, dispatcher: DispatchQueue) -> Self {
        Self::with_external_locator(dispatcher, Locator::new(config.external_locator.clone()))
    }

    /// True while some page has committed to an outro and its navigation
    /// has not been replayed yet.
    pub fn is_navigation_in_flight(&self) -> bool {
        self.shared.navigation_in_flight.get()
    }

    /// Take the latch. Returns false, leaving state untouched, if it is
    /// already held.
    pub(crate) fn try_acquire(&self, page: &str) -> bool {
        if self.shared.navigation_in_flight.replace(true) {
            return false;
        }
        debug!(page, "navigation latch acquired");
        true
    }

    pub(crate) fn release(&self, page: &str) {
        if self.shared.navigation_in_flight.replace(false) {
            debug!(page, "navigation latch released");
        }
    }

    /// Locator of the page most recently left.
    pub fn last_departure(&self) -> Option<Locator> {
        self.shared.last_departure.borrow().clone()
    }

    pub(crate) fn record_departure(&self, locator: Option<Locator>) {
        *self.shared.last_departure.borrow_mut() = locator;
    }

    pub fn external_locator(&self) -> &Locator {
        &self.shared.external_locator
    }

    /// Whether `locator` leaves the application entirely.
    pub fn is_external(&self, locator: &Locator) -> bool {
        *locator == self.shared.external_locator
    }

    pub fn dispatcher(&self) -> &DispatchQueue {
        &self.shared.dispatcher
    }

    pub(crate) fn emit(&self, event: TransitionEvent) {
        self.shared.events.borrow_mut().push(event);
    }

    /// Take every event emitted since the last drain.
    pub fn drain_events(&self) -> Vec<TransitionEvent> {
        self.shared.events.borrow_mut().drain().collect()
    }

    pub fn pending_events(&self) -> usize {
        self.shared.events.borrow().len()
    }
}

impl fmt::Debug for TransitionCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionCoordinator")
            .field("navigation_in_flight", &self.is_navigation_in_flight())
            .field("last_departure", &self.last_departure())
            .field("external_locator", &self.shared.external_locator)
            .finish()
    }
}
