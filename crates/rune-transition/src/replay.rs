//! Deferred navigation replay.
//!
//! An intercepted navigation is re-issued from the dispatch queue once the
//! outro has finished, after the event that completed it has unwound.

use std::rc::Rc;

use tracing::{info, warn};

use crate::coordinator::TransitionCoordinator;
use crate::error::{Result, TransitionError};
use crate::events::TransitionEvent;
use crate::host::NavigationHost;
use crate::locator::{NavigationIntent, NavigationMode};

/// Issue `intent` against the host right away.
pub fn issue(host: &dyn NavigationHost, intent: &NavigationIntent) -> Result<()> {
    match intent.mode {
        NavigationMode::New => {
            let target = intent.target.as_ref().ok_or(TransitionError::MissingTarget)?;
            host.navigate(target)
        }
        NavigationMode::Back => host.go_back(),
        NavigationMode::Forward => host.go_forward(),
    }
}

/// Queue the replay of `intent` and the release of the navigation latch.
///
/// A failed replay is logged and dropped; the latch is released either way.
pub(crate) fn schedule(
    coordinator: &TransitionCoordinator,
    host: Rc<dyn NavigationHost>,
    page: String,
    intent: NavigationIntent,
) {
    let dispatcher = coordinator.dispatcher().clone();
    let coordinator = coordinator.clone();
    dispatcher.post(move || {
        match issue(host.as_ref(), &intent) {
            Ok(()) => {
                info!(%page, mode = ?intent.mode, "replayed deferred navigation");
                coordinator.emit(TransitionEvent::NavigationReplayed {
                    page: page.clone(),
                    mode: intent.mode,
                    target: intent.target.clone(),
                });
            }
            Err(error) => {
                warn!(%page, mode = ?intent.mode, %error, "deferred navigation failed");
                coordinator.emit(TransitionEvent::ReplayFailed {
                    page: page.clone(),
                    mode: intent.mode,
                    error: error.to_string(),
                });
            }
        }
        coordinator.release(&page);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::DispatchQueue;
    use crate::locator::Locator;
    use crate::memory::{MemoryNavigationHost, NavigationCommand};

    #[test]
    fn test_issue_maps_modes() {
        let host = MemoryNavigationHost::new("/a");
        issue(&host, &NavigationIntent::new("/b")).unwrap();
        issue(&host, &NavigationIntent::back()).unwrap();
        issue(&host, &NavigationIntent::forward()).unwrap();
        assert_eq!(
            host.issued(),
            vec![
                NavigationCommand::Navigate(Locator::from("/b")),
                NavigationCommand::GoBack,
                NavigationCommand::GoForward,
            ]
        );
    }

    #[test]
    fn test_new_without_target() {
        let host = MemoryNavigationHost::new("/a");
        let intent = NavigationIntent {
            mode: NavigationMode::New,
            target: None,
        };
        assert_eq!(issue(&host, &intent), Err(TransitionError::MissingTarget));
    }

    #[test]
    fn test_schedule_runs_on_next_cycle_and_releases() {
        let dispatcher = DispatchQueue::new();
        let coordinator = TransitionCoordinator::new(dispatcher.clone());
        let host = Rc::new(MemoryNavigationHost::new("/a"));
        assert!(coordinator.try_acquire("p1"));

        schedule(&coordinator, host.clone(), "p1".into(), NavigationIntent::new("/b"));
        assert!(host.issued().is_empty());
        assert!(coordinator.is_navigation_in_flight());

        dispatcher.run_pending();
        assert_eq!(host.issued().len(), 1);
        assert!(!coordinator.is_navigation_in_flight());
        assert!(matches!(
            coordinator.drain_events().as_slice(),
            [TransitionEvent::NavigationReplayed { .. }]
        ));
    }

    #[test]
    fn test_failed_replay_still_releases() {
        let dispatcher = DispatchQueue::new();
        let coordinator = TransitionCoordinator::new(dispatcher.clone());
        let host = Rc::new(MemoryNavigationHost::new("/a"));
        assert!(coordinator.try_acquire("p1"));

        schedule(&coordinator, host.clone(), "p1".into(), NavigationIntent::back());
        dispatcher.run_pending();

        assert!(!coordinator.is_navigation_in_flight());
        let events = coordinator.drain_events();
        assert!(matches!(
            events.as_slice(),
            [TransitionEvent::ReplayFailed { mode: NavigationMode::Back, .. }]
        ));
    }
}
