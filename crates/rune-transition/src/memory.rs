//! In-memory navigation history.
//!
//! `MemoryNavigationHost` keeps a back/forward stack and records every
//! command it accepts, so headless drivers can replay them as page events
//! and tests can assert what was issued.

use std::cell::RefCell;
use std::collections::VecDeque;

use tracing::info;

use crate::error::{Result, TransitionError};
use crate::host::NavigationHost;
use crate::locator::Locator;

/// Navigation commands accepted by the in-memory host.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationCommand {
    /// Navigate to a locator, pushing the current entry.
    Navigate(Locator),
    /// Go back in history
    GoBack,
    /// Go forward in history
    GoForward,
}

#[derive(Debug, Default)]
struct History {
    back: Vec<Locator>,
    current: Option<Locator>,
    forward: Vec<Locator>,
    commands: VecDeque<NavigationCommand>,
    issued: Vec<NavigationCommand>,
    fail_next: Option<String>,
}

impl History {
    fn take_failure(&mut self, target: Option<&Locator>) -> Result<()> {
        match self.fail_next.take() {
            Some(reason) => Err(TransitionError::NavigationFailed {
                target: target
                    .or(self.current.as_ref())
                    .cloned()
                    .unwrap_or_else(|| Locator::new("")),
                reason,
            }),
            None => Ok(()),
        }
    }

    fn record(&mut self, command: NavigationCommand) {
        self.issued.push(command.clone());
        self.commands.push_back(command);
    }
}

/// Back/forward history held in memory.
///
/// Accepted commands queue up until the embedder drains them with
/// [`pop_command`](Self::pop_command). The [`issued`](Self::issued) log is
/// never trimmed and grows for the lifetime of the host.
#[derive(Debug, Default)]
pub struct MemoryNavigationHost {
    history: RefCell<History>,
}

impl MemoryNavigationHost {
    /// Create a history whose current entry is `start`.
    pub fn new(start: impl Into<Locator>) -> Self {
        let host = Self::default();
        host.history.borrow_mut().current = Some(start.into());
        host
    }

    /// Make the next navigation call fail with `reason`.
    pub fn fail_next(&self, reason: impl Into<String>) {
        self.history.borrow_mut().fail_next = Some(reason.into());
    }

    /// Pop the next accepted command, oldest first.
    pub fn pop_command(&self) -> Option<NavigationCommand> {
        self.history.borrow_mut().commands.pop_front()
    }

    pub fn has_pending_commands(&self) -> bool {
        !self.history.borrow().commands.is_empty()
    }

    /// Every command accepted since creation, including popped ones.
    pub fn issued(&self) -> Vec<NavigationCommand> {
        self.history.borrow().issued.clone()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.history.borrow().forward.is_empty()
    }
}

impl NavigationHost for MemoryNavigationHost {
    fn can_go_back(&self) -> bool {
        !self.history.borrow().back.is_empty()
    }

    fn current_locator(&self) -> Option<Locator> {
        self.history.borrow().current.clone()
    }

    fn navigate(&self, target: &Locator) -> Result<()> {
        let mut history = self.history.borrow_mut();
        history.take_failure(Some(target))?;
        info!(%target, "navigate");
        if let Some(current) = history.current.replace(target.clone()) {
            history.back.push(current);
        }
        history.forward.clear();
        history.record(NavigationCommand::Navigate(target.clone()));
        Ok(())
    }

    fn go_back(&self) -> Result<()> {
        let mut history = self.history.borrow_mut();
        history.take_failure(None)?;
        let previous = history.back.pop().ok_or(TransitionError::NoBackEntry)?;
        info!(target = %previous, "go back");
        if let Some(current) = history.current.replace(previous) {
            history.forward.push(current);
        }
        history.record(NavigationCommand::GoBack);
        Ok(())
    }

    fn go_forward(&self) -> Result<()> {
        let mut history = self.history.borrow_mut();
        history.take_failure(None)?;
        let next = history.forward.pop().ok_or(TransitionError::NoForwardEntry)?;
        info!(target = %next, "go forward");
        if let Some(current) = history.current.replace(next) {
            history.back.push(current);
        }
        history.record(NavigationCommand::GoForward);
        Ok(())
    }
}
