//! Navigation addresses and intents.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque navigation destination, equivalent to a URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locator {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Locator {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// How the host is moving through its history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    /// Push a new entry.
    New,
    /// Pop to the previous entry.
    Back,
    /// Re-enter the next entry in forward history.
    Forward,
}

/// A navigation the host is about to perform, as reported by its
/// "leaving" event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationIntent {
    pub mode: NavigationMode,
    /// Destination, when the host knows it. Always present for `New`.
    pub target: Option<Locator>,
}

impl NavigationIntent {
    pub fn new(target: impl Into<Locator>) -> Self {
        Self {
            mode: NavigationMode::New,
            target: Some(target.into()),
        }
    }

    pub fn back() -> Self {
        Self {
            mode: NavigationMode::Back,
            target: None,
        }
    }

    pub fn forward() -> Self {
        Self {
            mode: NavigationMode::Forward,
            target: None,
        }
    }

    /// Attach the destination the host resolved for a back/forward move.
    pub fn with_target(mut self, target: impl Into<Locator>) -> Self {
        self.target = Some(target.into());
        self
    }
}
