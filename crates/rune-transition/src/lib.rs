//! Animated page transitions for stack-based navigation.
//!
//! This crate turns an instantaneous page swap into an outro/intro pair:
//! - **Interception**: the host's "leaving" and hardware-back events are
//!   cancelled while the outgoing page plays its outro
//! - **Replay**: the cancelled navigation is re-issued from the UI dispatch
//!   queue once the outro completes
//! - **Reveal**: the arriving page stays hidden until its first layout pass,
//!   then plays its intro
//! - **Serialization**: a shared [`TransitionCoordinator`] latch keeps at
//!   most one outro → navigate → intro sequence in flight
//!
//! # Architecture
//!
//! ```text
//! host events ──▶ PageTransitions ──▶ TransitionHooks::select_animation
//!                   │    ▲                      │
//!                   │    └── completion ◀───────┘
//!                   ▼
//!             DispatchQueue ──▶ replay ──▶ NavigationHost
//! ```

pub mod animation;
pub mod coordinator;
pub mod dispatch;
pub mod easing;
pub mod error;
pub mod events;
pub mod hooks;
pub mod host;
pub mod layout_gate;
pub mod locator;
pub mod memory;
pub mod page;
pub mod replay;
pub mod turnstile;

pub use animation::{AnimationHandle, Completion, TransitionKind};
pub use coordinator::TransitionCoordinator;
pub use dispatch::DispatchQueue;
pub use easing::Easing;
pub use error::{Result, TransitionError};
pub use events::{EventQueue, RejectReason, TransitionEvent};
pub use hooks::{DefaultHooks, TransitionHooks};
pub use host::{AnimationSurface, NavigationHost};
pub use layout_gate::LayoutReadinessGate;
pub use locator::{Locator, NavigationIntent, NavigationMode};
pub use memory::{MemoryNavigationHost, NavigationCommand};
pub use page::{LeaveDecision, PageTransitions, Phase};
pub use turnstile::{DispatchDriver, EffectDriver, TurnstileAnimation, TurnstileEffect, TurnstileFrame, TurnstileSet};
