//! Built-in four-way turnstile effect set.
//!
//! A turnstile swings the page about its vertical axis like a door. The
//! outgoing page swings away, the incoming one swings into place, and the
//! swing direction mirrors for backward navigation.
//!
//! | kind          | rotation (deg) |
//! |---------------|----------------|
//! | `ForwardIn`   | -80 → 0        |
//! | `ForwardOut`  | 0 → 50         |
//! | `BackwardIn`  | 50 → 0         |
//! | `BackwardOut` | 0 → -80        |
//!
//! Drawing frames belongs to an [`EffectDriver`]; this module only
//! describes the motion.

use std::rc::Rc;

use rune_config::TurnstileConfig;
use tracing::{trace, warn};

use crate::animation::{AnimationHandle, Completion, TransitionKind};
use crate::dispatch::DispatchQueue;
use crate::easing::Easing;
use crate::host::AnimationSurface;

/// A single sampled frame of a turnstile effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnstileFrame {
    /// Linear progress in `[0, 1]`.
    pub progress: f32,
    /// Rotation about the vertical axis in degrees.
    pub rotation_y_deg: f32,
}

/// Motion description for one transition kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnstileEffect {
    pub kind: TransitionKind,
    pub from_deg: f32,
    pub to_deg: f32,
    pub duration_ms: f32,
    pub easing: Easing,
}

impl TurnstileEffect {
    pub fn for_kind(kind: TransitionKind, duration_ms: f32, easing: Easing) -> Self {
        let (from_deg, to_deg) = match kind {
            TransitionKind::ForwardIn => (-80.0, 0.0),
            TransitionKind::ForwardOut => (0.0, 50.0),
            TransitionKind::BackwardIn => (50.0, 0.0),
            TransitionKind::BackwardOut => (0.0, -80.0),
        };
        Self {
            kind,
            from_deg,
            to_deg,
            duration_ms,
            easing,
        }
    }

    /// Sample the effect `elapsed_ms` after it started.
    pub fn sample(&self, elapsed_ms: f32) -> TurnstileFrame {
        let progress = if self.duration_ms <= 0.0 {
            1.0
        } else {
            (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
        };
        let eased = self.easing.evaluate(progress);
        TurnstileFrame {
            progress,
            rotation_y_deg: self.from_deg + (self.to_deg - self.from_deg) * eased,
        }
    }

    pub fn is_finished(&self, elapsed_ms: f32) -> bool {
        elapsed_ms >= self.duration_ms
    }
}

/// Effect parameters shared by all four kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnstileSet {
    pub duration_ms: f32,
    pub easing: Easing,
}

impl Default for TurnstileSet {
    fn default() -> Self {
        Self::from_config(&TurnstileConfig::default())
    }
}

impl TurnstileSet {
    pub fn from_config(config: &TurnstileConfig) -> Self {
        let easing = Easing::from_name(&config.easing, config.exponent).unwrap_or_else(|| {
            warn!(easing = %config.easing, "unknown easing curve, using exponential_out");
            Easing::ExponentialOut {
                exponent: config.exponent,
            }
        });
        Self {
            duration_ms: config.duration_ms.max(0.0),
            easing,
        }
    }

    pub fn effect(&self, kind: TransitionKind) -> TurnstileEffect {
        TurnstileEffect::for_kind(kind, self.duration_ms, self.easing)
    }
}

/// Plays effects on a surface and reports completion.
pub trait EffectDriver {
    fn play(&self, effect: TurnstileEffect, surface: Rc<dyn AnimationSurface>, on_complete: Completion);
}

/// Driver for hosts without a frame renderer: the effect completes on the
/// next dispatch cycle.
#[derive(Debug, Clone)]
pub struct DispatchDriver {
    dispatcher: DispatchQueue,
}

impl DispatchDriver {
    pub fn new(dispatcher: DispatchQueue) -> Self {
        Self { dispatcher }
    }
}

impl EffectDriver for DispatchDriver {
    fn play(&self, effect: TurnstileEffect, _surface: Rc<dyn AnimationSurface>, on_complete: Completion) {
        trace!(kind = ?effect.kind, duration_ms = effect.duration_ms, "turnstile queued");
        self.dispatcher.post(on_complete);
    }
}

/// Animation handle for one turnstile effect on one surface.
pub struct TurnstileAnimation {
    effect: TurnstileEffect,
    surface: Rc<dyn AnimationSurface>,
    driver: Rc<dyn EffectDriver>,
}

impl TurnstileAnimation {
    pub fn new(effect: TurnstileEffect, surface: Rc<dyn AnimationSurface>, driver: Rc<dyn EffectDriver>) -> Self {
        Self {
            effect,
            surface,
            driver,
        }
    }

    pub fn effect(&self) -> &TurnstileEffect {
        &self.effect
    }
}

impl AnimationHandle for TurnstileAnimation {
    fn begin(self: Box<Self>, on_complete: Completion) {
        let Self {
            effect,
            surface,
            driver,
        } = *self;
        driver.play(effect, surface, on_complete);
    }
}
