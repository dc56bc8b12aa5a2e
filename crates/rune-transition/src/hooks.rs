//! Capability set the transition state machine calls out to.

use std::rc::Rc;

use crate::animation::{AnimationHandle, TransitionKind};
use crate::dispatch::DispatchQueue;
use crate::host::AnimationSurface;
use crate::locator::Locator;
use crate::turnstile::{DispatchDriver, EffectDriver, TurnstileAnimation, TurnstileSet};

/// Embedder-supplied behaviour for a page's transitions.
///
/// Every method except `select_animation` has an inert default.
pub trait TransitionHooks {
    /// Produce the animation for `kind` on `surface`.
    ///
    /// `locator` is the page on the other side of the transition when
    /// known. Returning `None` plays the transition as zero-duration.
    fn select_animation(
        &self,
        kind: TransitionKind,
        locator: Option<&Locator>,
        surface: &Rc<dyn AnimationSurface>,
    ) -> Option<Box<dyn AnimationHandle>>;

    /// Whether a popup or overlay currently owns the back button.
    fn is_overlay_open(&self) -> bool {
        false
    }

    fn on_transition_finished(&self, _kind: TransitionKind) {}

    /// Called on the first layout after every arrival.
    fn on_first_layout_after_entry(&self, _is_returning: bool, _from: Option<&Locator>) {}
}

/// Turnstile effects for all four kinds, nothing else.
pub struct DefaultHooks {
    effects: TurnstileSet,
    driver: Rc<dyn EffectDriver>,
}

impl DefaultHooks {
    /// Turnstiles that complete on the next dispatch cycle.
    pub fn new(effects: TurnstileSet, dispatcher: DispatchQueue) -> Self {
        Self::with_driver(effects, Rc::new(DispatchDriver::new(dispatcher)))
    }

    pub fn with_driver(effects: TurnstileSet, driver: Rc<dyn EffectDriver>) -> Self {
        Self { effects, driver }
    }

    pub fn effects(&self) -> &TurnstileSet {
        &self.effects
    }
}

impl TransitionHooks for DefaultHooks {
    fn select_animation(
        &self,
        kind: TransitionKind,
        _locator: Option<&Locator>,
        surface: &Rc<dyn AnimationSurface>,
    ) -> Option<Box<dyn AnimationHandle>> {
        Some(Box::new(TurnstileAnimation::new(
            self.effects.effect(kind),
            surface.clone(),
            self.driver.clone(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Completion;
    use crate::turnstile::TurnstileEffect;
    use std::cell::RefCell;

    struct NullSurface;

    impl AnimationSurface for NullSurface {
        fn set_opacity(&self, _value: f64) {}
    }

    #[derive(Default)]
    struct RecordingDriver {
        played: RefCell<Vec<TransitionKind>>,
    }

    impl EffectDriver for RecordingDriver {
        fn play(&self, effect: TurnstileEffect, _surface: Rc<dyn AnimationSurface>, on_complete: Completion) {
            self.played.borrow_mut().push(effect.kind);
            on_complete();
        }
    }

    #[test]
    fn test_default_hooks_cover_every_kind() {
        let driver = Rc::new(RecordingDriver::default());
        let hooks = DefaultHooks::with_driver(TurnstileSet::default(), driver.clone());
        let surface: Rc<dyn AnimationSurface> = Rc::new(NullSurface);

        for kind in TransitionKind::ALL {
            let handle = hooks
                .select_animation(kind, None, &surface)
                .expect("default hooks always animate");
            handle.begin(Box::new(|| {}));
        }
        assert_eq!(*driver.played.borrow(), TransitionKind::ALL.to_vec());
        assert!(!hooks.is_overlay_open());
        assert_eq!(hooks.effects().duration_ms, 350.0);
    }
}
