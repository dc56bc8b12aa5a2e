//! Per-page transition orchestration.
//!
//! A [`PageTransitions`] sits between the host's navigation events and the
//! animation provider. Leaving a page is intercepted and cancelled while an
//! outro plays, then replayed from the dispatch queue; arriving at a page
//! hides it until its first layout pass, then plays the intro.
//!
//! ```text
//! Idle ──leave/back──▶ AnimatingOut ──outro done──▶ NavigationReplayed
//!   ▲                                                     │ entered
//!   │                                                     ▼
//!   └──────── intro done ──── AnimatingIn ◀── layout ── AwaitingLayout
//! ```
//!
//! All entry points must be called from the UI thread that pumps the
//! coordinator's dispatch queue.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rune_config::TransitionsConfig;
use tracing::{debug, trace};

use crate::animation::TransitionKind;
use crate::coordinator::TransitionCoordinator;
use crate::events::{RejectReason, TransitionEvent};
use crate::host::{AnimationSurface, NavigationHost};
use crate::hooks::TransitionHooks;
use crate::layout_gate::LayoutReadinessGate;
use crate::locator::{Locator, NavigationIntent, NavigationMode};
use crate::replay;

/// Where a page is in its outro/intro cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    AnimatingOut,
    /// Outro finished; the deferred navigation is queued or issued.
    NavigationReplayed,
    /// Arrived and hidden, waiting for the first layout pass.
    AwaitingLayout,
    AnimatingIn,
}

/// Answer to the host's cancelable "leaving" event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveDecision {
    /// Let the host navigate now.
    Allow,
    /// Cancel the host navigation; it is either replayed after the outro
    /// or has to be requested again.
    Cancel,
}

impl LeaveDecision {
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }
}

struct TransitionContext {
    active: bool,
    animating: bool,
    loading_and_revealing: bool,
    needs_outro: bool,
    is_forward_entry: bool,
    pending_kind: Option<TransitionKind>,
    pending_intent: Option<NavigationIntent>,
    /// Where the last intercepted leave was headed.
    outgoing_target: Option<Locator>,
    /// Departure locator captured on the first forward entry.
    arrived_from: Option<Locator>,
    surface: Option<Rc<dyn AnimationSurface>>,
    phase: Phase,
}

impl TransitionContext {
    fn new(active: bool) -> Self {
        Self {
            active,
            animating: false,
            loading_and_revealing: false,
            needs_outro: false,
            is_forward_entry: true,
            pending_kind: None,
            pending_intent: None,
            outgoing_target: None,
            arrived_from: None,
            surface: None,
            phase: Phase::Idle,
        }
    }
}

struct PageInner {
    id: String,
    coordinator: TransitionCoordinator,
    host: Rc<dyn NavigationHost>,
    hooks: Rc<dyn TransitionHooks>,
    gate: LayoutReadinessGate,
    ctx: RefCell<TransitionContext>,
}

/// Transition state machine for one page instance.
///
/// Cloning yields another handle to the same page.
#[derive(Clone)]
pub struct PageTransitions {
    inner: Rc<PageInner>,
}

impl PageTransitions {
    pub fn new(
        id: impl Into<String>,
        coordinator: TransitionCoordinator,
        host: Rc<dyn NavigationHost>,
        hooks: Rc<dyn TransitionHooks>,
    ) -> Self {
        Self::with_active(id, coordinator, host, hooks, true)
    }

    /// Create a page whose initial `active` flag follows `transitions.enabled`.
    pub fn from_config(
        id: impl Into<String>,
        config: &TransitionsConfig,
        coordinator: TransitionCoordinator,
        host: Rc<dyn NavigationHost>,
        hooks: Rc<dyn TransitionHooks>,
    ) -> Self {
        Self::with_active(id, coordinator, host, hooks, config.enabled)
    }

    fn with_active(
        id: impl Into<String>,
        coordinator: TransitionCoordinator,
        host: Rc<dyn NavigationHost>,
        hooks: Rc<dyn TransitionHooks>,
        active: bool,
    ) -> Self {
        Self {
            inner: Rc::new(PageInner {
                id: id.into(),
                coordinator,
                host,
                hooks,
                gate: LayoutReadinessGate::new(),
                ctx: RefCell::new(TransitionContext::new(active)),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Attach the element animations run on. Without one the page navigates
    /// unanimated.
    pub fn bind_surface(&self, surface: Rc<dyn AnimationSurface>) {
        self.inner.ctx.borrow_mut().surface = Some(surface);
    }

    pub fn unbind_surface(&self) {
        self.inner.ctx.borrow_mut().surface = None;
    }

    /// Stop starting new transitions. One already running is not aborted.
    pub fn suspend_animation(&self) {
        self.inner.ctx.borrow_mut().active = false;
    }

    pub fn resume_animation(&self) {
        self.inner.ctx.borrow_mut().active = true;
    }

    /// Host "leaving" event.
    pub fn on_leaving(&self, intent: NavigationIntent) -> LeaveDecision {
        self.inner.on_leaving(intent)
    }

    /// Host hardware back event. Returns whether the press was handled.
    pub fn on_back_signal(&self) -> bool {
        self.inner.on_back_signal()
    }

    /// Host "entered page" event.
    pub fn on_entered(&self, mode: NavigationMode) {
        self.inner.on_entered(mode);
    }

    /// Host layout pass completed for this page.
    pub fn on_layout_updated(&self) {
        self.inner.gate.notify_layout();
    }

    pub fn phase(&self) -> Phase {
        self.inner.ctx.borrow().phase
    }

    pub fn is_active(&self) -> bool {
        self.inner.ctx.borrow().active
    }

    pub fn is_animating(&self) -> bool {
        self.inner.ctx.borrow().animating
    }

    pub fn is_loading_and_revealing(&self) -> bool {
        self.inner.ctx.borrow().loading_and_revealing
    }

    pub fn needs_outro(&self) -> bool {
        self.inner.ctx.borrow().needs_outro
    }

    pub fn pending_kind(&self) -> Option<TransitionKind> {
        self.inner.ctx.borrow().pending_kind
    }

    pub fn pending_intent(&self) -> Option<NavigationIntent> {
        self.inner.ctx.borrow().pending_intent.clone()
    }

    /// Locator this page was first entered from.
    pub fn arrived_from(&self) -> Option<Locator> {
        self.inner.ctx.borrow().arrived_from.clone()
    }

    /// Whether a new transition could start right now.
    pub fn can_animate(&self) -> bool {
        self.inner.can_animate(&self.inner.ctx.borrow())
    }
}

impl fmt::Debug for PageTransitions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ctx = self.inner.ctx.borrow();
        f.debug_struct("PageTransitions")
            .field("id", &self.inner.id)
            .field("phase", &ctx.phase)
            .field("active", &ctx.active)
            .field("animating", &ctx.animating)
            .field("loading_and_revealing", &ctx.loading_and_revealing)
            .field("needs_outro", &ctx.needs_outro)
            .field("pending_kind", &ctx.pending_kind)
            .finish()
    }
}

fn outro_kind(mode: NavigationMode) -> TransitionKind {
    match mode {
        NavigationMode::New | NavigationMode::Forward => TransitionKind::ForwardOut,
        NavigationMode::Back => TransitionKind::BackwardOut,
    }
}

impl PageInner {
    fn can_animate(&self, ctx: &TransitionContext) -> bool {
        ctx.active && !self.coordinator.is_navigation_in_flight() && ctx.surface.is_some()
    }

    fn reject(&self, reason: RejectReason) {
        debug!(page = %self.id, ?reason, "navigation request rejected");
        self.coordinator.emit(TransitionEvent::InterceptionRejected {
            page: self.id.clone(),
            reason,
        });
    }

    fn on_back_signal(self: &Rc<Self>) -> bool {
        if self.coordinator.is_navigation_in_flight() {
            trace!(page = %self.id, "back swallowed, navigation in flight");
            return true;
        }

        {
            let ctx = self.ctx.borrow();
            if !self.can_animate(&ctx) {
                return false;
            }
            if ctx.animating {
                drop(ctx);
                self.reject(RejectReason::Animating);
                return false;
            }
            if ctx.loading_and_revealing {
                drop(ctx);
                self.reject(RejectReason::Revealing);
                return false;
            }
        }

        if !self.host.can_go_back() || self.hooks.is_overlay_open() {
            return false;
        }
        if !self.coordinator.try_acquire(&self.id) {
            return true;
        }

        {
            let mut ctx = self.ctx.borrow_mut();
            ctx.needs_outro = false;
            ctx.pending_kind = Some(TransitionKind::BackwardOut);
            ctx.pending_intent = Some(NavigationIntent::back());
        }
        debug!(page = %self.id, "back press intercepted");
        self.run_animation();
        true
    }

    fn on_leaving(self: &Rc<Self>, intent: NavigationIntent) -> LeaveDecision {
        {
            let ctx = self.ctx.borrow();
            let busy = if ctx.animating {
                Some(RejectReason::Animating)
            } else if ctx.loading_and_revealing {
                Some(RejectReason::Revealing)
            } else {
                None
            };
            if let Some(reason) = busy {
                drop(ctx);
                self.reject(reason);
                return LeaveDecision::Cancel;
            }
        }

        self.coordinator.record_departure(self.host.current_locator());
        self.ctx.borrow_mut().outgoing_target = intent.target.clone();

        {
            let mut ctx = self.ctx.borrow_mut();
            if !ctx.needs_outro {
                return LeaveDecision::Allow;
            }
            ctx.needs_outro = false;
            if !self.can_animate(&ctx) {
                return LeaveDecision::Allow;
            }
        }

        if intent.mode == NavigationMode::Back && !self.host.can_go_back() {
            return LeaveDecision::Allow;
        }
        if self.hooks.is_overlay_open() {
            return LeaveDecision::Allow;
        }

        if let Some(target) = intent.target.as_ref().filter(|t| self.coordinator.is_external(t)) {
            debug!(page = %self.id, %target, "leaving application, no outro");
            return LeaveDecision::Allow;
        }

        if !self.coordinator.try_acquire(&self.id) {
            return LeaveDecision::Allow;
        }

        {
            let mut ctx = self.ctx.borrow_mut();
            ctx.pending_kind = Some(outro_kind(intent.mode));
            ctx.pending_intent = Some(intent);
        }
        debug!(page = %self.id, "leave intercepted");
        self.run_animation();
        LeaveDecision::Cancel
    }

    fn on_entered(self: &Rc<Self>, mode: NavigationMode) {
        let surface = {
            let mut ctx = self.ctx.borrow_mut();
            // An outro still running owns the latch and must replay its intent.
            if !ctx.animating {
                ctx.pending_intent = None;
            }
            ctx.needs_outro = true;
            let returning_from_external = ctx
                .outgoing_target
                .as_ref()
                .is_some_and(|target| self.coordinator.is_external(target));
            if returning_from_external {
                ctx.outgoing_target = None;
                debug!(page = %self.id, "re-entered from outside the application");
                ctx.phase = Phase::Idle;
                return;
            }
            ctx.loading_and_revealing = true;
            ctx.phase = Phase::AwaitingLayout;
            ctx.surface.clone()
        };
        debug!(page = %self.id, ?mode, "entered, awaiting first layout");

        if let Some(surface) = &surface {
            surface.set_opacity(0.0);
        }

        let page = Rc::downgrade(self);
        self.gate.on_first_layout(Box::new(move || {
            if let Some(page) = page.upgrade() {
                page.on_first_layout();
            }
        }));

        // A surface that has already been laid out will not report another
        // pass on its own.
        if surface.is_some_and(|s| s.has_completed_layout()) {
            let page = Rc::downgrade(self);
            self.coordinator.dispatcher().post(move || {
                if let Some(page) = page.upgrade() {
                    page.gate.notify_layout();
                }
            });
        }
    }

    fn on_first_layout(self: &Rc<Self>) {
        let (is_returning, eligible, surface) = {
            let mut ctx = self.ctx.borrow_mut();
            let forward = ctx.is_forward_entry;
            if forward {
                ctx.arrived_from = self.coordinator.last_departure();
            }
            ctx.pending_kind = Some(if forward {
                TransitionKind::ForwardIn
            } else {
                TransitionKind::BackwardIn
            });
            ctx.is_forward_entry = false;
            (!forward, self.can_animate(&ctx), ctx.surface.clone())
        };

        let from = self.coordinator.last_departure();
        self.hooks.on_first_layout_after_entry(is_returning, from.as_ref());

        if eligible {
            self.run_animation();
        } else {
            if let Some(surface) = surface {
                surface.set_opacity(1.0);
            }
            self.complete_transition();
        }
    }

    fn run_animation(self: &Rc<Self>) {
        let (kind, locator, surface) = {
            let mut ctx = self.ctx.borrow_mut();
            let Some(kind) = ctx.pending_kind else {
                return;
            };
            ctx.animating = true;
            ctx.phase = if kind.is_intro() {
                Phase::AnimatingIn
            } else {
                Phase::AnimatingOut
            };
            let locator = match kind {
                TransitionKind::ForwardIn => self.coordinator.last_departure(),
                TransitionKind::BackwardOut => ctx.arrived_from.clone(),
                _ => ctx.outgoing_target.clone(),
            };
            (kind, locator, ctx.surface.clone())
        };

        let Some(surface) = surface else {
            self.complete_transition();
            return;
        };

        let Some(animation) = self.hooks.select_animation(kind, locator.as_ref(), &surface) else {
            trace!(page = %self.id, ?kind, "no animation, completing immediately");
            surface.set_opacity(1.0);
            self.complete_transition();
            return;
        };

        debug!(page = %self.id, ?kind, locator = ?locator, "starting transition");
        self.coordinator.emit(TransitionEvent::Started {
            page: self.id.clone(),
            kind,
        });
        let page = Rc::clone(self);
        self.coordinator.dispatcher().post(move || {
            surface.set_opacity(1.0);
            animation.begin(Box::new(move || page.complete_transition()));
        });
    }

    fn complete_transition(self: &Rc<Self>) {
        let (kind, intent) = {
            let mut ctx = self.ctx.borrow_mut();
            ctx.animating = false;
            ctx.loading_and_revealing = false;
            let intent = ctx.pending_intent.take();
            ctx.phase = if intent.is_some() {
                Phase::NavigationReplayed
            } else {
                Phase::Idle
            };
            (ctx.pending_kind, intent)
        };

        if let Some(intent) = intent {
            replay::schedule(&self.coordinator, self.host.clone(), self.id.clone(), intent);
        }

        if let Some(kind) = kind {
            debug!(page = %self.id, ?kind, "transition complete");
            self.coordinator.emit(TransitionEvent::Completed {
                page: self.id.clone(),
                kind,
            });
            self.hooks.on_transition_finished(kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationHandle, Completion};
    use crate::dispatch::DispatchQueue;
    use crate::memory::MemoryNavigationHost;
    use std::cell::Cell;

    #[derive(Default)]
    struct Surface {
        opacity: Cell<f64>,
    }

    impl AnimationSurface for Surface {
        fn set_opacity(&self, value: f64) {
            self.opacity.set(value);
        }
    }

    struct Immediate;

    impl AnimationHandle for Immediate {
        fn begin(self: Box<Self>, on_complete: Completion) {
            on_complete();
        }
    }

    struct ImmediateHooks;

    impl TransitionHooks for ImmediateHooks {
        fn select_animation(
            &self,
            _kind: TransitionKind,
            _locator: Option<&Locator>,
            _surface: &Rc<dyn AnimationSurface>,
        ) -> Option<Box<dyn AnimationHandle>> {
            Some(Box::new(Immediate))
        }
    }

    fn page(host: Rc<MemoryNavigationHost>) -> (PageTransitions, DispatchQueue, Rc<Surface>) {
        let dispatcher = DispatchQueue::new();
        let coordinator = TransitionCoordinator::new(dispatcher.clone());
        let page = PageTransitions::new("p", coordinator, host, Rc::new(ImmediateHooks));
        let surface = Rc::new(Surface::default());
        page.bind_surface(surface.clone());
        (page, dispatcher, surface)
    }

    #[test]
    fn test_initial_state() {
        let (page, _, _) = page(Rc::new(MemoryNavigationHost::new("/a")));
        assert_eq!(page.phase(), Phase::Idle);
        assert!(page.is_active());
        assert!(!page.needs_outro());
        assert!(page.can_animate());
    }

    #[test]
    fn test_phase_walk() {
        let host = Rc::new(MemoryNavigationHost::new("/a"));
        let (page, dispatcher, surface) = page(host.clone());

        page.on_entered(NavigationMode::New);
        assert_eq!(page.phase(), Phase::AwaitingLayout);
        assert_eq!(surface.opacity.get(), 0.0);

        page.on_layout_updated();
        assert_eq!(page.phase(), Phase::AnimatingIn);
        dispatcher.run_pending();
        assert_eq!(page.phase(), Phase::Idle);
        assert_eq!(surface.opacity.get(), 1.0);

        assert_eq!(page.on_leaving(NavigationIntent::new("/b")), LeaveDecision::Cancel);
        assert_eq!(page.phase(), Phase::AnimatingOut);
        dispatcher.run_pending();
        assert_eq!(page.phase(), Phase::NavigationReplayed);
        dispatcher.run_pending();
        assert_eq!(host.current_locator(), Some(Locator::from("/b")));
    }

    #[test]
    fn test_unbound_surface_cannot_animate() {
        let (page, _, _) = page(Rc::new(MemoryNavigationHost::new("/a")));
        page.unbind_surface();
        assert!(!page.can_animate());

        page.on_entered(NavigationMode::New);
        page.on_layout_updated();
        assert!(!page.is_loading_and_revealing());
        assert!(page.on_leaving(NavigationIntent::new("/b")).is_allowed());
    }

    #[test]
    fn test_suspend_and_resume() {
        let (page, _, _) = page(Rc::new(MemoryNavigationHost::new("/a")));
        page.suspend_animation();
        assert!(!page.can_animate());
        page.resume_animation();
        assert!(page.can_animate());
    }

    #[test]
    fn test_second_entry_is_backward() {
        let (page, dispatcher, _) = page(Rc::new(MemoryNavigationHost::new("/a")));
        page.on_entered(NavigationMode::New);
        page.on_layout_updated();
        assert_eq!(page.pending_kind(), Some(TransitionKind::ForwardIn));
        dispatcher.run_until_idle(4);

        page.on_entered(NavigationMode::Back);
        page.on_layout_updated();
        assert_eq!(page.pending_kind(), Some(TransitionKind::BackwardIn));
    }
}
