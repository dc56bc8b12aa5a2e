#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use rune_transition::{
    AnimationHandle, AnimationSurface, Completion, DispatchQueue, Locator, MemoryNavigationHost,
    PageTransitions, TransitionCoordinator, TransitionHooks, TransitionKind,
};

/// Surface that remembers every opacity it was given.
#[derive(Default)]
pub struct RecordingSurface {
    pub opacity: RefCell<Vec<f64>>,
    pub laid_out: Cell<bool>,
}

impl RecordingSurface {
    pub fn last_opacity(&self) -> Option<f64> {
        self.opacity.borrow().last().copied()
    }
}

impl AnimationSurface for RecordingSurface {
    fn set_opacity(&self, value: f64) {
        self.opacity.borrow_mut().push(value);
    }

    fn has_completed_layout(&self) -> bool {
        self.laid_out.get()
    }
}

struct ManualAnimation {
    kind: TransitionKind,
    running: Rc<RefCell<Vec<(TransitionKind, Completion)>>>,
}

impl AnimationHandle for ManualAnimation {
    fn begin(self: Box<Self>, on_complete: Completion) {
        self.running.borrow_mut().push((self.kind, on_complete));
    }
}

/// Hooks whose animations only finish when the test says so.
#[derive(Default)]
pub struct ManualHooks {
    pub selected: RefCell<Vec<(TransitionKind, Option<Locator>)>>,
    pub running: Rc<RefCell<Vec<(TransitionKind, Completion)>>>,
    pub finished: RefCell<Vec<TransitionKind>>,
    pub first_layouts: RefCell<Vec<(bool, Option<Locator>)>>,
    pub without_animation: RefCell<HashSet<TransitionKind>>,
    pub overlay_open: Cell<bool>,
}

impl ManualHooks {
    /// Number of animations begun and not yet finished.
    pub fn running_count(&self) -> usize {
        self.running.borrow().len()
    }

    /// Complete the oldest running animation, returning its kind.
    pub fn finish_next(&self) -> Option<TransitionKind> {
        let next = {
            let mut running = self.running.borrow_mut();
            if running.is_empty() {
                None
            } else {
                Some(running.remove(0))
            }
        };
        next.map(|(kind, on_complete)| {
            on_complete();
            kind
        })
    }

    pub fn selected_kinds(&self) -> Vec<TransitionKind> {
        self.selected.borrow().iter().map(|(kind, _)| *kind).collect()
    }
}

impl TransitionHooks for ManualHooks {
    fn select_animation(
        &self,
        kind: TransitionKind,
        locator: Option<&Locator>,
        _surface: &Rc<dyn AnimationSurface>,
    ) -> Option<Box<dyn AnimationHandle>> {
        self.selected.borrow_mut().push((kind, locator.cloned()));
        if self.without_animation.borrow().contains(&kind) {
            return None;
        }
        Some(Box::new(ManualAnimation {
            kind,
            running: self.running.clone(),
        }))
    }

    fn is_overlay_open(&self) -> bool {
        self.overlay_open.get()
    }

    fn on_transition_finished(&self, kind: TransitionKind) {
        self.finished.borrow_mut().push(kind);
    }

    fn on_first_layout_after_entry(&self, is_returning: bool, from: Option<&Locator>) {
        self.first_layouts.borrow_mut().push((is_returning, from.cloned()));
    }
}

/// One application: a dispatch queue, a coordinator and an in-memory host.
pub struct Harness {
    pub dispatcher: DispatchQueue,
    pub coordinator: TransitionCoordinator,
    pub host: Rc<MemoryNavigationHost>,
}

pub struct TestPage {
    pub page: PageTransitions,
    pub hooks: Rc<ManualHooks>,
    pub surface: Rc<RecordingSurface>,
}

impl Harness {
    pub fn new(start: &str) -> Self {
        let dispatcher = DispatchQueue::new();
        Self {
            coordinator: TransitionCoordinator::new(dispatcher.clone()),
            dispatcher,
            host: Rc::new(MemoryNavigationHost::new(start)),
        }
    }

    pub fn page(&self, id: &str) -> TestPage {
        let hooks = Rc::new(ManualHooks::default());
        let surface = Rc::new(RecordingSurface::default());
        let page = PageTransitions::new(id, self.coordinator.clone(), self.host.clone(), hooks.clone());
        page.bind_surface(surface.clone());
        TestPage {
            page,
            hooks,
            surface,
        }
    }

    /// Pump the dispatch queue until it drains.
    pub fn pump(&self) -> usize {
        self.dispatcher.run_until_idle(32)
    }
}

impl TestPage {
    /// Enter the page and play its intro to completion.
    pub fn arrive(&self, harness: &Harness) {
        self.page.on_entered(rune_transition::NavigationMode::New);
        self.page.on_layout_updated();
        harness.pump();
        self.hooks.finish_next();
        harness.pump();
    }
}
