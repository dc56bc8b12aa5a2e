//! Headless walkthrough of animated page transitions.
//!
//! Drives three pages through a scripted session against the in-memory
//! history: two forward navigations, two hardware back presses, and a final
//! back press with nowhere left to go.

use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{Context, Result};
use log::info;
use rune_config::RuneConfig;
use rune_transition::{
    AnimationSurface, DefaultHooks, DispatchQueue, Locator, MemoryNavigationHost, NavigationCommand,
    NavigationHost, NavigationIntent, NavigationMode, PageTransitions, TransitionCoordinator,
    TransitionHooks, TurnstileSet, replay,
};

/// Surface that only reports what it is asked to show.
struct LoggedSurface {
    name: &'static str,
}

impl AnimationSurface for LoggedSurface {
    fn set_opacity(&self, value: f64) {
        tracing::debug!(surface = self.name, opacity = value, "opacity");
    }
}

/// Plays the role of the host UI framework: routes user input and history
/// changes to page events.
struct Shell {
    dispatcher: DispatchQueue,
    coordinator: TransitionCoordinator,
    host: Rc<MemoryNavigationHost>,
    pages: HashMap<Locator, PageTransitions>,
    shown: Locator,
}

impl Shell {
    fn new(config: &RuneConfig, routes: &[(&'static str, &'static str)]) -> Result<Self> {
        let (_, start) = *routes.first().context("no routes configured")?;
        let dispatcher = DispatchQueue::new();
        let coordinator = TransitionCoordinator::from_config(&config.transitions, dispatcher.clone());
        let host = Rc::new(MemoryNavigationHost::new(start));
        let hooks: Rc<dyn TransitionHooks> = Rc::new(DefaultHooks::new(
            TurnstileSet::from_config(&config.transitions.turnstile),
            dispatcher.clone(),
        ));

        let pages = routes
            .iter()
            .map(|&(name, route)| {
                let page = PageTransitions::from_config(
                    name,
                    &config.transitions,
                    coordinator.clone(),
                    host.clone(),
                    hooks.clone(),
                );
                page.bind_surface(Rc::new(LoggedSurface { name }));
                (Locator::from(route), page)
            })
            .collect();

        Ok(Self {
            dispatcher,
            coordinator,
            host,
            pages,
            shown: Locator::from(start),
        })
    }

    fn page(&self, locator: &Locator) -> Result<&PageTransitions> {
        self.pages
            .get(locator)
            .with_context(|| format!("no page registered for {locator}"))
    }

    fn launch(&mut self) -> Result<()> {
        let page = self.page(&self.shown)?;
        page.on_entered(NavigationMode::New);
        page.on_layout_updated();
        self.settle()
    }

    /// User follows a link.
    fn tap(&mut self, target: &str) -> Result<()> {
        let intent = NavigationIntent::new(target);
        let page = self.page(&self.shown)?.clone();
        if page.on_leaving(intent.clone()).is_allowed() {
            replay::issue(self.host.as_ref(), &intent)?;
        }
        self.settle()
    }

    /// User presses the hardware back button.
    fn press_back(&mut self) -> Result<()> {
        let page = self.page(&self.shown)?.clone();
        if page.on_back_signal() {
            info!("back press handled by {}", page.id());
        } else if self.host.can_go_back() {
            let intent = NavigationIntent::back();
            if page.on_leaving(intent.clone()).is_allowed() {
                replay::issue(self.host.as_ref(), &intent)?;
            }
        } else {
            info!("back press on {} falls through to the system", page.id());
        }
        self.settle()
    }

    /// Pump dispatch cycles and deliver history changes until idle.
    fn settle(&mut self) -> Result<()> {
        loop {
            let ran = self.dispatcher.run_pending();
            let moved = self.deliver_history()?;
            if ran == 0 && !moved {
                break;
            }
        }
        for event in self.coordinator.drain_events() {
            info!("{event:?}");
        }
        Ok(())
    }

    fn deliver_history(&mut self) -> Result<bool> {
        let mut moved = false;
        while let Some(command) = self.host.pop_command() {
            let mode = match command {
                NavigationCommand::Navigate(_) => NavigationMode::New,
                NavigationCommand::GoBack => NavigationMode::Back,
                NavigationCommand::GoForward => NavigationMode::Forward,
            };
            let arrived = self
                .host
                .current_locator()
                .context("history has no current entry")?;
            info!("{} -> {} ({mode:?})", self.shown, arrived);

            let page = self.page(&arrived)?;
            page.on_entered(mode);
            page.on_layout_updated();
            self.shown = arrived;
            moved = true;
        }
        Ok(moved)
    }
}

fn main() -> Result<()> {
    let config = RuneConfig::load();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.filter))
        .init();

    let mut shell = Shell::new(
        &config,
        &[("home", "/home"), ("detail", "/detail"), ("settings", "/settings")],
    )?;

    shell.launch()?;
    shell.tap("/detail")?;
    shell.tap("/settings")?;
    shell.press_back()?;
    shell.press_back()?;
    shell.press_back()?;

    info!("finished on {}", shell.shown);
    Ok(())
}
