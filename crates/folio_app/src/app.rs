//! Page runtime
//!
//! [`PortfolioApp`] owns the host handles, the timer queue and every effect.
//! The host drives it with three calls: [`PortfolioApp::start`] once the
//! document is ready, [`PortfolioApp::dispatch`] for each page event and
//! [`PortfolioApp::advance_to`] whenever time passes.

use folio_animation::{Millis, TypingEngine};
use folio_core::{Document, EventOutcome, Navigator, PageEvent, Storage};
use folio_effects::{
    Analytics, BootstrapLoader, ContactForm, MobileMenu, NavigationEffects, NotificationKind,
    Notifications, PageTransition, ProgressBarAnimator, ProjectFilter, RevealAnimator,
    RevealTask, Roles, SmoothScroll, Task, ThemeToggle, Timers, TypingEffect,
};

use crate::config::SiteConfig;
use crate::error::Result;

pub struct PortfolioApp<D, N, S> {
    config: SiteConfig,
    doc: D,
    nav: N,
    storage: S,
    timers: Timers,
    started: bool,

    transition: PageTransition,
    navigation: NavigationEffects,
    reveal: RevealAnimator,
    bars: ProgressBarAnimator,
    filter: ProjectFilter,
    typing: Option<TypingEffect>,
    menu: MobileMenu,
    smooth_scroll: SmoothScroll,
    theme: Option<ThemeToggle>,
    contact: ContactForm,
    notifications: Notifications,
    loader: Option<BootstrapLoader>,
    analytics: Analytics,
}

impl<D, N, S> PortfolioApp<D, N, S>
where
    D: Document,
    N: Navigator,
    S: Storage,
{
    /// Build every effect from `config`; nothing touches the page until
    /// [`start`](Self::start)
    pub fn new(config: SiteConfig, doc: D, nav: N, storage: S) -> Result<Self> {
        config.validate()?;
        let roles = Roles::from_config(&config.roles)?;
        let timings = &config.timings;
        let features = config.features;

        let typing = if features.typing {
            let engine = TypingEngine::new(config.phrases.clone(), timings.typing)?;
            Some(TypingEffect::new(&roles, engine, timings.typing_start_delay_ms))
        } else {
            None
        };
        let loader = if features.loader {
            Some(BootstrapLoader::new(&roles, timings.loader)?)
        } else {
            None
        };

        Ok(Self {
            transition: PageTransition::new(&roles, timings.transition_delay_ms),
            navigation: NavigationEffects::new(&roles, timings.ripple_ms),
            reveal: RevealAnimator::new(&roles, timings.reveal_stagger_ms),
            bars: ProgressBarAnimator::new(&roles, timings.progress_bar_delay_ms),
            filter: ProjectFilter::new(&roles, timings.filter_stagger_ms),
            typing,
            menu: MobileMenu::new(&roles, timings.menu_close_ms),
            smooth_scroll: SmoothScroll::new(&roles),
            theme: features.theme_toggle.then(|| ThemeToggle::new(&roles)),
            contact: ContactForm::new(&roles),
            notifications: Notifications::new(&roles, timings.notification),
            loader,
            analytics: Analytics::new(&roles),
            config,
            doc,
            nav,
            storage,
            timers: Timers::new(),
            started: false,
        })
    }

    /// Replace the loader's random source with a seeded one
    ///
    /// Only meaningful before [`start`](Self::start).
    pub fn seed_loader(&mut self, seed: u64) -> Result<()> {
        if self.loader.is_some() {
            let roles = Roles::from_config(&self.config.roles)?;
            self.loader = Some(BootstrapLoader::with_seed(
                &roles,
                self.config.timings.loader,
                seed,
            )?);
        }
        Ok(())
    }

    /// Set the page up; runs once, later calls are ignored
    pub fn start(&mut self, now: Millis) {
        if self.started {
            tracing::warn!("Page runtime already started");
            return;
        }
        self.started = true;
        self.timers.advance_to(now);

        self.transition.install(&mut self.doc, &mut self.nav);
        self.reveal.observe_all(&mut self.doc);
        self.bars.observe_all(&mut self.doc);
        if let Some(typing) = &mut self.typing {
            typing.start(&self.doc, &self.nav, &mut self.timers);
        }
        self.menu.install(&mut self.doc);
        if let Some(theme) = &self.theme {
            theme.install(&mut self.doc, &self.storage);
        }
        if let Some(loader) = &mut self.loader {
            loader.start(&mut self.doc, &mut self.timers);
        }
        self.analytics.page_view(&self.doc, &self.nav);

        tracing::info!(
            "Page runtime started on {} ({} timers pending)",
            self.nav.pathname(),
            self.timers.len()
        );
    }

    /// Route one page event to every effect interested in it
    pub fn dispatch(&mut self, event: PageEvent) -> EventOutcome {
        tracing::trace!("Dispatching {} event", event.kind());
        match event {
            PageEvent::Click { target } => {
                let mut outcome = self.transition.on_click(
                    &mut self.doc,
                    &mut self.nav,
                    &mut self.timers,
                    target,
                );
                self.navigation
                    .on_click(&mut self.doc, &mut self.timers, target);
                outcome = outcome.merge(self.smooth_scroll.on_click(&mut self.doc, target));
                self.filter.on_click(&mut self.doc, &mut self.timers, target);
                self.menu.on_click(&mut self.doc, &mut self.timers, target);
                if let Some(theme) = &self.theme {
                    theme.on_click(&mut self.doc, &mut self.storage, target);
                }
                self.analytics.on_click(&self.doc, target);
                outcome
            }
            PageEvent::PopState { state } => {
                self.transition.on_pop_state(
                    &mut self.doc,
                    &mut self.nav,
                    &mut self.timers,
                    state.as_ref(),
                );
                EventOutcome::IGNORED
            }
            PageEvent::Scroll { offset } => {
                self.navigation.on_scroll(&mut self.doc, offset);
                EventOutcome::IGNORED
            }
            PageEvent::Submit { form } => self.contact.on_submit(
                &mut self.doc,
                &mut self.timers,
                &mut self.notifications,
                form,
            ),
            PageEvent::KeyDown { key } => {
                self.menu.on_key(&mut self.doc, &mut self.timers, &key);
                EventOutcome::IGNORED
            }
            PageEvent::Intersection(entry) => {
                if !self.reveal.on_intersection(&mut self.doc, &mut self.timers, &entry) {
                    self.bars.on_intersection(&self.doc, &mut self.timers, &entry);
                }
                EventOutcome::IGNORED
            }
            PageEvent::Error { message } => {
                tracing::error!("Page error: {}", message);
                EventOutcome::IGNORED
            }
        }
    }

    /// Fire every timer due at or before `now`; returns how many fired
    pub fn advance_to(&mut self, now: Millis) -> usize {
        let mut fired = 0;
        while let Some(timer) = self.timers.pop_due(now) {
            tracing::trace!("Timer fired at {} for {}", timer.due, timer.task.effect());
            self.run_task(timer.task);
            fired += 1;
        }
        self.timers.advance_to(now);
        fired
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::Transition(task) => self.transition.fire(&mut self.nav, task),
            Task::Reveal(RevealTask::RevealChild { element }) => {
                self.reveal.fire(&mut self.doc, element)
            }
            Task::Reveal(RevealTask::FillBar { element, percent }) => {
                self.bars.fire(&mut self.doc, element, percent)
            }
            Task::Typing(_) => {
                if let Some(typing) = &mut self.typing {
                    typing.fire(&mut self.doc, &mut self.timers);
                }
            }
            Task::Notification(task) => {
                self.notifications
                    .fire(&mut self.doc, &mut self.timers, task)
            }
            Task::Loader(task) => {
                if let Some(loader) = &mut self.loader {
                    loader.fire(&mut self.doc, &mut self.timers, task);
                }
            }
            Task::Navigation(task) => self.navigation.fire(&mut self.doc, task),
            Task::Filter(task) => self.filter.fire(&mut self.doc, task),
            Task::Menu(task) => self.menu.fire(&mut self.doc, task),
        }
    }

    /// Show a transient message
    pub fn notify(&mut self, message: &str, kind: NotificationKind) {
        self.notifications
            .show(&mut self.doc, &mut self.timers, message, kind);
    }

    /// Start a page transition to `url`
    pub fn navigate(&mut self, url: &str, record_history: bool) -> folio_core::Result<bool> {
        self.transition.navigate(
            &mut self.doc,
            &mut self.nav,
            &mut self.timers,
            url,
            record_history,
        )
    }

    /// Next timer deadline, for the host to sleep until
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_due()
    }

    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn doc(&self) -> &D {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn nav(&self) -> &N {
        &self.nav
    }

    pub fn nav_mut(&mut self) -> &mut N {
        &mut self.nav
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn transition(&self) -> &PageTransition {
        &self.transition
    }

    pub fn reveal(&self) -> &RevealAnimator {
        &self.reveal
    }

    pub fn typing(&self) -> Option<&TypingEffect> {
        self.typing.as_ref()
    }

    pub fn loader(&self) -> Option<&BootstrapLoader> {
        self.loader.as_ref()
    }

    pub fn filter(&self) -> &ProjectFilter {
        &self.filter
    }

    pub fn menu(&self) -> &MobileMenu {
        &self.menu
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }
}
