//! Page transition controller
//!
//! Internal link clicks and history navigation show a full-screen overlay,
//! fade the main content out and only then perform the real navigation.
//!
//! ```text
//! click / popstate
//!       │
//!       ▼
//!  overlay.active + main.page-fade-out ─▶ push {url} (clicks only) ─▶ wait ─▶ location = url
//! ```
//!
//! At most one transition is in flight: once the overlay is up, every further
//! request is ignored until the page is replaced.

use folio_core::{
    resolve_path, Document, ElementId, EventOutcome, FolioError, HistoryState, Navigator, Result,
    Selector,
};

use crate::roles::Roles;
use crate::styles::{self, TRANSITION_STYLES};
use crate::task::{Task, Timers};

/// Overlay class name
pub const OVERLAY_CLASS: &str = "page-transition-overlay";
/// Class shown on the overlay while a transition runs
pub const ACTIVE_CLASS: &str = "active";
/// Exit marker applied to the main content
pub const FADE_OUT_CLASS: &str = "page-fade-out";

/// Delayed step of a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionTask {
    /// Perform the full navigation
    Navigate { url: String },
}

/// Whether a transition is in flight
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransitionState {
    #[default]
    Idle,
    Active {
        target: String,
    },
}

/// Link hrefs that leave the page's own navigation alone
fn is_internal_href(href: &str) -> bool {
    !(href.starts_with("http")
        || href.starts_with("mailto")
        || href.starts_with("tel")
        || href.starts_with('#'))
}

pub struct PageTransition {
    overlay: Selector,
    main: Selector,
    link: Selector,
    delay_ms: u64,
    state: TransitionState,
}

impl PageTransition {
    pub fn new(roles: &Roles, delay_ms: u64) -> Self {
        Self {
            overlay: roles.overlay.clone(),
            main: roles.main.clone(),
            link: roles.link.clone(),
            delay_ms,
            state: TransitionState::Idle,
        }
    }

    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, TransitionState::Active { .. })
    }

    /// Build the overlay, inject its styles and record the current path in
    /// the initial history entry
    pub fn install<D, N>(&mut self, doc: &mut D, nav: &mut N) -> ElementId
    where
        D: Document + ?Sized,
        N: Navigator + ?Sized,
    {
        let overlay = build_overlay(doc);
        styles::inject(doc, &TRANSITION_STYLES);

        let path = nav.pathname();
        nav.replace_state(&HistoryState::new(path));
        overlay
    }

    /// Start a transition to `target_url`
    ///
    /// Returns `Ok(false)` when a transition is already in flight. Fails
    /// without touching the page when the overlay is missing.
    pub fn navigate<D, N>(
        &mut self,
        doc: &mut D,
        nav: &mut N,
        timers: &mut Timers,
        target_url: &str,
        record_history: bool,
    ) -> Result<bool>
    where
        D: Document + ?Sized,
        N: Navigator + ?Sized,
    {
        if let TransitionState::Active { target } = &self.state {
            tracing::debug!(
                "Ignoring navigation to {} while transition to {} is active",
                target_url,
                target
            );
            return Ok(false);
        }

        let overlay = doc
            .query(&self.overlay)
            .ok_or_else(|| FolioError::MissingElement(self.overlay.to_string()))?;
        let main = doc.query(&self.main).unwrap_or_else(|| doc.body());

        doc.add_class(overlay, ACTIVE_CLASS);
        doc.add_class(main, FADE_OUT_CLASS);

        if record_history {
            nav.push_state(&HistoryState::new(target_url));
        }

        timers.schedule(
            self.delay_ms,
            Task::from(TransitionTask::Navigate {
                url: target_url.to_string(),
            }),
        );
        self.state = TransitionState::Active {
            target: target_url.to_string(),
        };
        tracing::debug!("Page transition to {} started", target_url);
        Ok(true)
    }

    /// Handle a click anywhere in the document
    pub fn on_click<D, N>(
        &mut self,
        doc: &mut D,
        nav: &mut N,
        timers: &mut Timers,
        target: ElementId,
    ) -> EventOutcome
    where
        D: Document + ?Sized,
        N: Navigator + ?Sized,
    {
        let Some(link) = doc.closest(target, &self.link) else {
            return EventOutcome::IGNORED;
        };
        let Some(href) = doc.attribute(link, "href") else {
            return EventOutcome::IGNORED;
        };
        if !is_internal_href(&href) {
            return EventOutcome::IGNORED;
        }

        let current = nav.pathname();
        if resolve_path(&current, &href) == current {
            tracing::debug!("Link to current page {}, not transitioning", href);
            return EventOutcome::PREVENTED;
        }

        self.navigate_or_fallback(doc, nav, timers, &href, true);
        EventOutcome::PREVENTED
    }

    /// Handle browser back/forward; entries without state are ignored
    pub fn on_pop_state<D, N>(
        &mut self,
        doc: &mut D,
        nav: &mut N,
        timers: &mut Timers,
        state: Option<&HistoryState>,
    ) where
        D: Document + ?Sized,
        N: Navigator + ?Sized,
    {
        match state {
            Some(state) if !state.url.is_empty() => {
                let url = state.url.clone();
                self.navigate_or_fallback(doc, nav, timers, &url, false);
            }
            _ => tracing::debug!("Ignoring popstate without a url"),
        }
    }

    fn navigate_or_fallback<D, N>(
        &mut self,
        doc: &mut D,
        nav: &mut N,
        timers: &mut Timers,
        url: &str,
        record_history: bool,
    ) where
        D: Document + ?Sized,
        N: Navigator + ?Sized,
    {
        if let Err(err) = self.navigate(doc, nav, timers, url, record_history) {
            tracing::error!("Page transition failed ({}), navigating to {} directly", err, url);
            nav.assign(url);
        }
    }

    /// Run a fired transition step
    pub fn fire<N: Navigator + ?Sized>(&mut self, nav: &mut N, task: TransitionTask) {
        match task {
            TransitionTask::Navigate { url } => {
                tracing::info!("Navigating to {}", url);
                nav.assign(&url);
            }
        }
    }
}

/// `div.page-transition-overlay > div.transition-content > (loader rings, text)`
fn build_overlay<D: Document + ?Sized>(doc: &mut D) -> ElementId {
    let overlay = doc.create_element("div");
    doc.add_class(overlay, OVERLAY_CLASS);

    let content = doc.create_element("div");
    doc.add_class(content, "transition-content");

    let loader = doc.create_element("div");
    doc.add_class(loader, "transition-loader");
    for _ in 0..3 {
        let ring = doc.create_element("div");
        doc.add_class(ring, "loader-ring");
        doc.append_child(loader, ring);
    }

    let text = doc.create_element("div");
    doc.add_class(text, "transition-text");
    doc.set_text(text, "Loading...");

    doc.append_child(content, loader);
    doc.append_child(content, text);
    doc.append_child(overlay, content);
    let body = doc.body();
    doc.append_child(body, overlay);
    overlay
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::default_roles;
    use folio_core::{MemoryDocument, MemoryNavigator, NodeSpec};

    fn page() -> (MemoryDocument, MemoryNavigator, ElementId, ElementId) {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let main = doc.append(
            body,
            NodeSpec::new("main").children([
                NodeSpec::new("a").id("about").attr("href", "about.html").text("About"),
                NodeSpec::new("a").id("home").attr("href", "/index.html").text("Home"),
                NodeSpec::new("a").id("ext").attr("href", "https://example.com"),
                NodeSpec::new("a").id("top").attr("href", "#top"),
            ]),
        );
        let about = doc.element_by_id("about").unwrap();
        (doc, MemoryNavigator::new("/index.html"), main, about)
    }

    fn drain(timers: &mut Timers, until: u64) -> Vec<Task> {
        let mut fired = Vec::new();
        while let Some(timer) = timers.pop_due(until) {
            fired.push(timer.task);
        }
        timers.advance_to(until);
        fired
    }

    #[test]
    fn test_install_builds_overlay() {
        let (mut doc, mut nav, _, _) = page();
        let mut transition = PageTransition::new(&default_roles(), 800);
        let overlay = transition.install(&mut doc, &mut nav);

        assert!(doc.has_class(overlay, OVERLAY_CLASS));
        assert!(!doc.has_class(overlay, ACTIVE_CLASS));
        assert_eq!(doc.count(&Selector::class("loader-ring")), 3);
        assert!(doc.text(overlay).contains("Loading..."));
        assert!(doc.element_by_id("transition-styles").is_some());
        assert_eq!(nav.current_state(), Some(&HistoryState::new("/index.html")));
    }

    #[test]
    fn test_click_defers_navigation() {
        let (mut doc, mut nav, main, about) = page();
        let mut timers = Timers::new();
        let mut transition = PageTransition::new(&default_roles(), 800);
        let overlay = transition.install(&mut doc, &mut nav);

        let outcome = transition.on_click(&mut doc, &mut nav, &mut timers, about);
        assert!(outcome.prevent_default);
        assert!(doc.has_class(overlay, ACTIVE_CLASS));
        assert!(doc.has_class(main, FADE_OUT_CLASS));
        assert_eq!(nav.history_len(), 2);
        assert!(nav.assigned().is_empty());

        assert!(drain(&mut timers, 799).is_empty());
        let fired = drain(&mut timers, 800);
        assert_eq!(
            fired,
            vec![Task::Transition(TransitionTask::Navigate {
                url: "about.html".into()
            })]
        );
        for task in fired {
            if let Task::Transition(task) = task {
                transition.fire(&mut nav, task);
            }
        }
        assert_eq!(nav.assigned(), ["about.html".to_string()]);
    }

    #[test]
    fn test_same_page_and_external_links() {
        let (mut doc, mut nav, _, _) = page();
        let mut timers = Timers::new();
        let mut transition = PageTransition::new(&default_roles(), 800);
        transition.install(&mut doc, &mut nav);

        let home = doc.element_by_id("home").unwrap();
        let outcome = transition.on_click(&mut doc, &mut nav, &mut timers, home);
        assert!(outcome.prevent_default);
        assert!(!transition.is_active());

        for id in ["ext", "top"] {
            let link = doc.element_by_id(id).unwrap();
            let outcome = transition.on_click(&mut doc, &mut nav, &mut timers, link);
            assert!(!outcome.prevent_default);
        }
        assert!(timers.is_empty());
    }

    #[test]
    fn test_second_navigation_is_ignored() {
        let (mut doc, mut nav, _, _) = page();
        let mut timers = Timers::new();
        let mut transition = PageTransition::new(&default_roles(), 800);
        transition.install(&mut doc, &mut nav);

        assert!(transition
            .navigate(&mut doc, &mut nav, &mut timers, "a.html", true)
            .unwrap());
        assert!(!transition
            .navigate(&mut doc, &mut nav, &mut timers, "b.html", true)
            .unwrap());
        assert_eq!(timers.len(), 1);
        assert_eq!(
            transition.state(),
            &TransitionState::Active {
                target: "a.html".into()
            }
        );
    }

    #[test]
    fn test_pop_state_does_not_push() {
        let (mut doc, mut nav, _, _) = page();
        let mut timers = Timers::new();
        let mut transition = PageTransition::new(&default_roles(), 800);
        transition.install(&mut doc, &mut nav);

        transition.on_pop_state(&mut doc, &mut nav, &mut timers, None);
        assert!(!transition.is_active());

        let state = HistoryState::new("/projects.html");
        transition.on_pop_state(&mut doc, &mut nav, &mut timers, Some(&state));
        assert!(transition.is_active());
        assert_eq!(nav.history_len(), 1);
    }

    #[test]
    fn test_missing_overlay() {
        let (mut doc, mut nav, main, about) = page();
        let mut timers = Timers::new();
        let mut transition = PageTransition::new(&default_roles(), 800);

        let err = transition
            .navigate(&mut doc, &mut nav, &mut timers, "about.html", true)
            .unwrap_err();
        assert!(matches!(err, FolioError::MissingElement(_)));
        assert!(!doc.has_class(main, FADE_OUT_CLASS));
        assert_eq!(nav.history_len(), 1);

        // Clicks fall back to an immediate navigation
        transition.on_click(&mut doc, &mut nav, &mut timers, about);
        assert_eq!(nav.assigned(), ["about.html".to_string()]);
        assert!(timers.is_empty());
    }
}
