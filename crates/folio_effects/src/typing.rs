//! Hero typing effect
//!
//! Binds a [`TypingEngine`] to the hero title and subtitle. Only runs on the
//! landing page, and only when a hero title exists at startup.

use folio_animation::TypingEngine;
use folio_core::{Document, Navigator, Selector};

use crate::roles::Roles;
use crate::task::{Task, Timers};

/// Delayed typing step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingTask {
    Tick,
}

/// Whether `path` is the landing page
pub fn is_landing_page(path: &str) -> bool {
    path.contains("index.html") || path == "/"
}

pub struct TypingEffect {
    engine: TypingEngine,
    title: Selector,
    subtitle: Selector,
    start_delay_ms: u64,
    running: bool,
}

impl TypingEffect {
    pub fn new(roles: &Roles, engine: TypingEngine, start_delay_ms: u64) -> Self {
        Self {
            engine,
            title: roles.hero_title.clone(),
            subtitle: roles.hero_subtitle.clone(),
            start_delay_ms,
            running: false,
        }
    }

    pub fn engine(&self) -> &TypingEngine {
        &self.engine
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Schedule the first tick; returns false when the effect stays inert
    pub fn start<D, N>(&mut self, doc: &D, nav: &N, timers: &mut Timers) -> bool
    where
        D: Document + ?Sized,
        N: Navigator + ?Sized,
    {
        if self.running {
            return false;
        }
        let path = nav.pathname();
        if !is_landing_page(&path) {
            tracing::debug!("Typing effect disabled on {}", path);
            return false;
        }
        if doc.query(&self.title).is_none() {
            tracing::debug!("No hero title, typing effect disabled");
            return false;
        }

        timers.schedule(self.start_delay_ms, Task::from(TypingTask::Tick));
        self.running = true;
        true
    }

    /// Render one frame and schedule the next tick
    pub fn fire<D: Document + ?Sized>(&mut self, doc: &mut D, timers: &mut Timers) {
        let Some(title) = doc.query(&self.title) else {
            tracing::debug!("Hero title removed, stopping typing effect");
            self.running = false;
            return;
        };

        let frame = self.engine.tick();
        doc.set_text(title, &frame.title);
        if let Some(subtitle) = doc.query(&self.subtitle) {
            doc.set_text(subtitle, &frame.subtitle);
        }
        timers.schedule(frame.delay_ms, Task::from(TypingTask::Tick));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::default_roles;
    use folio_animation::{PhrasePair, TypingTimings};
    use folio_core::{MemoryDocument, MemoryNavigator, NodeSpec};

    fn effect() -> TypingEffect {
        let engine = TypingEngine::new(
            vec![PhrasePair::new("Hi", "Sub")],
            TypingTimings::default(),
        )
        .unwrap();
        TypingEffect::new(&default_roles(), engine, 1000)
    }

    fn hero() -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        doc.append(body, NodeSpec::new("h1").class("hero-title"));
        doc.append(body, NodeSpec::new("p").class("hero-subtitle"));
        doc
    }

    #[test]
    fn test_landing_page_detection() {
        assert!(is_landing_page("/"));
        assert!(is_landing_page("/index.html"));
        assert!(is_landing_page("/blog/index.html"));
        assert!(!is_landing_page("/about.html"));
    }

    #[test]
    fn test_types_after_start_delay() {
        let mut doc = hero();
        let mut timers = Timers::new();
        let mut typing = effect();
        assert!(typing.start(&doc, &MemoryNavigator::new("/"), &mut timers));
        assert!(!typing.start(&doc, &MemoryNavigator::new("/"), &mut timers));
        assert_eq!(timers.next_due(), Some(1000));

        let title = doc.query(&Selector::class("hero-title")).unwrap();
        let subtitle = doc.query(&Selector::class("hero-subtitle")).unwrap();
        let mut seen = Vec::new();
        while let Some(timer) = timers.pop_due(3649) {
            assert_eq!(timer.task, Task::Typing(TypingTask::Tick));
            typing.fire(&mut doc, &mut timers);
            seen.push((timers.now(), doc.text(title)));
        }
        assert_eq!(
            seen,
            vec![
                (1000, "H".to_string()),
                (1100, "Hi".to_string()),
                (3100, "H".to_string()),
                (3150, String::new()),
            ]
        );
        assert_eq!(doc.text(subtitle), "Sub");
    }

    #[test]
    fn test_inert_off_landing_or_without_title() {
        let mut timers = Timers::new();
        let mut typing = effect();
        assert!(!typing.start(&hero(), &MemoryNavigator::new("/about.html"), &mut timers));
        assert!(!typing.start(&MemoryDocument::new(), &MemoryNavigator::new("/"), &mut timers));
        assert!(timers.is_empty());
        assert!(!typing.is_running());
    }
}
