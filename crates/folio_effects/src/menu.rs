//! Mobile menu
//!
//! The menu button slides the nav links open and closed and swaps its glyph.
//! Closing is animated: the links slide up and only lose `active` once the
//! animation has run. Re-opening during that window cancels the pending
//! close.

use folio_animation::TimerId;
use folio_core::{Document, ElementId, Key, Selector};

use crate::roles::Roles;
use crate::styles::{self, MOBILE_MENU_STYLES};
use crate::task::{Task, Timers};

pub const ACTIVE_CLASS: &str = "active";
/// Button glyph while the menu is open
pub const OPEN_GLYPH: &str = "✕";
/// Button glyph while the menu is closed
pub const CLOSED_GLYPH: &str = "☰";

const SLIDE_DOWN: &str = "slideDown 0.3s ease forwards";
const SLIDE_UP: &str = "slideUp 0.3s ease forwards";

/// Delayed menu steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTask {
    FinishClose,
}

pub struct MobileMenu {
    button: Selector,
    menu: Selector,
    nav_link: Selector,
    close_ms: u64,
    pending_close: Option<TimerId>,
}

impl MobileMenu {
    pub fn new(roles: &Roles, close_ms: u64) -> Self {
        Self {
            button: roles.menu_button.clone(),
            menu: roles.menu.clone(),
            nav_link: roles.nav_link.clone(),
            close_ms,
            pending_close: None,
        }
    }

    fn elements<D: Document + ?Sized>(&self, doc: &D) -> Option<(ElementId, ElementId)> {
        Some((doc.query(&self.button)?, doc.query(&self.menu)?))
    }

    /// Inject the slide styles when the page has a menu
    pub fn install<D: Document + ?Sized>(&mut self, doc: &mut D) -> bool {
        if self.elements(doc).is_none() {
            return false;
        }
        styles::inject(doc, &MOBILE_MENU_STYLES);
        true
    }

    /// Open and not in the middle of closing
    pub fn is_open<D: Document + ?Sized>(&self, doc: &D) -> bool {
        self.pending_close.is_none()
            && self
                .elements(doc)
                .is_some_and(|(_, menu)| doc.has_class(menu, ACTIVE_CLASS))
    }

    /// Handle a click; returns true if the menu reacted
    pub fn on_click<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        timers: &mut Timers,
        target: ElementId,
    ) -> bool {
        if doc.closest(target, &self.button).is_some() {
            return self.toggle(doc, timers);
        }
        if doc.closest(target, &self.nav_link).is_some() {
            return self.close_now(doc, timers);
        }
        false
    }

    /// Escape closes an open menu
    pub fn on_key<D: Document + ?Sized>(&mut self, doc: &mut D, timers: &mut Timers, key: &Key) -> bool {
        if *key != Key::Escape {
            return false;
        }
        let open = self
            .elements(doc)
            .is_some_and(|(_, menu)| doc.has_class(menu, ACTIVE_CLASS));
        open && self.close_now(doc, timers)
    }

    /// Open a closed (or closing) menu, start closing an open one
    pub fn toggle<D: Document + ?Sized>(&mut self, doc: &mut D, timers: &mut Timers) -> bool {
        let Some((button, menu)) = self.elements(doc) else {
            return false;
        };

        if self.is_open(doc) {
            doc.set_style(menu, "animation", SLIDE_UP);
            self.pending_close = Some(timers.schedule(self.close_ms, Task::from(MenuTask::FinishClose)));
            set_glyph(doc, button, false);
        } else {
            if let Some(pending) = self.pending_close.take() {
                timers.cancel(pending);
            }
            doc.add_class(menu, ACTIVE_CLASS);
            doc.set_style(menu, "animation", SLIDE_DOWN);
            set_glyph(doc, button, true);
        }
        true
    }

    /// Close without animation
    pub fn close_now<D: Document + ?Sized>(&mut self, doc: &mut D, timers: &mut Timers) -> bool {
        let Some((button, menu)) = self.elements(doc) else {
            return false;
        };
        if let Some(pending) = self.pending_close.take() {
            timers.cancel(pending);
        }
        doc.remove_class(menu, ACTIVE_CLASS);
        doc.set_style(menu, "animation", "");
        set_glyph(doc, button, false);
        true
    }

    /// Run a fired menu step
    pub fn fire<D: Document + ?Sized>(&mut self, doc: &mut D, task: MenuTask) {
        match task {
            MenuTask::FinishClose => {
                self.pending_close = None;
                if let Some((_, menu)) = self.elements(doc) {
                    doc.remove_class(menu, ACTIVE_CLASS);
                    doc.set_style(menu, "animation", "");
                }
            }
        }
    }
}

fn set_glyph<D: Document + ?Sized>(doc: &mut D, button: ElementId, open: bool) {
    if open {
        doc.add_class(button, ACTIVE_CLASS);
        doc.set_text(button, OPEN_GLYPH);
        doc.set_style(button, "transform", "rotate(180deg)");
    } else {
        doc.remove_class(button, ACTIVE_CLASS);
        doc.set_text(button, CLOSED_GLYPH);
        doc.set_style(button, "transform", "rotate(0deg)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::default_roles;
    use folio_core::{MemoryDocument, NodeSpec};

    struct Page {
        doc: MemoryDocument,
        timers: Timers,
        menu: MobileMenu,
        button: ElementId,
        links: ElementId,
    }

    impl Page {
        fn new() -> Self {
            let mut doc = MemoryDocument::new();
            let body = doc.body();
            doc.append(
                body,
                NodeSpec::new("nav").children([
                    NodeSpec::new("button").id("mobile-menu-btn").text(CLOSED_GLYPH),
                    NodeSpec::new("ul").id("nav-links").child(
                        NodeSpec::new("a").class("nav-link").id("about").attr("href", "#about"),
                    ),
                ]),
            );
            let button = doc.element_by_id("mobile-menu-btn").unwrap();
            let links = doc.element_by_id("nav-links").unwrap();
            let mut menu = MobileMenu::new(&default_roles(), 300);
            assert!(menu.install(&mut doc));
            Self {
                doc,
                timers: Timers::new(),
                menu,
                button,
                links,
            }
        }

        fn click(&mut self, target: ElementId) -> bool {
            self.menu.on_click(&mut self.doc, &mut self.timers, target)
        }

        fn run(&mut self, until: u64) {
            while let Some(timer) = self.timers.pop_due(until) {
                if let Task::Menu(task) = timer.task {
                    self.menu.fire(&mut self.doc, task);
                }
            }
            self.timers.advance_to(until);
        }
    }

    #[test]
    fn test_open_then_animated_close() {
        let mut page = Page::new();
        assert!(page.doc.element_by_id("mobile-menu-styles").is_some());

        page.click(page.button);
        assert!(page.menu.is_open(&page.doc));
        assert_eq!(page.doc.text(page.button), OPEN_GLYPH);
        assert_eq!(page.doc.style(page.button, "transform").as_deref(), Some("rotate(180deg)"));
        assert_eq!(page.doc.style(page.links, "animation").as_deref(), Some(SLIDE_DOWN));

        page.click(page.button);
        assert_eq!(page.doc.text(page.button), CLOSED_GLYPH);
        assert!(!page.menu.is_open(&page.doc));
        // Still visible while sliding up
        assert!(page.doc.has_class(page.links, ACTIVE_CLASS));
        page.run(299);
        assert!(page.doc.has_class(page.links, ACTIVE_CLASS));
        page.run(300);
        assert!(!page.doc.has_class(page.links, ACTIVE_CLASS));
        assert_eq!(page.doc.style(page.links, "animation"), None);
    }

    #[test]
    fn test_reopen_cancels_pending_close() {
        let mut page = Page::new();
        page.click(page.button);
        page.click(page.button);
        page.run(100);
        page.click(page.button);

        page.run(1000);
        assert!(page.menu.is_open(&page.doc));
        assert!(page.doc.has_class(page.links, ACTIVE_CLASS));
        assert_eq!(page.doc.text(page.button), OPEN_GLYPH);
    }

    #[test]
    fn test_nav_link_and_escape_close() {
        let mut page = Page::new();
        let about = page.doc.element_by_id("about").unwrap();

        page.click(page.button);
        assert!(page.click(about));
        assert!(!page.doc.has_class(page.links, ACTIVE_CLASS));
        assert!(!page.doc.has_class(page.button, ACTIVE_CLASS));
        assert_eq!(page.doc.text(page.button), CLOSED_GLYPH);

        page.click(page.button);
        assert!(page.menu.on_key(&mut page.doc, &mut page.timers, &Key::Escape));
        assert!(!page.menu.is_open(&page.doc));
        assert!(!page.menu.on_key(&mut page.doc, &mut page.timers, &Key::Escape));
        assert!(!page.menu.on_key(&mut page.doc, &mut page.timers, &Key::Enter));
    }

    #[test]
    fn test_without_menu_elements() {
        let mut doc = MemoryDocument::new();
        let mut timers = Timers::new();
        let mut menu = MobileMenu::new(&default_roles(), 300);
        assert!(!menu.install(&mut doc));
        assert!(!menu.toggle(&mut doc, &mut timers));
        assert!(!menu.on_key(&mut doc, &mut timers, &Key::Escape));
    }
}
