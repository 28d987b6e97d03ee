//! Navbar effects
//!
//! The navbar gets a `scrolled` look once the page leaves the top, slides away
//! while scrolling down past the fold and comes back on any upward scroll.
//! Clicking a nav link makes it the active one and plays a ripple inside it.

use folio_core::{Document, ElementId, Selector};

use crate::roles::Roles;
use crate::styles::{self, RIPPLE_STYLES};
use crate::task::{Task, Timers};

/// Offset past which the navbar is `scrolled`
pub const SCROLLED_OFFSET: f32 = 50.0;
/// Offset past which scrolling down hides the navbar
pub const HIDE_OFFSET: f32 = 200.0;

pub const SCROLLED_CLASS: &str = "scrolled";
pub const ACTIVE_CLASS: &str = "active";

/// Delayed navigation steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTask {
    RemoveRipple { ripple: ElementId },
}

pub struct NavigationEffects {
    navbar: Selector,
    nav_link: Selector,
    ripple_ms: u64,
    last_offset: f32,
}

impl NavigationEffects {
    pub fn new(roles: &Roles, ripple_ms: u64) -> Self {
        Self {
            navbar: roles.navbar.clone(),
            nav_link: roles.nav_link.clone(),
            ripple_ms,
            last_offset: 0.0,
        }
    }

    /// Handle a window scroll to `offset`
    pub fn on_scroll<D: Document + ?Sized>(&mut self, doc: &mut D, offset: f32) {
        let previous = std::mem::replace(&mut self.last_offset, offset);
        let Some(navbar) = doc.query(&self.navbar) else {
            return;
        };

        if offset > SCROLLED_OFFSET {
            doc.add_class(navbar, SCROLLED_CLASS);
        } else {
            doc.remove_class(navbar, SCROLLED_CLASS);
        }

        let transform = if offset > previous && offset > HIDE_OFFSET {
            "translateY(-100%)"
        } else {
            "translateY(0)"
        };
        doc.set_style(navbar, "transform", transform);
    }

    /// Handle a click; returns true if it landed on a nav link
    pub fn on_click<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        timers: &mut Timers,
        target: ElementId,
    ) -> bool {
        let Some(link) = doc.closest(target, &self.nav_link) else {
            return false;
        };

        for other in doc.query_all(&self.nav_link) {
            doc.remove_class(other, ACTIVE_CLASS);
        }
        doc.add_class(link, ACTIVE_CLASS);
        self.ripple(doc, timers, link);
        true
    }

    /// Play a click ripple centred inside `element`
    pub fn ripple<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        timers: &mut Timers,
        element: ElementId,
    ) -> ElementId {
        let ripple = doc.create_element("span");
        doc.add_class(ripple, "ripple");
        doc.append_child(element, ripple);

        let rect = doc.bounds(element);
        let size = rect.width.max(rect.height);
        let px = |v: f32| format!("{v}px");
        doc.set_style(ripple, "width", &px(size));
        doc.set_style(ripple, "height", &px(size));
        doc.set_style(ripple, "left", &px(rect.width / 2.0 - size / 2.0));
        doc.set_style(ripple, "top", &px(rect.height / 2.0 - size / 2.0));
        for (property, value) in [
            ("position", "absolute"),
            ("border-radius", "50%"),
            ("background", "rgba(255, 255, 255, 0.3)"),
            ("transform", "scale(0)"),
            ("animation", "ripple 0.6s linear"),
            ("pointer-events", "none"),
        ] {
            doc.set_style(ripple, property, value);
        }

        styles::inject(doc, &RIPPLE_STYLES);
        timers.schedule(
            self.ripple_ms,
            Task::from(NavigationTask::RemoveRipple { ripple }),
        );
        ripple
    }

    /// Run a fired navigation step
    pub fn fire<D: Document + ?Sized>(&mut self, doc: &mut D, task: NavigationTask) {
        match task {
            NavigationTask::RemoveRipple { ripple } => doc.remove(ripple),
        }
    }
}
