//! Page events delivered by the host
//!
//! The host translates browser callbacks into [`PageEvent`]s and hands them
//! to the app one at a time. The app answers with an [`EventOutcome`] telling
//! the host whether the browser's default action must be suppressed.

use crate::dom::ElementId;
use crate::intersection::IntersectionEntry;
use crate::platform::HistoryState;

/// Keyboard key relevant to page effects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    /// Any other key, by its DOM `key` value
    Other(String),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            other => Key::Other(other.to_string()),
        }
    }
}

/// An event raised by the page
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Primary click; `target` is the innermost element clicked
    Click { target: ElementId },
    /// Browser back/forward navigation
    PopState { state: Option<HistoryState> },
    /// Window scrolled to a vertical offset
    Scroll { offset: f32 },
    /// A form was submitted
    Submit { form: ElementId },
    /// A key was pressed anywhere in the document
    KeyDown { key: Key },
    /// An observed element crossed its observer's threshold
    Intersection(IntersectionEntry),
    /// An uncaught script error surfaced by the host
    Error { message: String },
}

impl PageEvent {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            PageEvent::Click { .. } => "click",
            PageEvent::PopState { .. } => "popstate",
            PageEvent::Scroll { .. } => "scroll",
            PageEvent::Submit { .. } => "submit",
            PageEvent::KeyDown { .. } => "keydown",
            PageEvent::Intersection(_) => "intersection",
            PageEvent::Error { .. } => "error",
        }
    }
}

/// What the host should do after the app handled an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// Suppress the browser's default action
    pub prevent_default: bool,
}

impl EventOutcome {
    pub const IGNORED: EventOutcome = EventOutcome {
        prevent_default: false,
    };

    pub const PREVENTED: EventOutcome = EventOutcome {
        prevent_default: true,
    };

    /// Combine outcomes of several handlers for the same event
    pub fn merge(self, other: EventOutcome) -> EventOutcome {
        EventOutcome {
            prevent_default: self.prevent_default || other.prevent_default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_dom() {
        assert_eq!(Key::from_dom("Escape"), Key::Escape);
        assert_eq!(Key::from_dom("Esc"), Key::Escape);
        assert_eq!(Key::from_dom("a"), Key::Other("a".into()));
    }

    #[test]
    fn test_outcome_merge() {
        assert!(EventOutcome::IGNORED.merge(EventOutcome::PREVENTED).prevent_default);
        assert!(!EventOutcome::IGNORED.merge(EventOutcome::IGNORED).prevent_default);
    }
}
