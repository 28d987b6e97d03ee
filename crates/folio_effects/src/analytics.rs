//! Page analytics
//!
//! Events are structured log records on the [`ANALYTICS_TARGET`] target; a
//! subscriber decides where they go. The recorder also keeps what it sent so
//! the host (and tests) can inspect it.

use serde::Serialize;
use serde_json::{json, Value};

use folio_core::{Document, ElementId, Navigator, Selector};

use crate::roles::Roles;

/// `tracing` target of analytics records
pub const ANALYTICS_TARGET: &str = "folio::analytics";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub name: String,
    pub data: Value,
}

/// Emit one analytics record
pub fn track_event(name: &str, data: &Value) {
    tracing::info!(target: ANALYTICS_TARGET, event = name, data = %data, "Analytics event");
}

pub struct Analytics {
    tracked: Selector,
    events: Vec<AnalyticsEvent>,
}

impl Analytics {
    pub fn new(roles: &Roles) -> Self {
        Self {
            tracked: roles.tracked_button.clone(),
            events: Vec::new(),
        }
    }

    /// Events recorded so far, oldest first
    pub fn events(&self) -> &[AnalyticsEvent] {
        &self.events
    }

    fn record(&mut self, name: &str, data: Value) {
        track_event(name, &data);
        self.events.push(AnalyticsEvent {
            name: name.to_string(),
            data,
        });
    }

    pub fn page_view<D, N>(&mut self, doc: &D, nav: &N)
    where
        D: Document + ?Sized,
        N: Navigator + ?Sized,
    {
        let data = json!({
            "page": nav.pathname(),
            "title": doc.title(),
        });
        self.record("page_view", data);
    }

    /// Record clicks on tracked buttons; returns true if one was hit
    pub fn on_click<D: Document + ?Sized>(&mut self, doc: &D, target: ElementId) -> bool {
        let Some(button) = doc.closest(target, &self.tracked) else {
            return false;
        };
        let data = json!({
            "button_text": doc.text(button).trim(),
            "button_class": doc.attribute(button, "class").unwrap_or_default(),
        });
        self.record("button_click", data);
        true
    }
}
