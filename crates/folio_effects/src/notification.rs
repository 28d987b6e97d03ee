//! Transient notifications
//!
//! One message at a time: showing a new notification removes the current one
//! on the spot. Each notification slides in shortly after creation, starts
//! leaving after a fixed time and is removed once its exit transition ends.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use folio_core::{Document, ElementId, FolioError, Selector};

use crate::roles::Roles;
use crate::task::{Task, Timers};

/// Class toggled to slide a notification in
pub const SHOW_CLASS: &str = "show";

/// Notification flavor, reflected in its `notification-<kind>` class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Error,
    Success,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Error => "error",
            NotificationKind::Success => "success",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(NotificationKind::Info),
            "error" => Ok(NotificationKind::Error),
            "success" => Ok(NotificationKind::Success),
            other => Err(FolioError::InvalidAttribute {
                name: "kind".into(),
                value: other.into(),
            }),
        }
    }
}

/// Notification lifecycle delays in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationTimings {
    /// Creation to `show`
    pub show_delay_ms: u64,
    /// Creation to start of exit
    pub visible_ms: u64,
    /// Exit start to removal
    pub exit_ms: u64,
}

impl Default for NotificationTimings {
    fn default() -> Self {
        Self {
            show_delay_ms: 100,
            visible_ms: 4000,
            exit_ms: 300,
        }
    }
}

/// Delayed notification steps, keyed by the element they belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationTask {
    Show { element: ElementId },
    Hide { element: ElementId },
    Remove { element: ElementId },
}

pub struct Notifications {
    selector: Selector,
    timings: NotificationTimings,
    current: Option<ElementId>,
}

impl Notifications {
    pub fn new(roles: &Roles, timings: NotificationTimings) -> Self {
        Self {
            selector: roles.notification.clone(),
            timings,
            current: None,
        }
    }

    /// The notification on screen, if any
    pub fn current(&self) -> Option<ElementId> {
        self.current
    }

    /// Replace whatever is on screen with `message`
    pub fn show<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        timers: &mut Timers,
        message: &str,
        kind: NotificationKind,
    ) -> ElementId {
        for existing in doc.query_all(&self.selector) {
            doc.remove(existing);
        }

        let element = doc.create_element("div");
        doc.add_class(element, &format!("notification notification-{kind}"));
        doc.set_text(element, message);
        let body = doc.body();
        doc.append_child(body, element);
        self.current = Some(element);

        timers.schedule(
            self.timings.show_delay_ms,
            Task::from(NotificationTask::Show { element }),
        );
        timers.schedule(
            self.timings.visible_ms,
            Task::from(NotificationTask::Hide { element }),
        );
        tracing::debug!("Notification ({}): {}", kind, message);
        element
    }

    /// Run a fired step; steps of a replaced notification do nothing
    pub fn fire<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        timers: &mut Timers,
        task: NotificationTask,
    ) {
        match task {
            NotificationTask::Show { element } if self.current == Some(element) => {
                doc.add_class(element, SHOW_CLASS);
            }
            NotificationTask::Hide { element } if self.current == Some(element) => {
                doc.remove_class(element, SHOW_CLASS);
                timers.schedule(
                    self.timings.exit_ms,
                    Task::from(NotificationTask::Remove { element }),
                );
            }
            NotificationTask::Remove { element } if self.current == Some(element) => {
                doc.remove(element);
                self.current = None;
            }
            stale => tracing::trace!("Dropping stale notification step {:?}", stale),
        }
    }
}
