//! Contact form validation
//!
//! The form is validated on submit and answered with a notification. Nothing
//! is sent anywhere; a valid form is simply cleared.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use folio_core::{Document, ElementId, EventOutcome, Selector};

use crate::notification::{NotificationKind, Notifications};
use crate::roles::Roles;
use crate::task::Timers;

pub const SUCCESS_MESSAGE: &str = "Thank you for your message! I'll get back to you soon.";

/// Why a submission was rejected; the message is shown to the visitor
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactError {
    #[error("Please fill in all required fields.")]
    MissingFields,

    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// A validated submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    /// Validate named form values; a repeated name keeps its last value
    pub fn validate(values: &[(String, String)]) -> Result<Self, ContactError> {
        let field = |name: &str| {
            values
                .iter()
                .rev()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
                .filter(|value| !value.is_empty())
                .ok_or(ContactError::MissingFields)
        };

        let message = ContactMessage {
            name: field("name")?,
            email: field("email")?,
            message: field("message")?,
        };
        if !is_valid_email(&message.email) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(message)
    }
}

/// Loose `local@domain.tld` shape check
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
        .is_match(email)
}

pub struct ContactForm {
    form: Selector,
}

impl ContactForm {
    pub fn new(roles: &Roles) -> Self {
        Self {
            form: roles.contact_form.clone(),
        }
    }

    /// Handle a form submission
    pub fn on_submit<D: Document + ?Sized>(
        &self,
        doc: &mut D,
        timers: &mut Timers,
        notifications: &mut Notifications,
        form: ElementId,
    ) -> EventOutcome {
        if !doc.matches(form, &self.form) {
            return EventOutcome::IGNORED;
        }

        match ContactMessage::validate(&doc.form_values(form)) {
            Ok(message) => {
                tracing::debug!("Contact form accepted from {}", message.email);
                notifications.show(doc, timers, SUCCESS_MESSAGE, NotificationKind::Success);
                doc.reset_form(form);
            }
            Err(err) => {
                notifications.show(doc, timers, &err.to_string(), NotificationKind::Error);
            }
        }
        EventOutcome::PREVENTED
    }
}
