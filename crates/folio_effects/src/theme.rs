//! Light/dark theme toggle
//!
//! The chosen theme lives in the body's `data-theme` attribute and is
//! persisted under [`THEME_KEY`] so it survives page loads.

use std::fmt;
use std::str::FromStr;

use folio_core::{Document, ElementId, FolioError, Selector, Storage, StorageExt};

use crate::roles::Roles;

/// Storage key of the persisted theme
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Toggle button glyph: the theme a click switches to
    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(FolioError::InvalidAttribute {
                name: "data-theme".into(),
                value: other.into(),
            }),
        }
    }
}

pub struct ThemeToggle {
    button: Selector,
    container: Selector,
}

impl ThemeToggle {
    pub fn new(roles: &Roles) -> Self {
        Self {
            button: roles.theme_toggle.clone(),
            container: roles.nav_container.clone(),
        }
    }

    /// Add the toggle button if missing and apply the saved theme
    pub fn install<D, S>(&self, doc: &mut D, storage: &S) -> Option<ElementId>
    where
        D: Document + ?Sized,
        S: Storage + ?Sized,
    {
        let button = match doc.query(&self.button) {
            Some(button) => Some(button),
            None => doc.query(&self.container).map(|container| {
                let button = doc.create_element("button");
                doc.add_class(button, "theme-toggle");
                doc.set_attribute(button, "aria-label", "Toggle theme");
                doc.set_text(button, Theme::Light.icon());
                doc.append_child(container, button);
                button
            }),
        };

        if let Some(saved) = storage.get_parsed::<Theme>(THEME_KEY) {
            self.apply(doc, button, saved);
        }
        button
    }

    /// The body's current theme
    pub fn current<D: Document + ?Sized>(&self, doc: &D) -> Theme {
        doc.attribute(doc.body(), "data-theme")
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Handle a click; returns true if it landed on the toggle
    pub fn on_click<D, S>(&self, doc: &mut D, storage: &mut S, target: ElementId) -> bool
    where
        D: Document + ?Sized,
        S: Storage + ?Sized,
    {
        let Some(button) = doc.closest(target, &self.button) else {
            return false;
        };
        let theme = self.current(doc).toggled();
        self.apply(doc, Some(button), theme);
        storage.set_display(THEME_KEY, &theme);
        tracing::debug!("Theme switched to {}", theme);
        true
    }

    fn apply<D: Document + ?Sized>(&self, doc: &mut D, button: Option<ElementId>, theme: Theme) {
        let body = doc.body();
        doc.set_attribute(body, "data-theme", theme.as_str());
        if let Some(button) = button {
            doc.set_text(button, theme.icon());
        }
    }
}
