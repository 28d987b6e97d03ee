//! Folio Application
//!
//! Wires every page effect to a host and keeps them running.
//!
//! # Example (headless)
//!
//! ```rust
//! use folio_app::prelude::*;
//!
//! let mut doc = MemoryDocument::new();
//! let body = doc.body();
//! doc.append(body, NodeSpec::new("h1").class("hero-title"));
//!
//! let mut app = PortfolioApp::new(
//!     SiteConfig::default(),
//!     doc,
//!     MemoryNavigator::new("/index.html"),
//!     MemoryStorage::new(),
//! )?;
//! app.start(0);
//! app.advance_to(1000);
//!
//! let title = app.doc().query(&Selector::class("hero-title")).unwrap();
//! assert_eq!(app.doc().text(title), "H");
//! # Ok::<(), folio_app::AppError>(())
//! ```

mod app;
pub mod config;
mod error;
pub mod logging;

#[cfg(test)]
mod tests;

pub use app::PortfolioApp;
pub use config::{Features, SiteConfig, Timings};
pub use error::{AppError, Result};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::app::PortfolioApp;
    pub use crate::config::SiteConfig;
    pub use crate::error::{AppError, Result};

    // Host abstractions
    pub use folio_core::{
        Document, ElementId, EventOutcome, Key, MemoryDocument, MemoryNavigator, MemoryStorage,
        Navigator, NodeSpec, PageEvent, Selector, Storage,
    };

    // Effects
    pub use folio_effects::{NotificationKind, Theme};
}
