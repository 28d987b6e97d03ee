//! Folio Core
//!
//! Host abstractions shared by every Folio crate:
//!
//! - **Document**: element handles, queries, classes, styles and layout boxes
//! - **Selectors**: the small CSS subset effects use to find their elements
//! - **Events**: page events delivered by the host and their outcomes
//! - **Intersection**: viewport intersection semantics for reveal effects
//! - **Navigator / Storage**: location, session history and persisted values
//!
//! The `memory` module provides in-memory hosts for tests and headless runs.
//!
//! # Example
//!
//! ```rust
//! use folio_core::{Document, MemoryDocument, NodeSpec, Selector};
//!
//! let mut doc = MemoryDocument::new();
//! let body = doc.body();
//! let card = doc.append(body, NodeSpec::new("div").class("project-card"));
//!
//! doc.add_class(card, "fade-in");
//! assert!(doc.matches(card, &Selector::parse(".project-card.fade-in").unwrap()));
//! ```

pub mod dom;
pub mod error;
pub mod events;
pub mod intersection;
pub mod memory;
pub mod platform;
pub mod selector;
pub mod storage;

pub use dom::{Document, ElementId, Rect, ScrollBehavior, ScrollBlock, ScrollOptions};
pub use error::{FolioError, Result};
pub use events::{EventOutcome, Key, PageEvent};
pub use intersection::{
    IntersectionEntry, IntersectionTracker, ObserverId, ObserverOptions, RootMargin,
};
pub use memory::{MemoryDocument, MemoryNavigator, NodeSpec};
pub use platform::{resolve_path, HistoryState, Navigator};
pub use selector::{Selector, SelectorTarget};
pub use storage::{MemoryStorage, Storage, StorageExt};
