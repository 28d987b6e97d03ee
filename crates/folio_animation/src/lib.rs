//! Folio Animation System
//!
//! Time-driven state machines behind the page effects.
//!
//! # Features
//!
//! - **Timer Queue**: virtual-time timeouts and intervals, fired in deadline order
//! - **Typing Engine**: type/hold/delete/hold loop over phrase pairs
//! - **Progress Meter**: random, monotonic, clamped loader progress
//! - **Stagger**: per-index start delays for lists of elements

pub mod error;
pub mod progress;
pub mod scheduler;
pub mod stagger;
pub mod typing;

pub use error::{AnimationError, Result};
pub use progress::{ProgressMeter, PROGRESS_MAX};
pub use scheduler::{FiredTimer, Millis, TimerId, TimerQueue};
pub use stagger::StaggerConfig;
pub use typing::{
    default_phrases, PhrasePair, TypingEngine, TypingFrame, TypingPhase, TypingTimings,
};
