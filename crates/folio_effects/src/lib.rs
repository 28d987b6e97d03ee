//! Folio Effects
//!
//! The page's interactive behaviour, one component per effect.
//!
//! # Features
//!
//! - **Page Transitions**: overlay, page fade and deferred navigation for
//!   internal links and history moves
//! - **Reveals**: sections and cards animate in once on first sight, skill
//!   bars fill to their `data-width`
//! - **Typing**: hero title and subtitle typed and deleted in a loop
//! - **Notifications**: one transient message at a time
//! - **Bootstrap Loader**: cosmetic progress bar and staggered page entrance
//! - **Navigation**: navbar scroll states, active link and click ripple
//! - **Project Filter**, **Mobile Menu**, **Smooth Scroll**, **Theme Toggle**
//! - **Contact Form** validation and **Analytics** records
//!
//! Components never own timers or closures. Delayed work is scheduled as a
//! [`Task`] on the shared [`Timers`] queue; whoever drives the queue hands
//! each fired task back to the component's `fire` method.

pub mod analytics;
pub mod contact;
pub mod filter;
pub mod loader;
pub mod menu;
pub mod navigation;
pub mod notification;
pub mod reveal;
pub mod roles;
pub mod smooth_scroll;
pub mod styles;
pub mod task;
pub mod theme;
pub mod transition;
pub mod typing;

pub use analytics::{track_event, Analytics, AnalyticsEvent, ANALYTICS_TARGET};
pub use contact::{is_valid_email, ContactError, ContactForm, ContactMessage, SUCCESS_MESSAGE};
pub use filter::{FilterTask, ProjectFilter, FILTER_ALL};
pub use loader::{BootstrapLoader, LoaderPhase, LoaderTask, LoaderTimings};
pub use menu::{MenuTask, MobileMenu};
pub use navigation::{NavigationEffects, NavigationTask};
pub use notification::{NotificationKind, NotificationTask, NotificationTimings, Notifications};
pub use reveal::{
    ProgressBarAnimator, RevealAnimator, RevealTask, PROGRESS_OBSERVER, REVEAL_OBSERVER,
};
pub use roles::{RoleConfig, Roles};
pub use smooth_scroll::SmoothScroll;
pub use styles::StyleSheet;
pub use task::{Task, Timers};
pub use theme::{Theme, ThemeToggle, THEME_KEY};
pub use transition::{PageTransition, TransitionState, TransitionTask};
pub use typing::{is_landing_page, TypingEffect, TypingTask};
