//! Scheduled continuations
//!
//! Effects never hold closures in timers. Each delayed step is a [`Task`]
//! value that the app routes back to the effect that scheduled it.

use folio_animation::TimerQueue;

use crate::filter::FilterTask;
use crate::loader::LoaderTask;
use crate::menu::MenuTask;
use crate::navigation::NavigationTask;
use crate::notification::NotificationTask;
use crate::reveal::RevealTask;
use crate::transition::TransitionTask;
use crate::typing::TypingTask;

/// A delayed step of one effect
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    Transition(TransitionTask),
    Reveal(RevealTask),
    Typing(TypingTask),
    Notification(NotificationTask),
    Loader(LoaderTask),
    Navigation(NavigationTask),
    Filter(FilterTask),
    Menu(MenuTask),
}

impl Task {
    /// Short name for logging
    pub fn effect(&self) -> &'static str {
        match self {
            Task::Transition(_) => "transition",
            Task::Reveal(_) => "reveal",
            Task::Typing(_) => "typing",
            Task::Notification(_) => "notification",
            Task::Loader(_) => "loader",
            Task::Navigation(_) => "navigation",
            Task::Filter(_) => "filter",
            Task::Menu(_) => "menu",
        }
    }
}

macro_rules! impl_from_task {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Task {
                fn from(task: $ty) -> Self {
                    Task::$variant(task)
                }
            }
        )*
    };
}

impl_from_task!(
    Transition(TransitionTask),
    Reveal(RevealTask),
    Typing(TypingTask),
    Notification(NotificationTask),
    Loader(LoaderTask),
    Navigation(NavigationTask),
    Filter(FilterTask),
    Menu(MenuTask),
);

/// The page's timer queue
pub type Timers = TimerQueue<Task>;
