//! Project filter
//!
//! Filter buttons carry a `data-filter` key; project cards carry a
//! `data-category`. Matching cards are shown one after another, the rest are
//! hidden at once. A newer filter click supersedes reveals still pending from
//! an older one.

use folio_animation::StaggerConfig;
use folio_core::{Document, ElementId, Selector};

use crate::roles::Roles;
use crate::task::{Task, Timers};

/// Filter key that matches every card
pub const FILTER_ALL: &str = "all";

pub const ACTIVE_CLASS: &str = "active";
pub const SHOW_CLASS: &str = "show";

/// Delayed filter steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTask {
    /// Show one card, if its filter generation is still current
    Show { card: ElementId, generation: u64 },
}

pub struct ProjectFilter {
    buttons: Selector,
    cards: Selector,
    stagger: StaggerConfig,
    generation: u64,
    active: Option<String>,
}

impl ProjectFilter {
    pub fn new(roles: &Roles, stagger_ms: u64) -> Self {
        Self {
            buttons: roles.filter_button.clone(),
            cards: roles.project_card.clone(),
            stagger: StaggerConfig::new(stagger_ms),
            generation: 0,
            active: None,
        }
    }

    /// The last applied filter key
    pub fn active_filter(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Handle a click; returns true if it landed on a filter button
    pub fn on_click<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        timers: &mut Timers,
        target: ElementId,
    ) -> bool {
        let Some(button) = doc.closest(target, &self.buttons) else {
            return false;
        };
        let Some(filter) = doc.attribute(button, "data-filter") else {
            tracing::warn!("Filter button without data-filter");
            return false;
        };

        for other in doc.query_all(&self.buttons) {
            doc.remove_class(other, ACTIVE_CLASS);
        }
        doc.add_class(button, ACTIVE_CLASS);
        self.apply(doc, timers, &filter);
        true
    }

    /// Show the cards matching `filter` and hide the others
    pub fn apply<D: Document + ?Sized>(&mut self, doc: &mut D, timers: &mut Timers, filter: &str) {
        self.generation += 1;
        self.active = Some(filter.to_string());

        let cards = doc.query_all(&self.cards);
        for (index, card) in cards.into_iter().enumerate() {
            let category = doc.attribute(card, "data-category");
            if filter == FILTER_ALL || category.as_deref() == Some(filter) {
                timers.schedule(
                    self.stagger.delay_for_index(index),
                    Task::from(FilterTask::Show {
                        card,
                        generation: self.generation,
                    }),
                );
            } else {
                doc.set_style(card, "display", "none");
                doc.remove_class(card, SHOW_CLASS);
            }
        }
        tracing::debug!("Applied project filter {}", filter);
    }

    /// Run a fired filter step
    pub fn fire<D: Document + ?Sized>(&mut self, doc: &mut D, task: FilterTask) {
        match task {
            FilterTask::Show { card, generation } if generation == self.generation => {
                doc.set_style(card, "display", "block");
                doc.add_class(card, SHOW_CLASS);
            }
            FilterTask::Show { .. } => {}
        }
    }
}
