//! Scroll-triggered reveals
//!
//! [`RevealAnimator`] marks page sections and cards `animate-in` the first
//! time they scroll into view, then reveals their cards one after another.
//! [`ProgressBarAnimator`] grows skill bars to their `data-width` once half
//! of the bar is visible.
//!
//! Both are driven by [`IntersectionEntry`] events from the host and keep a
//! monotonic set: nothing is ever un-revealed.

use rustc_hash::FxHashSet;

use folio_animation::StaggerConfig;
use folio_core::{
    Document, ElementId, IntersectionEntry, ObserverId, ObserverOptions, RootMargin, Selector,
};

use crate::roles::Roles;
use crate::task::{Task, Timers};

/// Observer used for section/card reveals
pub const REVEAL_OBSERVER: ObserverId = ObserverId(1);
/// Observer used for progress bars
pub const PROGRESS_OBSERVER: ObserverId = ObserverId(2);

/// Class marking a revealed element
pub const ANIMATE_IN_CLASS: &str = "animate-in";

/// Delayed reveal steps
#[derive(Debug, Clone, PartialEq)]
pub enum RevealTask {
    /// Reveal one child of a revealed container
    RevealChild { element: ElementId },
    /// Set a progress bar to its target width
    FillBar { element: ElementId, percent: f32 },
}

pub struct RevealAnimator {
    targets: Selector,
    children: Selector,
    options: ObserverOptions,
    stagger: StaggerConfig,
    revealed: FxHashSet<ElementId>,
}

impl RevealAnimator {
    pub fn new(roles: &Roles, stagger_ms: u64) -> Self {
        Self {
            targets: roles.reveal_targets.clone(),
            children: roles.reveal_children.clone(),
            options: ObserverOptions::new(REVEAL_OBSERVER, 0.1)
                .with_root_margin(RootMargin::bottom(-50.0)),
            stagger: StaggerConfig::new(stagger_ms),
            revealed: FxHashSet::default(),
        }
    }

    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    /// Start observing every reveal target; returns how many were found
    pub fn observe_all<D: Document + ?Sized>(&self, doc: &mut D) -> usize {
        let targets = doc.query_all(&self.targets);
        for el in &targets {
            doc.observe(*el, &self.options);
        }
        tracing::debug!("Observing {} reveal targets", targets.len());
        targets.len()
    }

    /// Handle an intersection change; returns true if `entry.target` was
    /// revealed by it
    pub fn on_intersection<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        timers: &mut Timers,
        entry: &IntersectionEntry,
    ) -> bool {
        if entry.observer != REVEAL_OBSERVER || !entry.is_intersecting {
            return false;
        }
        if !self.revealed.insert(entry.target) {
            return false;
        }
        doc.add_class(entry.target, ANIMATE_IN_CLASS);

        let children = doc.query_within(entry.target, &self.children);
        for (index, delay) in self.stagger.delays(children.len()) {
            timers.schedule(
                delay,
                Task::from(RevealTask::RevealChild {
                    element: children[index],
                }),
            );
        }
        true
    }

    pub fn is_revealed(&self, element: ElementId) -> bool {
        self.revealed.contains(&element)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    /// Run a fired child reveal
    pub fn fire<D: Document + ?Sized>(&mut self, doc: &mut D, element: ElementId) {
        self.revealed.insert(element);
        doc.add_class(element, ANIMATE_IN_CLASS);
    }
}

pub struct ProgressBarAnimator {
    bars: Selector,
    options: ObserverOptions,
    delay_ms: u64,
    filled: FxHashSet<ElementId>,
}

impl ProgressBarAnimator {
    pub fn new(roles: &Roles, delay_ms: u64) -> Self {
        Self {
            bars: roles.progress_bars.clone(),
            options: ObserverOptions::new(PROGRESS_OBSERVER, 0.5),
            delay_ms,
            filled: FxHashSet::default(),
        }
    }

    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    pub fn observe_all<D: Document + ?Sized>(&self, doc: &mut D) -> usize {
        let bars = doc.query_all(&self.bars);
        for el in &bars {
            doc.observe(*el, &self.options);
        }
        bars.len()
    }

    /// Handle an intersection change; returns true if a fill was scheduled
    pub fn on_intersection<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        timers: &mut Timers,
        entry: &IntersectionEntry,
    ) -> bool {
        if entry.observer != PROGRESS_OBSERVER || !entry.is_intersecting {
            return false;
        }
        if self.filled.contains(&entry.target) {
            return false;
        }

        let raw = doc.attribute(entry.target, "data-width");
        let percent = match raw.as_deref().map(str::trim).map(str::parse::<f32>) {
            Some(Ok(percent)) if percent.is_finite() => percent,
            _ => {
                tracing::warn!("Progress bar has no usable data-width: {:?}", raw);
                return false;
            }
        };

        self.filled.insert(entry.target);
        timers.schedule(
            self.delay_ms,
            Task::from(RevealTask::FillBar {
                element: entry.target,
                percent,
            }),
        );
        true
    }

    /// Run a fired fill
    pub fn fire<D: Document + ?Sized>(&mut self, doc: &mut D, element: ElementId, percent: f32) {
        doc.set_style(element, "width", &format!("{percent}%"));
    }
}
