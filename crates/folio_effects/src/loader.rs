//! Bootstrap loader
//!
//! A full-screen loader with a cosmetic progress bar shown while the page
//! starts. Progress creeps up in random steps; once it reaches 100% the loader
//! fades, is removed, and the page's entrance elements animate in one after
//! another.
//!
//! ```text
//! Loading ──(100%)──▶ Settling ──settle_ms──▶ Fading ──fade_ms──▶ Done
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use folio_animation::{AnimationError, ProgressMeter, StaggerConfig, TimerId};
use folio_core::{Document, ElementId, Selector};

use crate::reveal::ANIMATE_IN_CLASS;
use crate::roles::Roles;
use crate::task::{Task, Timers};

/// Class added to the loader when it starts fading
pub const FADE_OUT_CLASS: &str = "fade-out";
/// Class added to the body once the loader is gone
pub const LOADED_CLASS: &str = "loaded";

/// Loader timings in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderTimings {
    /// Progress step interval
    pub tick_ms: u64,
    /// Upper bound (exclusive) of one random progress step
    pub max_increment: f32,
    /// 100% to fade start
    pub settle_ms: u64,
    /// Fade start to removal
    pub fade_ms: u64,
    /// Delay between entrance animations
    pub stagger_ms: u64,
}

impl Default for LoaderTimings {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            max_increment: 15.0,
            settle_ms: 300,
            fade_ms: 500,
            stagger_ms: 100,
        }
    }
}

/// Delayed loader steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderTask {
    /// Advance progress (repeating)
    Tick,
    FadeOut,
    Finish,
    /// Entrance animation of one element
    AnimateIn { element: ElementId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoaderPhase {
    #[default]
    Idle,
    Loading,
    Settling,
    Fading,
    Done,
    /// Loader or fill element missing
    Inert,
}

pub struct BootstrapLoader {
    loader: Selector,
    fill: Selector,
    entrance: Selector,
    timings: LoaderTimings,
    meter: ProgressMeter,
    rng: StdRng,
    phase: LoaderPhase,
    interval: Option<TimerId>,
    elements: Option<(ElementId, ElementId)>,
}

impl BootstrapLoader {
    /// Create a loader with an entropy-seeded random source
    pub fn new(roles: &Roles, timings: LoaderTimings) -> Result<Self, AnimationError> {
        Self::with_rng(roles, timings, StdRng::from_entropy())
    }

    /// Create a loader with a deterministic random source
    pub fn with_seed(
        roles: &Roles,
        timings: LoaderTimings,
        seed: u64,
    ) -> Result<Self, AnimationError> {
        Self::with_rng(roles, timings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        roles: &Roles,
        timings: LoaderTimings,
        rng: StdRng,
    ) -> Result<Self, AnimationError> {
        Ok(Self {
            loader: roles.loader.clone(),
            fill: roles.loader_fill.clone(),
            entrance: roles.entrance.clone(),
            meter: ProgressMeter::new(timings.max_increment)?,
            timings,
            rng,
            phase: LoaderPhase::Idle,
            interval: None,
            elements: None,
        })
    }

    pub fn phase(&self) -> LoaderPhase {
        self.phase
    }

    pub fn progress(&self) -> f32 {
        self.meter.value()
    }

    /// Build the loader if the page has none, then start the progress ticks
    ///
    /// Returns false (and stays inert) when the loader or its fill cannot be
    /// found.
    pub fn start<D: Document + ?Sized>(&mut self, doc: &mut D, timers: &mut Timers) -> bool {
        if self.phase != LoaderPhase::Idle {
            return false;
        }
        if doc.query(&self.loader).is_none() {
            build_loader(doc);
        }

        let (Some(loader), Some(fill)) = (doc.query(&self.loader), doc.query(&self.fill)) else {
            tracing::warn!("Page loader or progress fill missing, loader disabled");
            self.phase = LoaderPhase::Inert;
            return false;
        };

        self.elements = Some((loader, fill));
        let tick = Task::from(LoaderTask::Tick);
        self.interval = Some(timers.schedule_repeating(self.timings.tick_ms, tick));
        self.phase = LoaderPhase::Loading;
        true
    }

    /// Run a fired loader step
    pub fn fire<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        timers: &mut Timers,
        task: LoaderTask,
    ) {
        let Some((loader, fill)) = self.elements else {
            return;
        };

        match task {
            LoaderTask::Tick if self.phase == LoaderPhase::Loading => {
                let value = self.meter.step(&mut self.rng);
                if self.meter.is_complete() {
                    if let Some(interval) = self.interval.take() {
                        timers.cancel(interval);
                    }
                    timers.schedule(self.timings.settle_ms, Task::from(LoaderTask::FadeOut));
                    self.phase = LoaderPhase::Settling;
                    tracing::debug!("Loader complete");
                }
                doc.set_style(fill, "width", &format!("{value}%"));
            }
            LoaderTask::FadeOut if self.phase == LoaderPhase::Settling => {
                doc.add_class(loader, FADE_OUT_CLASS);
                timers.schedule(self.timings.fade_ms, Task::from(LoaderTask::Finish));
                self.phase = LoaderPhase::Fading;
            }
            LoaderTask::Finish if self.phase == LoaderPhase::Fading => {
                doc.remove(loader);
                let body = doc.body();
                doc.add_class(body, LOADED_CLASS);
                self.phase = LoaderPhase::Done;

                let elements = doc.query_all(&self.entrance);
                let stagger = StaggerConfig::new(self.timings.stagger_ms);
                for (index, delay) in stagger.delays(elements.len()) {
                    timers.schedule(
                        delay,
                        Task::from(LoaderTask::AnimateIn {
                            element: elements[index],
                        }),
                    );
                }
            }
            LoaderTask::AnimateIn { element } => {
                doc.add_class(element, ANIMATE_IN_CLASS);
            }
            other => tracing::trace!("Ignoring loader step {:?} in {:?}", other, self.phase),
        }
    }
}

/// `div.page-loader > (div.logo-animation, div.progress-bar-container > #progress-fill)`
fn build_loader<D: Document + ?Sized>(doc: &mut D) -> ElementId {
    let loader = doc.create_element("div");
    doc.add_class(loader, "page-loader");

    let logo = doc.create_element("div");
    doc.add_class(logo, "logo-animation");
    doc.set_text(logo, "Portfolio");

    let container = doc.create_element("div");
    doc.add_class(container, "progress-bar-container");
    let fill = doc.create_element("div");
    doc.add_class(fill, "progress-bar-fill");
    doc.set_attribute(fill, "id", "progress-fill");
    doc.append_child(container, fill);

    doc.append_child(loader, logo);
    doc.append_child(loader, container);
    let body = doc.body();
    doc.append_child(body, loader);
    loader
}
