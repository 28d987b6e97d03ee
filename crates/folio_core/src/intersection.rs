//! Viewport intersection tracking
//!
//! Mirrors the semantics of the browser's `IntersectionObserver` closely
//! enough for reveal effects:
//!
//! - The root is the viewport, grown or shrunk by a [`RootMargin`]
//! - `ratio = area(target ∩ root) / area(target)`
//! - A target "meets" the observer when `ratio >= threshold` (any overlap
//!   for a zero threshold)
//! - An entry is delivered when a target is first observed, then only when
//!   its met/unmet state flips, so each crossing is reported once per
//!   direction
//!
//! The browser host uses real observers; [`IntersectionTracker`] computes the
//! same entries from element bounds for the in-memory host.

use rustc_hash::FxHashMap;

use crate::dom::{ElementId, Rect};

/// Identifies one observer (one threshold/margin configuration)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub u32);

/// Margin applied to the root, CSS `rootMargin` order. Negative shrinks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RootMargin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl RootMargin {
    pub const ZERO: RootMargin = RootMargin {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// Margin on the bottom edge only
    pub const fn bottom(px: f32) -> Self {
        Self {
            top: 0.0,
            right: 0.0,
            bottom: px,
            left: 0.0,
        }
    }

    /// Apply the margin to a root rectangle
    pub fn apply(&self, root: Rect) -> Rect {
        Rect::new(
            root.x - self.left,
            root.y - self.top,
            (root.width + self.left + self.right).max(0.0),
            (root.height + self.top + self.bottom).max(0.0),
        )
    }

    /// CSS text, e.g. `0px 0px -50px 0px`
    pub fn to_css(&self) -> String {
        format!(
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

/// Observer configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub observer: ObserverId,
    /// Fraction of the target that must be visible, 0.0..=1.0
    pub threshold: f32,
    pub root_margin: RootMargin,
}

impl ObserverOptions {
    pub fn new(observer: ObserverId, threshold: f32) -> Self {
        Self {
            observer,
            threshold: threshold.clamp(0.0, 1.0),
            root_margin: RootMargin::ZERO,
        }
    }

    pub fn with_root_margin(mut self, margin: RootMargin) -> Self {
        self.root_margin = margin;
        self
    }

    /// Whether a ratio/overlap combination meets this observer's threshold
    pub fn is_met(&self, ratio: f32, overlaps: bool) -> bool {
        if self.threshold <= 0.0 {
            overlaps
        } else {
            ratio >= self.threshold
        }
    }
}

/// One intersection change for one target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub observer: ObserverId,
    pub target: ElementId,
    pub ratio: f32,
    /// True when the observer's threshold is met
    pub is_intersecting: bool,
}

/// Compute the visible ratio of `target` within `root`
pub fn intersection_ratio(target: Rect, root: Rect) -> (f32, bool) {
    match target.intersection(&root) {
        None => (0.0, false),
        Some(overlap) => {
            let area = target.area();
            if area <= 0.0 {
                // Zero-area targets count as fully visible once they touch
                (1.0, true)
            } else {
                ((overlap.area() / area).clamp(0.0, 1.0), true)
            }
        }
    }
}

struct Observation {
    options: ObserverOptions,
    /// Last reported state; `None` until the initial entry is delivered
    met: Option<bool>,
}

/// Software intersection observer over element bounds
#[derive(Default)]
pub struct IntersectionTracker {
    observations: FxHashMap<(ObserverId, ElementId), Observation>,
    order: Vec<(ObserverId, ElementId)>,
}

impl IntersectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing; observing the same target twice is a no-op
    pub fn observe(&mut self, target: ElementId, options: &ObserverOptions) {
        let key = (options.observer, target);
        if self.observations.contains_key(&key) {
            return;
        }
        self.observations.insert(
            key,
            Observation {
                options: *options,
                met: None,
            },
        );
        self.order.push(key);
    }

    /// Stop observing a target for every observer
    pub fn unobserve(&mut self, target: ElementId) {
        self.observations.retain(|(_, el), _| *el != target);
        self.order.retain(|(_, el)| *el != target);
    }

    /// Number of (observer, target) pairs being tracked
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Recompute every observation against `viewport`
    ///
    /// `bounds` resolves a target's viewport-relative rectangle, returning
    /// `None` for targets that are no longer attached (those are dropped).
    pub fn update<F>(&mut self, viewport: Rect, mut bounds: F) -> Vec<IntersectionEntry>
    where
        F: FnMut(ElementId) -> Option<Rect>,
    {
        let mut entries = Vec::new();
        let mut detached = Vec::new();

        for key in &self.order {
            let Some(observation) = self.observations.get_mut(key) else {
                continue;
            };
            let Some(rect) = bounds(key.1) else {
                detached.push(*key);
                continue;
            };

            let root = observation.options.root_margin.apply(viewport);
            let (ratio, overlaps) = intersection_ratio(rect, root);
            let met = observation.options.is_met(ratio, overlaps);

            if observation.met != Some(met) {
                observation.met = Some(met);
                entries.push(IntersectionEntry {
                    observer: key.0,
                    target: key.1,
                    ratio,
                    is_intersecting: met,
                });
            }
        }

        for key in detached {
            self.observations.remove(&key);
            self.order.retain(|k| *k != key);
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<ElementId> {
        let mut map = SlotMap::<ElementId, ()>::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_root_margin_shrinks_bottom() {
        let root = RootMargin::bottom(-50.0).apply(Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(root, Rect::new(0.0, 0.0, 800.0, 550.0));
        assert_eq!(RootMargin::bottom(-50.0).to_css(), "0px 0px -50px 0px");
    }

    #[test]
    fn test_ratio() {
        let root = Rect::new(0.0, 0.0, 100.0, 100.0);
        let (ratio, overlaps) = intersection_ratio(Rect::new(0.0, 90.0, 100.0, 100.0), root);
        assert!(overlaps);
        assert!((ratio - 0.1).abs() < 1e-6);
        assert_eq!(intersection_ratio(Rect::new(0.0, 200.0, 10.0, 10.0), root), (0.0, false));
    }

    #[test]
    fn test_reports_each_crossing_once() {
        let el = ids(1)[0];
        let options = ObserverOptions::new(ObserverId(1), 0.1);
        let mut tracker = IntersectionTracker::new();
        tracker.observe(el, &options);
        tracker.observe(el, &options);
        assert_eq!(tracker.len(), 1);

        let element = Rect::new(0.0, 1000.0, 100.0, 100.0);
        let viewport = |y: f32| Rect::new(0.0, y, 800.0, 600.0);
        let relative = |y: f32| Some(element.offset(0.0, -y));

        // Initial entry, not intersecting
        let entries = tracker.update(viewport(0.0), |_| relative(0.0));
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_intersecting);

        // Still out of view: nothing new
        assert!(tracker.update(viewport(0.0), |_| relative(100.0)).is_empty());

        // Scrolled into view
        let entries = tracker.update(Rect::new(0.0, 0.0, 800.0, 600.0), |_| relative(600.0));
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_intersecting);

        // Stays in view: nothing new
        assert!(tracker
            .update(Rect::new(0.0, 0.0, 800.0, 600.0), |_| relative(650.0))
            .is_empty());
    }

    #[test]
    fn test_detached_targets_are_dropped() {
        let el = ids(1)[0];
        let mut tracker = IntersectionTracker::new();
        tracker.observe(el, &ObserverOptions::new(ObserverId(1), 0.5));
        assert!(tracker.update(Rect::ZERO, |_| None).is_empty());
        assert!(tracker.is_empty());
    }
}
