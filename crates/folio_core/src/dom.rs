//! Document abstraction
//!
//! Every effect talks to the page through the [`Document`] trait instead of a
//! global DOM. Elements are addressed by [`ElementId`] handles that the host
//! hands out; a handle to an element that has since been removed is simply
//! ignored by mutating calls and reported absent by [`Document::contains`].
//! Freshly created elements are detached until appended, but can be
//! configured before that.
//!
//! Two hosts exist: the browser host in `folio_web` and
//! [`MemoryDocument`](crate::memory::MemoryDocument), an in-memory tree used
//! by tests and headless simulation.

use slotmap::new_key_type;

use crate::intersection::ObserverOptions;
use crate::selector::Selector;

new_key_type! {
    /// Handle to an element owned by a [`Document`]
    pub struct ElementId;
}

impl ElementId {
    /// Convert to raw u64 for storage outside the host (e.g. a DOM attribute)
    pub fn to_raw(self) -> u64 {
        slotmap::Key::data(&self).as_ffi()
    }

    /// Reconstruct from a raw u64 produced by [`ElementId::to_raw`]
    pub fn from_raw(raw: u64) -> Self {
        ElementId::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// Axis-aligned rectangle in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Intersection with another rectangle, or `None` if they are disjoint
    ///
    /// Rectangles that only share an edge intersect with zero area.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < left || bottom < top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Translate by an offset
    pub fn offset(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Options for scroll-into-view behavior
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOptions {
    /// How to animate the scroll
    pub behavior: ScrollBehavior,
    /// Vertical alignment within the viewport
    pub block: ScrollBlock,
}

impl ScrollOptions {
    /// Smooth scroll aligning the element to the top of the viewport
    pub fn smooth_start() -> Self {
        Self {
            behavior: ScrollBehavior::Smooth,
            block: ScrollBlock::Start,
        }
    }
}

/// Scroll animation behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Instant scroll (no animation)
    #[default]
    Auto,
    /// Smooth animated scroll
    Smooth,
}

/// Vertical scroll alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBlock {
    /// Align to top of viewport
    Start,
    /// Align to center of viewport
    Center,
    /// Align to bottom of viewport
    End,
    /// Scroll minimum distance to make visible
    #[default]
    Nearest,
}

impl ScrollBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrollBehavior::Auto => "auto",
            ScrollBehavior::Smooth => "smooth",
        }
    }
}

impl ScrollBlock {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrollBlock::Start => "start",
            ScrollBlock::Center => "center",
            ScrollBlock::End => "end",
            ScrollBlock::Nearest => "nearest",
        }
    }
}

/// The page as seen by effects
///
/// Query methods return attached elements in document order. Mutations on
/// a removed element are no-ops.
pub trait Document {
    /// The `<body>` element
    fn body(&self) -> ElementId;

    /// The `<head>` element
    fn head(&self) -> ElementId;

    /// Look up an element by its `id` attribute
    fn element_by_id(&self, id: &str) -> Option<ElementId>;

    /// All attached elements matching `selector`
    fn query_all(&self, selector: &Selector) -> Vec<ElementId>;

    /// First attached element matching `selector`
    fn query(&self, selector: &Selector) -> Option<ElementId> {
        self.query_all(selector).into_iter().next()
    }

    /// Descendants of `root` (excluding `root`) matching `selector`
    fn query_within(&self, root: ElementId, selector: &Selector) -> Vec<ElementId>;

    /// Whether `element` itself matches `selector`
    fn matches(&self, element: ElementId, selector: &Selector) -> bool;

    /// Nearest inclusive ancestor of `element` matching `selector`
    fn closest(&self, element: ElementId, selector: &Selector) -> Option<ElementId>;

    /// Whether `element` is still attached to the document
    fn contains(&self, element: ElementId) -> bool;

    /// Create a detached element
    fn create_element(&mut self, tag: &str) -> ElementId;

    /// Append `child` as the last child of `parent`
    fn append_child(&mut self, parent: ElementId, child: ElementId);

    /// Detach `element` (and its subtree) from the document
    fn remove(&mut self, element: ElementId);

    fn add_class(&mut self, element: ElementId, class: &str);

    fn remove_class(&mut self, element: ElementId, class: &str);

    fn has_class(&self, element: ElementId, class: &str) -> bool;

    /// Toggle `class`, returning whether it is present afterwards
    fn toggle_class(&mut self, element: ElementId, class: &str) -> bool {
        if self.has_class(element, class) {
            self.remove_class(element, class);
            false
        } else {
            self.add_class(element, class);
            true
        }
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    /// Inline style property value, `None` when unset
    fn style(&self, element: ElementId, property: &str) -> Option<String>;

    /// Set an inline style property; an empty value clears it
    fn set_style(&mut self, element: ElementId, property: &str, value: &str);

    fn text(&self, element: ElementId) -> String;

    /// Replace the element's content with a single text node
    fn set_text(&mut self, element: ElementId, text: &str);

    /// Bounding box relative to the viewport
    fn bounds(&self, element: ElementId) -> Rect;

    fn scroll_into_view(&mut self, element: ElementId, options: ScrollOptions);

    /// Name/value pairs of the named controls inside a form
    fn form_values(&self, form: ElementId) -> Vec<(String, String)>;

    /// Reset every control inside a form to empty
    fn reset_form(&mut self, form: ElementId);

    /// Start watching `element` for viewport intersection changes
    ///
    /// Changes are delivered by the host as
    /// [`PageEvent::Intersection`](crate::events::PageEvent::Intersection).
    fn observe(&mut self, element: ElementId, options: &ObserverOptions);

    /// The document title
    fn title(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 80.0, 100.0, 100.0);
        let i = a.intersection(&b).unwrap();
        assert_eq!(i, Rect::new(50.0, 80.0, 50.0, 20.0));
        assert_eq!(i.area(), 1000.0);

        let far = Rect::new(0.0, 200.0, 10.0, 10.0);
        assert!(a.intersection(&far).is_none());

        let touching = Rect::new(0.0, 100.0, 10.0, 10.0);
        assert_eq!(a.intersection(&touching).unwrap().area(), 0.0);
    }

    #[test]
    fn test_element_id_raw_round_trip() {
        let mut map = slotmap::SlotMap::<ElementId, ()>::with_key();
        let id = map.insert(());
        assert_eq!(ElementId::from_raw(id.to_raw()), id);
    }
}
