//! In-memory host
//!
//! [`MemoryDocument`] is a small element tree implementing [`Document`], with
//! page-absolute layout rectangles and a vertical scroll offset so that
//! intersection changes can be simulated. [`MemoryNavigator`] records the
//! session history and full navigations instead of performing them.
//!
//! # Example
//!
//! ```
//! use folio_core::memory::{MemoryDocument, NodeSpec};
//! use folio_core::{Document, Selector};
//!
//! let mut doc = MemoryDocument::new();
//! let body = doc.body();
//! doc.append(
//!     body,
//!     NodeSpec::new("nav").id("navbar").child(
//!         NodeSpec::new("a").class("nav-link").attr("href", "#about").text("About"),
//!     ),
//! );
//!
//! let links = doc.query_all(&Selector::class("nav-link"));
//! assert_eq!(doc.text(links[0]), "About");
//! ```

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::dom::{Document, ElementId, Rect, ScrollOptions};
use crate::intersection::{IntersectionEntry, IntersectionTracker, ObserverOptions};
use crate::platform::{resolve_path, HistoryState, Navigator};
use crate::selector::{Selector, SelectorTarget};

/// Default viewport size for headless pages
pub const DEFAULT_VIEWPORT: (f32, f32) = (1280.0, 800.0);

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    classes: SmallVec<[String; 4]>,
    attributes: FxHashMap<String, String>,
    styles: FxHashMap<String, String>,
    text: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    /// Page-absolute layout box
    layout: Rect,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: SmallVec::new(),
            attributes: FxHashMap::default(),
            styles: FxHashMap::default(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
            layout: Rect::ZERO,
        }
    }

    fn is_form_control(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea" | "select")
            && self.attributes.contains_key("name")
    }
}

impl SelectorTarget for Node {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn element_id(&self) -> Option<&str> {
        self.attributes.get("id").map(String::as_str)
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn has_attribute(&self, name: &str) -> bool {
        if name == "class" {
            return !self.classes.is_empty();
        }
        self.attributes.contains_key(name)
    }
}

/// Declarative description of an element subtree, appended with
/// [`MemoryDocument::append`]
#[derive(Debug, Clone, Default)]
pub struct NodeSpec {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    styles: Vec<(String, String)>,
    text: Option<String>,
    layout: Option<Rect>,
    children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Add one class, or several separated by whitespace
    pub fn class(mut self, class: &str) -> Self {
        self.classes
            .extend(class.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn style(mut self, property: &str, value: &str) -> Self {
        self.styles.push((property.to_string(), value.to_string()));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Page-absolute layout box
    pub fn layout(mut self, rect: Rect) -> Self {
        self.layout = Some(rect);
        self
    }

    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.children.extend(children);
        self
    }
}

/// In-memory [`Document`]
pub struct MemoryDocument {
    nodes: SlotMap<ElementId, Node>,
    root: ElementId,
    head: ElementId,
    body: ElementId,
    title: String,
    viewport: (f32, f32),
    scroll_y: f32,
    intersections: IntersectionTracker,
    scroll_requests: Vec<(ElementId, ScrollOptions)>,
}

impl std::fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryDocument")
            .field("nodes", &self.nodes.len())
            .field("title", &self.title)
            .field("viewport", &self.viewport)
            .field("scroll_y", &self.scroll_y)
            .field("observations", &self.intersections.len())
            .finish()
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create an empty `<html><head/><body/></html>` page
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new("html"));
        let head = nodes.insert(Node::new("head"));
        let body = nodes.insert(Node::new("body"));
        for child in [head, body] {
            nodes[child].parent = Some(root);
            nodes[root].children.push(child);
        }

        Self {
            nodes,
            root,
            head,
            body,
            title: String::new(),
            viewport: DEFAULT_VIEWPORT,
            scroll_y: 0.0,
            intersections: IntersectionTracker::new(),
            scroll_requests: Vec::new(),
        }
    }

    /// Set the viewport size
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = (width, height);
        self
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    /// Build a subtree from `spec` and append it to `parent`
    pub fn append(&mut self, parent: ElementId, spec: NodeSpec) -> ElementId {
        let id = self.build(spec);
        self.append_child(parent, id);
        id
    }

    fn build(&mut self, spec: NodeSpec) -> ElementId {
        let mut node = Node::new(&spec.tag);
        node.classes.extend(spec.classes);
        node.attributes.extend(spec.attributes);
        node.styles.extend(spec.styles);
        node.text = spec.text.unwrap_or_default();
        node.layout = spec.layout.unwrap_or(Rect::ZERO);
        let id = self.nodes.insert(node);

        for child in spec.children {
            let child_id = self.build(child);
            self.append_child(id, child_id);
        }
        id
    }

    /// Set an element's page-absolute layout box
    pub fn set_layout(&mut self, element: ElementId, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.layout = rect;
        }
    }

    /// Current vertical scroll offset
    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Scroll the viewport and return the intersection changes it caused
    pub fn scroll_to(&mut self, y: f32) -> Vec<IntersectionEntry> {
        self.scroll_y = y.max(0.0);
        self.flush_intersections()
    }

    /// Deliver pending intersection entries without scrolling
    ///
    /// Newly observed targets get their initial entry here.
    pub fn flush_intersections(&mut self) -> Vec<IntersectionEntry> {
        let viewport = Rect::new(0.0, 0.0, self.viewport.0, self.viewport.1);
        let mut tracker = std::mem::take(&mut self.intersections);
        let entries = tracker.update(viewport, |el| {
            if self.is_attached(el) {
                Some(self.viewport_rect(el))
            } else {
                None
            }
        });
        self.intersections = tracker;
        entries
    }

    /// Elements passed to `scroll_into_view`, oldest first
    pub fn scroll_requests(&self) -> &[(ElementId, ScrollOptions)] {
        &self.scroll_requests
    }

    /// Class list of an element
    pub fn classes(&self, element: ElementId) -> Vec<String> {
        self.nodes
            .get(element)
            .map(|n| n.classes.to_vec())
            .unwrap_or_default()
    }

    /// Number of attached elements matching `selector`
    pub fn count(&self, selector: &Selector) -> usize {
        self.query_all(selector).len()
    }

    /// Parent of an element, if any
    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.nodes.get(element)?.parent
    }

    /// Direct children of an element
    pub fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.nodes
            .get(element)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Tag name of an element
    pub fn tag(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(element).map(|n| n.tag.as_str())
    }

    fn viewport_rect(&self, element: ElementId) -> Rect {
        self.nodes
            .get(element)
            .map(|n| n.layout.offset(0.0, -self.scroll_y))
            .unwrap_or(Rect::ZERO)
    }

    fn is_attached(&self, element: ElementId) -> bool {
        let mut current = element;
        loop {
            if current == self.root {
                return true;
            }
            match self.nodes.get(current).and_then(|n| n.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Preorder traversal of the subtree under `root` (excluding it)
    fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = match self.nodes.get(root) {
            Some(node) => node.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.nodes.get(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    fn detach(&mut self, element: ElementId) {
        let parent = self.nodes.get(element).and_then(|n| n.parent);
        if let Some(parent) = parent {
            if let Some(node) = self.nodes.get_mut(parent) {
                node.children.retain(|c| *c != element);
            }
        }
        if let Some(node) = self.nodes.get_mut(element) {
            node.parent = None;
        }
    }

    fn collect_text(&self, element: ElementId, out: &mut String) {
        if let Some(node) = self.nodes.get(element) {
            out.push_str(&node.text);
            for child in &node.children {
                self.collect_text(*child, out);
            }
        }
    }
}

impl Document for MemoryDocument {
    fn body(&self) -> ElementId {
        self.body
    }

    fn head(&self) -> ElementId {
        self.head
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.descendants(self.root).into_iter().find(|el| {
            self.nodes
                .get(*el)
                .is_some_and(|n| n.element_id() == Some(id))
        })
    }

    fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.query_within(self.root, selector)
    }

    fn query_within(&self, root: ElementId, selector: &Selector) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|el| self.nodes.get(*el).is_some_and(|n| selector.matches(n)))
            .collect()
    }

    fn matches(&self, element: ElementId, selector: &Selector) -> bool {
        self.nodes.get(element).is_some_and(|n| selector.matches(n))
    }

    fn closest(&self, element: ElementId, selector: &Selector) -> Option<ElementId> {
        let mut current = Some(element);
        while let Some(id) = current {
            let node = self.nodes.get(id)?;
            if selector.matches(node) {
                return Some(id);
            }
            current = node.parent;
        }
        None
    }

    fn contains(&self, element: ElementId) -> bool {
        self.nodes.contains_key(element) && self.is_attached(element)
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.insert(Node::new(tag))
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if parent == child || !self.nodes.contains_key(parent) || !self.nodes.contains_key(child)
        {
            return;
        }
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    fn remove(&mut self, element: ElementId) {
        if element == self.root || element == self.head || element == self.body {
            tracing::warn!("Refusing to remove a document root element");
            return;
        }
        if !self.nodes.contains_key(element) {
            return;
        }
        self.detach(element);
        let mut doomed = self.descendants(element);
        doomed.push(element);
        for id in doomed {
            self.nodes.remove(id);
            self.intersections.unobserve(id);
        }
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            for class in class.split_whitespace() {
                if !node.classes.iter().any(|c| c == class) {
                    node.classes.push(class.to_string());
                }
            }
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.classes.retain(|c| c != class);
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.nodes
            .get(element)
            .is_some_and(|n| SelectorTarget::has_class(n, class))
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        let node = self.nodes.get(element)?;
        if name == "class" {
            return Some(node.classes.join(" "));
        }
        node.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            if name == "class" {
                node.classes = value.split_whitespace().map(str::to_string).collect();
            } else {
                node.attributes.insert(name.to_string(), value.to_string());
            }
        }
    }

    fn style(&self, element: ElementId, property: &str) -> Option<String> {
        self.nodes.get(element)?.styles.get(property).cloned()
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            if value.is_empty() {
                node.styles.remove(property);
            } else {
                node.styles.insert(property.to_string(), value.to_string());
            }
        }
    }

    fn text(&self, element: ElementId) -> String {
        let mut out = String::new();
        self.collect_text(element, &mut out);
        out
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        let children = self.children(element);
        for child in children {
            self.remove(child);
        }
        if let Some(node) = self.nodes.get_mut(element) {
            node.text = text.to_string();
        }
    }

    fn bounds(&self, element: ElementId) -> Rect {
        self.viewport_rect(element)
    }

    fn scroll_into_view(&mut self, element: ElementId, options: ScrollOptions) {
        if !self.contains(element) {
            return;
        }
        self.scroll_requests.push((element, options));
        let top = self.nodes[element].layout.y;
        self.scroll_y = top.max(0.0);
    }

    fn form_values(&self, form: ElementId) -> Vec<(String, String)> {
        self.descendants(form)
            .into_iter()
            .filter_map(|el| {
                let node = self.nodes.get(el)?;
                if !node.is_form_control() {
                    return None;
                }
                let name = node.attributes.get("name")?.clone();
                let value = node.attributes.get("value").cloned().unwrap_or_default();
                Some((name, value))
            })
            .collect()
    }

    fn reset_form(&mut self, form: ElementId) {
        for el in self.descendants(form) {
            if let Some(node) = self.nodes.get_mut(el) {
                if node.is_form_control() {
                    node.attributes.remove("value");
                }
            }
        }
    }

    fn observe(&mut self, element: ElementId, options: &ObserverOptions) {
        if self.nodes.contains_key(element) {
            self.intersections.observe(element, options);
        }
    }

    fn title(&self) -> String {
        self.title.clone()
    }
}

// =============================================================================
// Navigator
// =============================================================================

/// In-memory session history
#[derive(Debug, Clone)]
pub struct MemoryNavigator {
    pathname: String,
    entries: Vec<Option<HistoryState>>,
    index: usize,
    assigned: Vec<String>,
}

impl MemoryNavigator {
    /// Start on `pathname` with a single stateless history entry
    pub fn new(pathname: &str) -> Self {
        Self {
            pathname: pathname.to_string(),
            entries: vec![None],
            index: 0,
            assigned: Vec::new(),
        }
    }

    /// Simulate the back button; returns the state the popstate carries
    pub fn back(&mut self) -> Option<Option<HistoryState>> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.enter_current())
    }

    /// Simulate the forward button
    pub fn forward(&mut self) -> Option<Option<HistoryState>> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.enter_current())
    }

    fn enter_current(&mut self) -> Option<HistoryState> {
        let state = self.entries[self.index].clone();
        if let Some(state) = &state {
            self.pathname = resolve_path(&self.pathname, &state.url);
        }
        state
    }

    /// Number of history entries
    pub fn history_len(&self) -> usize {
        self.entries.len()
    }

    /// State of the current entry
    pub fn current_state(&self) -> Option<&HistoryState> {
        self.entries[self.index].as_ref()
    }

    /// URLs passed to [`Navigator::assign`], oldest first
    pub fn assigned(&self) -> &[String] {
        &self.assigned
    }
}

impl Navigator for MemoryNavigator {
    fn pathname(&self) -> String {
        self.pathname.clone()
    }

    fn push_state(&mut self, state: &HistoryState) {
        self.entries.truncate(self.index + 1);
        self.entries.push(Some(state.clone()));
        self.index += 1;
        self.pathname = resolve_path(&self.pathname, &state.url);
    }

    fn replace_state(&mut self, state: &HistoryState) {
        self.entries[self.index] = Some(state.clone());
        self.pathname = resolve_path(&self.pathname, &state.url);
    }

    fn assign(&mut self, url: &str) {
        self.assigned.push(url.to_string());
        self.pathname = resolve_path(&self.pathname, url);
    }
}
