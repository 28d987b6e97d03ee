//! Element handle registry
//!
//! The DOM owns its nodes; effects only see [`ElementId`]s. Every element
//! handed to Rust is interned here once and stamped with its key in a
//! `data-folio-key` attribute so later lookups of the same node resolve to
//! the same handle.

use slotmap::SlotMap;
use web_sys::Element;

use folio_core::ElementId;

pub(crate) const KEY_ATTRIBUTE: &str = "data-folio-key";

#[derive(Default)]
pub struct Registry {
    elements: SlotMap<ElementId, Element>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `element`, allocating one on first sight
    pub fn intern(&mut self, element: &Element) -> ElementId {
        if let Some(id) = element.get_attribute(KEY_ATTRIBUTE).and_then(|raw| parse_key(&raw)) {
            // Cloned nodes carry the attribute too; only trust an exact match
            if self.elements.get(id) == Some(element) {
                return id;
            }
        }

        let id = self.elements.insert(element.clone());
        if let Err(err) = element.set_attribute(KEY_ATTRIBUTE, &id.to_raw().to_string()) {
            tracing::warn!("Failed to stamp element key: {:?}", err);
        }
        id
    }

    pub fn get(&self, id: ElementId) -> Option<Element> {
        self.elements.get(id).cloned()
    }

    /// Drop the handle; later calls with it are no-ops
    pub fn forget(&mut self, id: ElementId) {
        if let Some(element) = self.elements.remove(id) {
            let _ = element.remove_attribute(KEY_ATTRIBUTE);
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

fn parse_key(raw: &str) -> Option<ElementId> {
    raw.trim().parse::<u64>().ok().map(ElementId::from_raw)
}
