//! In-page anchor scrolling

use folio_core::{Document, ElementId, EventOutcome, ScrollOptions, Selector};

use crate::roles::Roles;

pub struct SmoothScroll {
    link: Selector,
}

impl SmoothScroll {
    pub fn new(roles: &Roles) -> Self {
        Self {
            link: roles.link.clone(),
        }
    }

    /// Handle a click; `#fragment` links scroll smoothly instead of jumping
    pub fn on_click<D: Document + ?Sized>(&self, doc: &mut D, target: ElementId) -> EventOutcome {
        let Some(link) = doc.closest(target, &self.link) else {
            return EventOutcome::IGNORED;
        };
        let Some(href) = doc.attribute(link, "href") else {
            return EventOutcome::IGNORED;
        };
        let Some(fragment) = href.strip_prefix('#') else {
            return EventOutcome::IGNORED;
        };

        if fragment.is_empty() {
            return EventOutcome::PREVENTED;
        }
        match doc.element_by_id(fragment) {
            Some(section) => doc.scroll_into_view(section, ScrollOptions::smooth_start()),
            None => tracing::debug!("No element for anchor {}", href),
        }
        EventOutcome::PREVENTED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::default_roles;
    use folio_core::{MemoryDocument, NodeSpec, Rect};

    fn page() -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        doc.append(
            body,
            NodeSpec::new("nav").children([
                NodeSpec::new("a").id("to-about").attr("href", "#about").text("About"),
                NodeSpec::new("a").id("to-nowhere").attr("href", "#nowhere"),
                NodeSpec::new("a").id("bare").attr("href", "#"),
                NodeSpec::new("a").id("page").attr("href", "/projects.html"),
            ]),
        );
        doc.append(
            body,
            NodeSpec::new("section")
                .id("about")
                .layout(Rect::new(0.0, 1400.0, 1280.0, 600.0)),
        );
        doc
    }

    #[test]
    fn test_fragment_link_scrolls() {
        let mut doc = page();
        let scroll = SmoothScroll::new(&default_roles());
        let link = doc.element_by_id("to-about").unwrap();
        let about = doc.element_by_id("about").unwrap();

        assert_eq!(scroll.on_click(&mut doc, link), EventOutcome::PREVENTED);
        assert_eq!(doc.scroll_requests(), &[(about, ScrollOptions::smooth_start())]);
        assert_eq!(doc.scroll_y(), 1400.0);
    }

    #[test]
    fn test_unknown_or_empty_fragment() {
        let mut doc = page();
        let scroll = SmoothScroll::new(&default_roles());
        for id in ["to-nowhere", "bare"] {
            let link = doc.element_by_id(id).unwrap();
            assert!(scroll.on_click(&mut doc, link).prevent_default);
        }
        assert!(doc.scroll_requests().is_empty());
    }

    #[test]
    fn test_page_links_are_left_alone() {
        let mut doc = page();
        let scroll = SmoothScroll::new(&default_roles());
        let link = doc.element_by_id("page").unwrap();
        assert_eq!(scroll.on_click(&mut doc, link), EventOutcome::IGNORED);
    }
}
