//! [`Document`] over the live DOM

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    NodeList, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use folio_core::{
    Document, ElementId, IntersectionEntry, ObserverId, ObserverOptions, PageEvent, Rect,
    ScrollBehavior, ScrollBlock, ScrollOptions, Selector,
};

use crate::queue::EventQueue;
use crate::registry::Registry;

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct Observer {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

pub struct WebDocument {
    document: web_sys::Document,
    registry: Rc<RefCell<Registry>>,
    queue: Rc<EventQueue>,
    observers: FxHashMap<ObserverId, Observer>,
}

impl WebDocument {
    pub fn new(
        document: web_sys::Document,
        registry: Rc<RefCell<Registry>>,
        queue: Rc<EventQueue>,
    ) -> Self {
        Self {
            document,
            registry,
            queue,
            observers: FxHashMap::default(),
        }
    }

    fn element(&self, id: ElementId) -> Option<Element> {
        self.registry.borrow().get(id)
    }

    fn html(&self, id: ElementId) -> Option<HtmlElement> {
        self.element(id)?.dyn_into::<HtmlElement>().ok()
    }

    fn intern(&self, element: &Element) -> ElementId {
        self.registry.borrow_mut().intern(element)
    }

    fn intern_all(&self, list: Result<NodeList, JsValue>, selector: &Selector) -> Vec<ElementId> {
        let list = match list {
            Ok(list) => list,
            Err(err) => {
                tracing::warn!("querySelectorAll(`{}`) failed: {:?}", selector, err);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.intern(&element))
            .collect()
    }

    fn observer(&mut self, options: &ObserverOptions) -> Option<&IntersectionObserver> {
        if !self.observers.contains_key(&options.observer) {
            let observer = self.create_observer(options)?;
            self.observers.insert(options.observer, observer);
        }
        self.observers.get(&options.observer).map(|o| &o.observer)
    }

    fn create_observer(&self, options: &ObserverOptions) -> Option<Observer> {
        let registry = self.registry.clone();
        let queue = self.queue.clone();
        let options = *options;
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let ratio = entry.intersection_ratio() as f32;
                    let target = registry.borrow_mut().intern(&entry.target());
                    queue.push(PageEvent::Intersection(IntersectionEntry {
                        observer: options.observer,
                        target,
                        ratio,
                        is_intersecting: options.is_met(ratio, entry.is_intersecting()),
                    }));
                }
                queue.wake();
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold as f64));
        init.set_root_margin(&options.root_margin.to_css());

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => Some(Observer {
                observer,
                _callback: callback,
            }),
            Err(err) => {
                tracing::error!("Failed to create intersection observer: {:?}", err);
                None
            }
        }
    }
}

impl Document for WebDocument {
    fn body(&self) -> ElementId {
        match self.document.body() {
            Some(body) => self.intern(&body),
            None => ElementId::default(),
        }
    }

    fn head(&self) -> ElementId {
        match self.document.head() {
            Some(head) => self.intern(&head),
            None => ElementId::default(),
        }
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.document
            .get_element_by_id(id)
            .map(|element| self.intern(&element))
    }

    fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.intern_all(self.document.query_selector_all(selector.as_str()), selector)
    }

    fn query_within(&self, root: ElementId, selector: &Selector) -> Vec<ElementId> {
        match self.element(root) {
            Some(root) => self.intern_all(root.query_selector_all(selector.as_str()), selector),
            None => Vec::new(),
        }
    }

    fn matches(&self, element: ElementId, selector: &Selector) -> bool {
        self.element(element)
            .and_then(|element| element.matches(selector.as_str()).ok())
            .unwrap_or(false)
    }

    fn closest(&self, element: ElementId, selector: &Selector) -> Option<ElementId> {
        let found = self.element(element)?.closest(selector.as_str()).ok()??;
        Some(self.intern(&found))
    }

    fn contains(&self, element: ElementId) -> bool {
        self.element(element)
            .map(|element| element.is_connected())
            .unwrap_or(false)
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        match self.document.create_element(tag) {
            Ok(element) => self.intern(&element),
            Err(err) => {
                tracing::error!("Failed to create <{}>: {:?}", tag, err);
                ElementId::default()
            }
        }
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        let (Some(parent), Some(child)) = (self.element(parent), self.element(child)) else {
            return;
        };
        if let Err(err) = parent.append_child(&child) {
            tracing::warn!("appendChild failed: {:?}", err);
        }
    }

    fn remove(&mut self, element: ElementId) {
        if let Some(node) = self.element(element) {
            node.remove();
            self.registry.borrow_mut().forget(element);
        }
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        let Some(element) = self.element(element) else {
            return;
        };
        let list = element.class_list();
        for name in class.split_whitespace() {
            let _ = list.add_1(name);
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(element) = self.element(element) {
            let _ = element.class_list().remove_1(class);
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.element(element)
            .map(|element| element.class_list().contains(class))
            .unwrap_or(false)
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.element(element)?.get_attribute(name)
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(element) = self.element(element) {
            if let Err(err) = element.set_attribute(name, value) {
                tracing::warn!("setAttribute({}) failed: {:?}", name, err);
            }
        }
    }

    fn style(&self, element: ElementId, property: &str) -> Option<String> {
        let value = self.html(element)?.style().get_property_value(property).ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        let Some(element) = self.html(element) else {
            return;
        };
        let style = element.style();
        let result = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
        if let Err(err) = result {
            tracing::warn!("Failed to set style {}: {:?}", property, err);
        }
    }

    fn text(&self, element: ElementId) -> String {
        self.element(element)
            .and_then(|element| element.text_content())
            .unwrap_or_default()
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(element) = self.element(element) {
            element.set_text_content(Some(text));
        }
    }

    fn bounds(&self, element: ElementId) -> Rect {
        match self.element(element) {
            Some(element) => {
                let rect = element.get_bounding_client_rect();
                Rect::new(
                    rect.x() as f32,
                    rect.y() as f32,
                    rect.width() as f32,
                    rect.height() as f32,
                )
            }
            None => Rect::ZERO,
        }
    }

    fn scroll_into_view(&mut self, element: ElementId, options: ScrollOptions) {
        let Some(element) = self.element(element) else {
            return;
        };
        let web_options = ScrollIntoViewOptions::new();
        web_options.set_behavior(match options.behavior {
            ScrollBehavior::Auto => web_sys::ScrollBehavior::Auto,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        web_options.set_block(match options.block {
            ScrollBlock::Start => ScrollLogicalPosition::Start,
            ScrollBlock::Center => ScrollLogicalPosition::Center,
            ScrollBlock::End => ScrollLogicalPosition::End,
            ScrollBlock::Nearest => ScrollLogicalPosition::Nearest,
        });
        element.scroll_into_view_with_scroll_into_view_options(&web_options);
    }

    fn form_values(&self, form: ElementId) -> Vec<(String, String)> {
        let Some(form) = self
            .element(form)
            .and_then(|form| form.dyn_into::<HtmlFormElement>().ok())
        else {
            return Vec::new();
        };
        let controls = form.elements();
        (0..controls.length())
            .filter_map(|i| controls.item(i))
            .filter_map(|control| control_value(&control))
            .filter(|(name, _)| !name.is_empty())
            .collect()
    }

    fn reset_form(&mut self, form: ElementId) {
        if let Some(form) = self
            .element(form)
            .and_then(|form| form.dyn_into::<HtmlFormElement>().ok())
        {
            form.reset();
        }
    }

    fn observe(&mut self, element: ElementId, options: &ObserverOptions) {
        let Some(target) = self.element(element) else {
            return;
        };
        if let Some(observer) = self.observer(options) {
            observer.observe(&target);
        }
    }

    fn title(&self) -> String {
        self.document.title()
    }
}

fn control_value(control: &Element) -> Option<(String, String)> {
    if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
        return Some((input.name(), input.value()));
    }
    if let Some(area) = control.dyn_ref::<HtmlTextAreaElement>() {
        return Some((area.name(), area.value()));
    }
    control
        .dyn_ref::<HtmlSelectElement>()
        .map(|select| (select.name(), select.value()))
}
