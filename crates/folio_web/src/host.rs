//! Browser event pump
//!
//! The host owns the runtime behind a `RefCell`. DOM listeners translate
//! browser events into [`PageEvent`]s and deliver them; one `setTimeout` is
//! kept armed for the runtime's next timer deadline. Events that arrive
//! while the runtime is borrowed are parked on the [`EventQueue`] and drained
//! before the borrow is released.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, ErrorEvent, Event, KeyboardEvent, MouseEvent, PopStateEvent, Window};

use folio_animation::Millis;
use folio_app::{PortfolioApp, SiteConfig};
use folio_core::{EventOutcome, Key, PageEvent};

use crate::document::WebDocument;
use crate::navigator::{state_from_js, BrowserNavigator, LocalStorage};
use crate::queue::EventQueue;
use crate::registry::Registry;

pub type WebApp = PortfolioApp<WebDocument, BrowserNavigator, LocalStorage>;

struct TimerSlot {
    handle: Option<i32>,
    callback: Option<Closure<dyn FnMut()>>,
}

struct HostInner {
    window: Window,
    app: RefCell<WebApp>,
    registry: Rc<RefCell<Registry>>,
    queue: Rc<EventQueue>,
    timer: RefCell<TimerSlot>,
}

/// Handle to the running page; clones share the same runtime
#[derive(Clone)]
pub struct Host {
    inner: Rc<HostInner>,
}

impl Host {
    pub fn new(
        window: Window,
        document: web_sys::Document,
        config: SiteConfig,
    ) -> folio_app::Result<Self> {
        let registry = Rc::new(RefCell::new(Registry::new()));
        let queue = Rc::new(EventQueue::new());

        let doc = WebDocument::new(document, registry.clone(), queue.clone());
        let nav = BrowserNavigator::new(window.clone());
        let storage = LocalStorage::new(&window);
        let app = PortfolioApp::new(config, doc, nav, storage)?;

        let inner = Rc::new_cyclic(|weak: &Weak<HostInner>| {
            let timer_host = weak.clone();
            let callback = Closure::<dyn FnMut()>::new(move || {
                if let Some(inner) = timer_host.upgrade() {
                    inner.timer.borrow_mut().handle = None;
                    inner.pump();
                }
            });
            HostInner {
                window,
                app: RefCell::new(app),
                registry,
                queue,
                timer: RefCell::new(TimerSlot {
                    handle: None,
                    callback: Some(callback),
                }),
            }
        });

        let waker = Rc::downgrade(&inner);
        inner.queue.set_waker(move || {
            if let Some(inner) = waker.upgrade() {
                inner.pump();
            }
        });

        Ok(Self { inner })
    }

    /// Start the runtime, hook the page's listeners and arm the first timer
    pub fn start(&self) -> Result<(), JsValue> {
        let now = self.inner.now();
        self.inner.app.borrow_mut().start(now);
        self.install_listeners()?;
        self.inner.pump();
        Ok(())
    }

    /// Hand one event to the runtime
    pub fn deliver(&self, event: PageEvent) -> EventOutcome {
        self.inner.deliver(event)
    }

    fn install_listeners(&self) -> Result<(), JsValue> {
        let window = &self.inner.window;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;

        let host = self.inner.clone();
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            if event.button() != 0 {
                return;
            }
            let Some(target) = host.element_target(&event) else {
                return;
            };
            if host.deliver(PageEvent::Click { target }).prevent_default {
                event.prevent_default();
            }
        });
        document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();

        let host = self.inner.clone();
        let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(form) = host.element_target(&event) else {
                return;
            };
            if host.deliver(PageEvent::Submit { form }).prevent_default {
                event.prevent_default();
            }
        });
        document.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
        on_submit.forget();

        let host = self.inner.clone();
        let on_key = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            host.deliver(PageEvent::KeyDown {
                key: Key::from_dom(&event.key()),
            });
        });
        document.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
        on_key.forget();

        let host = self.inner.clone();
        let on_scroll = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            let offset = host.window.scroll_y().unwrap_or(0.0) as f32;
            host.deliver(PageEvent::Scroll { offset });
        });
        window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
        on_scroll.forget();

        let host = self.inner.clone();
        let on_pop = Closure::<dyn FnMut(PopStateEvent)>::new(move |event: PopStateEvent| {
            host.deliver(PageEvent::PopState {
                state: state_from_js(&event.state()),
            });
        });
        window.add_event_listener_with_callback("popstate", on_pop.as_ref().unchecked_ref())?;
        on_pop.forget();

        let host = self.inner.clone();
        let on_error = Closure::<dyn FnMut(ErrorEvent)>::new(move |event: ErrorEvent| {
            host.deliver(PageEvent::Error {
                message: event.message(),
            });
        });
        window.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())?;
        on_error.forget();

        tracing::debug!("Page listeners installed");
        Ok(())
    }
}

impl HostInner {
    fn now(&self) -> Millis {
        self.window
            .performance()
            .map(|performance| performance.now().max(0.0) as Millis)
            .unwrap_or(0)
    }

    fn element_target(&self, event: &Event) -> Option<folio_core::ElementId> {
        let element = event.target()?.dyn_into::<Element>().ok()?;
        Some(self.registry.borrow_mut().intern(&element))
    }

    fn deliver(&self, event: PageEvent) -> EventOutcome {
        let Ok(mut app) = self.app.try_borrow_mut() else {
            self.queue.push(event);
            return EventOutcome::IGNORED;
        };
        app.advance_to(self.now());
        let outcome = app.dispatch(event);
        self.drain(&mut app);
        drop(app);
        self.arm_timer();
        outcome
    }

    /// Fire due timers and parked events
    fn pump(&self) {
        let Ok(mut app) = self.app.try_borrow_mut() else {
            return;
        };
        app.advance_to(self.now());
        self.drain(&mut app);
        drop(app);
        self.arm_timer();
    }

    fn drain(&self, app: &mut WebApp) {
        while let Some(event) = self.queue.pop() {
            app.dispatch(event);
            app.advance_to(self.now());
        }
    }

    fn arm_timer(&self) {
        let deadline = match self.app.try_borrow() {
            Ok(app) => app.next_deadline(),
            Err(_) => return,
        };

        let mut slot = self.timer.borrow_mut();
        if let Some(handle) = slot.handle.take() {
            self.window.clear_timeout_with_handle(handle);
        }
        let Some(due) = deadline else {
            return;
        };
        let Some(callback) = slot.callback.as_ref() else {
            return;
        };

        let delay = timeout_delay(due, self.now());
        let result = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay,
            );
        match result {
            Ok(handle) => slot.handle = Some(handle),
            Err(err) => tracing::error!("setTimeout failed: {:?}", err),
        }
    }
}

/// `setTimeout` delay for a deadline, clamped to what the browser accepts
fn timeout_delay(due: Millis, now: Millis) -> i32 {
    due.saturating_sub(now).min(i32::MAX as Millis) as i32
}
