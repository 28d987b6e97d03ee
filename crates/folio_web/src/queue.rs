//! Events raised while the runtime is busy
//!
//! Browser callbacks can arrive while the runtime is already handling an
//! event (or from observers that fire on their own schedule). They are parked
//! here and the waker asks the host to drain them.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use folio_core::PageEvent;

#[derive(Default)]
pub struct EventQueue {
    events: RefCell<VecDeque<PageEvent>>,
    waker: RefCell<Option<Rc<dyn Fn()>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: PageEvent) {
        self.events.borrow_mut().push_back(event);
    }

    pub fn pop(&self) -> Option<PageEvent> {
        self.events.borrow_mut().pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn set_waker(&self, waker: impl Fn() + 'static) {
        *self.waker.borrow_mut() = Some(Rc::new(waker));
    }

    /// Ask the host to drain; no-op until a waker is set
    pub fn wake(&self) {
        let waker = self.waker.borrow().clone();
        if let Some(waker) = waker {
            waker();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_fifo() {
        let queue = EventQueue::new();
        assert!(queue.pop().is_none());
        queue.push(PageEvent::Scroll { offset: 1.0 });
        queue.push(PageEvent::Scroll { offset: 2.0 });
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(PageEvent::Scroll { offset: 1.0 }));
        assert_eq!(queue.pop(), Some(PageEvent::Scroll { offset: 2.0 }));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_waker_may_drain() {
        let queue = Rc::new(EventQueue::new());
        queue.wake();

        let drained = Rc::new(Cell::new(0));
        let (q, d) = (Rc::downgrade(&queue), drained.clone());
        queue.set_waker(move || {
            if let Some(q) = q.upgrade() {
                while q.pop().is_some() {
                    d.set(d.get() + 1);
                }
            }
        });

        queue.push(PageEvent::Error {
            message: "boom".into(),
        });
        queue.wake();
        assert_eq!(drained.get(), 1);
        assert!(queue.is_empty());
    }
}
