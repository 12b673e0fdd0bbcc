//! Resize notifications and container measurement.
//!
//! A [`ResizeSource`] hands out [`Subscription`]s; dropping one unregisters its listener. Hosts
//! take the source as a parameter so tests can drive resizes through a [`ResizeBus`] they own.

use std::cell::Cell;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::rc::Weak;

use ratatui::layout::Rect;

pub type Listener = Box<dyn FnMut()>;

/// Something that announces "the window was resized".
pub trait ResizeSource {
    fn subscribe(&self, listener: Listener) -> Subscription;
}

/// Keeps a listener registered. Dropping it unregisters the listener.
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Unregisters now instead of at drop.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[derive(Default)]
struct BusInner {
    next_id: u64,
    listeners: Vec<(u64, Rc<RefCell<Listener>>)>,
}

/// In-process [`ResizeSource`]: the app calls [`ResizeBus::emit`] when its terminal resizes.
#[derive(Clone, Default)]
pub struct ResizeBus {
    inner: Rc<RefCell<BusInner>>,
}

impl ResizeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls every registered listener once.
    ///
    /// Listeners registered or removed during `emit` take effect from the next call.
    pub fn emit(&self) {
        let listeners: Vec<Rc<RefCell<Listener>>> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            if let Ok(mut f) = listener.try_borrow_mut() {
                (&mut **f)();
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl ResizeSource for ResizeBus {
    fn subscribe(&self, listener: Listener) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, Rc::new(RefCell::new(listener))));
            id
        };
        let weak: Weak<RefCell<BusInner>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|(i, _)| *i != id);
            }
        })
    }
}

impl fmt::Debug for ResizeBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Reports the rendered size of the element a grid lives in.
pub trait ContainerMeasure {
    /// Current width, or `None` once the container is gone.
    fn width(&self) -> Option<u16>;
}

/// A container whose area the app updates as it lays out each frame.
#[derive(Clone, Debug, Default)]
pub struct ContainerRect {
    area: Rc<Cell<Option<Rect>>>,
}

impl ContainerRect {
    pub fn new(area: Rect) -> Self {
        Self {
            area: Rc::new(Cell::new(Some(area))),
        }
    }

    pub fn set(&self, area: Rect) {
        self.area.set(Some(area));
    }

    pub fn area(&self) -> Option<Rect> {
        self.area.get()
    }

    /// Marks the container as torn down.
    pub fn detach(&self) {
        self.area.set(None);
    }
}

impl ContainerMeasure for ContainerRect {
    fn width(&self) -> Option<u16> {
        self.area.get().map(|a| a.width)
    }
}
