//! Canvas view-state store.
//!
//! Single source of truth for zoom and pan, shared by toolbar widgets,
//! the keyboard handler and the canvas itself without threading the value
//! through each of them. All access is through `&ViewStore`: the store is
//! single-threaded and uses `Cell`/`RefCell` for its state.
//!
//! The setter clamps. Callers such as `ZoomControls` clamp too, but a
//! direct `set_zoom(7.5)` still lands on `MAX_ZOOM`, so independent call
//! sites cannot disagree on the valid range.

use ig_core::{Point, Vec2, ViewState};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`ViewStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&ViewState)>;

pub struct ViewStore {
    state: Cell<ViewState>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_id: Cell<u64>,
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ViewStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewStore")
            .field("state", &self.state.get())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl ViewStore {
    pub fn new() -> Self {
        Self::with_state(ViewState::default())
    }

    pub fn with_state(state: ViewState) -> Self {
        Self {
            state: Cell::new(state),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Snapshot of the current view state.
    pub fn state(&self) -> ViewState {
        self.state.get()
    }

    pub fn zoom(&self) -> f64 {
        self.state.get().zoom()
    }

    pub fn zoom_percentage(&self) -> u32 {
        self.state.get().zoom_percentage()
    }

    /// Set the zoom ratio (clamped into range). Returns `true` and notifies
    /// subscribers if the value changed.
    pub fn set_zoom(&self, zoom: f64) -> bool {
        self.update(|state| state.set_zoom(zoom))
    }

    pub fn set_pan(&self, pan: Vec2) -> bool {
        self.update(|state| state.set_pan(pan))
    }

    pub fn pan_by(&self, delta: Vec2) -> bool {
        self.update(|state| state.set_pan(state.pan() + delta))
    }

    /// Zoom while keeping the canvas point under `anchor` fixed.
    pub fn zoom_about(&self, zoom: f64, anchor: Point) -> bool {
        self.update(|state| state.zoom_about(zoom, anchor))
    }

    /// Back to 100% with no pan.
    pub fn reset(&self) -> bool {
        self.update(|state| {
            let next = ViewState::default();
            let changed = *state != next;
            *state = next;
            changed
        })
    }

    /// Register a listener called after every change, in registration order.
    pub fn subscribe(&self, listener: impl Fn(&ViewState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn update(&self, mutate: impl FnOnce(&mut ViewState) -> bool) -> bool {
        let mut state = self.state.get();
        if !mutate(&mut state) {
            return false;
        }
        self.state.set(state);
        log::debug!(
            "view: zoom={} ({}%) pan=({}, {})",
            state.zoom(),
            state.zoom_percentage(),
            state.pan().x,
            state.pan().y
        );
        self.notify(&state);
        true
    }

    fn notify(&self, state: &ViewState) {
        // Clone the list so listeners may (un)subscribe while being notified.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ig_core::{MAX_ZOOM, MIN_ZOOM};

    #[test]
    fn setter_clamps_direct_callers() {
        let store = ViewStore::new();
        store.set_zoom(7.5);
        assert_eq!(store.zoom(), MAX_ZOOM);
        store.set_zoom(0.0);
        assert_eq!(store.zoom(), MIN_ZOOM);
    }

    #[test]
    fn subscribers_see_every_change() {
        let store = ViewStore::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |state| sink.borrow_mut().push(state.zoom_percentage()));

        store.set_zoom(1.5);
        store.set_zoom(2.0);
        assert_eq!(*seen.borrow(), vec![150, 200]);
    }

    #[test]
    fn unchanged_value_does_not_notify() {
        let store = ViewStore::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        store.subscribe(move |_| counter.set(counter.get() + 1));

        assert!(!store.set_zoom(1.0));
        assert!(!store.set_zoom(f64::NAN));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let store = ViewStore::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let id = store.subscribe(move |_| counter.set(counter.get() + 1));

        store.set_zoom(2.0);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set_zoom(3.0);
        assert_eq!(calls.get(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn listener_may_unsubscribe_itself() {
        let store = Rc::new(ViewStore::new());
        let slot: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));

        let weak = Rc::downgrade(&store);
        let own_id = Rc::clone(&slot);
        let id = store.subscribe(move |_| {
            if let (Some(store), Some(id)) = (weak.upgrade(), own_id.get()) {
                store.unsubscribe(id);
            }
        });
        slot.set(Some(id));

        store.set_zoom(2.0);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn pan_and_reset() {
        let store = ViewStore::new();
        store.pan_by(Vec2::new(10.0, 5.0));
        store.pan_by(Vec2::new(-2.0, 1.0));
        assert_eq!(store.state().pan(), Vec2::new(8.0, 6.0));

        store.set_zoom(2.5);
        assert!(store.reset());
        assert_eq!(store.state(), ViewState::default());
        assert!(!store.reset());
    }
}
