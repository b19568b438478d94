//! Event emitter core - string-typed events with removable listeners.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

type ListenerFn = Rc<dyn Fn(Option<&str>)>;

struct Registration {
    id: u64,
    callback: ListenerFn,
    once: bool,
}

/// Token identifying a registered listener, returned by
/// [`EventEmitter::on`] and [`EventEmitter::once`] and consumed by
/// [`EventEmitter::remove_listener`]. Closures have no identity of their
/// own in Rust, so removal goes through this token instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A minimal event emitter: listeners keyed by event name, invoked
/// synchronously in registration order with an optional string payload.
///
/// The emitter is single-threaded and re-entrant: emission snapshots the
/// listener list before invoking anything, so a listener may register or
/// remove listeners (or emit further events) without tripping a borrow.
#[derive(Default)]
pub struct EventEmitter {
    listeners: RefCell<HashMap<String, Vec<Registration>>>,
    next_id: Cell<u64>,
}

impl EventEmitter {
    /// Create an emitter with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for the given event.
    pub fn on<F>(&self, event: &str, listener: F) -> ListenerId
    where
        F: Fn(Option<&str>) + 'static,
    {
        self.register(event, Rc::new(listener), false)
    }

    /// Register a listener that is removed after its first invocation.
    pub fn once<F>(&self, event: &str, listener: F) -> ListenerId
    where
        F: Fn(Option<&str>) + 'static,
    {
        self.register(event, Rc::new(listener), true)
    }

    fn register(&self, event: &str, callback: ListenerFn, once: bool) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        debug!(event = %event, listener_id = id, once, "listener registered");
        self.listeners
            .borrow_mut()
            .entry(event.to_string())
            .or_default()
            .push(Registration { id, callback, once });
        ListenerId(id)
    }

    /// Emit an event, invoking every listener registered for it in
    /// registration order. One-shot listeners are unregistered before the
    /// callbacks run, so a re-entrant emit cannot fire them twice.
    pub fn emit(&self, event: &str, payload: Option<&str>) {
        let snapshot: Vec<ListenerFn> = {
            let listeners = self.listeners.borrow();
            match listeners.get(event) {
                Some(regs) => regs.iter().map(|r| Rc::clone(&r.callback)).collect(),
                None => return,
            }
        };
        {
            let mut listeners = self.listeners.borrow_mut();
            if let Some(regs) = listeners.get_mut(event) {
                regs.retain(|r| !r.once);
            }
        }
        debug!(event = %event, listeners = snapshot.len(), "emit");
        for callback in &snapshot {
            callback(payload);
        }
    }

    /// Remove a single listener by token. Returns whether it was present.
    pub fn remove_listener(&self, event: &str, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let Some(regs) = listeners.get_mut(event) else {
            return false;
        };
        let before = regs.len();
        regs.retain(|r| r.id != id.0);
        let removed = regs.len() < before;
        if removed {
            debug!(event = %event, listener_id = id.0, "listener removed");
        }
        removed
    }

    /// Remove every listener registered for the given event.
    pub fn remove_all_listeners(&self, event: &str) {
        if self.listeners.borrow_mut().remove(event).is_some() {
            debug!(event = %event, "all listeners removed");
        }
    }

    /// Number of listeners currently registered for the given event.
    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .borrow()
            .get(event)
            .map_or(0, |regs| regs.len())
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners = self.listeners.borrow();
        let counts: HashMap<&str, usize> = listeners
            .iter()
            .map(|(event, regs)| (event.as_str(), regs.len()))
            .collect();
        f.debug_struct("EventEmitter")
            .field("listeners", &counts)
            .finish()
    }
}
