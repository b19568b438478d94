//! Location provider core - the host-environment seam.

use std::cell::{Cell, RefCell};

/// Supplies the current location and the navigation-observation hookup.
///
/// The router core treats the host environment as an external
/// collaborator: it asks for the current path (path plus hash fragment)
/// when a dispatch has no explicit URL, and it calls [`watch`] exactly
/// once, on the first successful dispatch, to signal that the host should
/// start forwarding navigation changes (hash changes, history push and
/// replace) by re-invoking `Dispatcher::dispatch`.
///
/// [`watch`]: LocationProvider::watch
pub trait LocationProvider {
    /// The current path, including any hash fragment, e.g. `/page#tab/3`.
    fn current_path(&self) -> String;

    /// Called once when the dispatcher starts observing navigation.
    /// The default does nothing; hosts wire their own change sources here.
    fn watch(&self) {}
}

/// In-memory location provider for tests and non-browser hosts.
///
/// Holds a mutable current path and records how many times [`watch`] was
/// called, which lets callers verify that observation is established
/// exactly once.
///
/// [`watch`]: LocationProvider::watch
#[derive(Debug)]
pub struct MemoryLocation {
    path: RefCell<String>,
    watch_calls: Cell<usize>,
}

impl MemoryLocation {
    /// Create a provider positioned at the given path.
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            path: RefCell::new(initial.into()),
            watch_calls: Cell::new(0),
        }
    }

    /// Move the location to a new path. The host is responsible for
    /// re-invoking dispatch afterwards; the provider only stores state.
    pub fn navigate(&self, path: impl Into<String>) {
        *self.path.borrow_mut() = path.into();
    }

    /// The stored current path.
    #[must_use]
    pub fn path(&self) -> String {
        self.path.borrow().clone()
    }

    /// How many times the dispatcher asked to start watching.
    #[must_use]
    pub fn watch_count(&self) -> usize {
        self.watch_calls.get()
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new("/")
    }
}

impl LocationProvider for MemoryLocation {
    fn current_path(&self) -> String {
        self.path()
    }

    fn watch(&self) {
        self.watch_calls.set(self.watch_calls.get() + 1);
    }
}
