//! # Location Module
//!
//! The seam between the router core and its host environment. The core
//! never touches browser history or hash-change events itself; it asks a
//! [`LocationProvider`] for the current path and tells it, once, when to
//! start observing navigation. [`MemoryLocation`] is the in-memory
//! implementation used in tests and non-browser hosts.

mod core;

pub use core::{LocationProvider, MemoryLocation};
