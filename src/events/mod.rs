//! # Events Module
//!
//! A small, reusable event emitter. The dispatcher holds one by
//! composition and uses it to report dispatch activity (`statechange` on
//! every dispatch attempt, `watching` exactly once when navigation
//! observation is established), but the emitter itself knows nothing about
//! routing.
//!
//! Listeners are plain closures taking an optional string payload.
//! `on`/`once` return a [`ListenerId`] token used for removal.
//!
//! ```
//! use veer::events::EventEmitter;
//!
//! let emitter = EventEmitter::new();
//! let id = emitter.on("statechange", |path| {
//!     assert_eq!(path, Some("/home"));
//! });
//! emitter.emit("statechange", Some("/home"));
//! emitter.remove_listener("statechange", id);
//! ```

mod core;

pub use core::{EventEmitter, ListenerId};
