//! # Dispatcher Module
//!
//! The dispatcher owns the rule table and runs the dispatch loop: resolve
//! the current path, emit `statechange`, find the first matching rule,
//! thread a [`RouteContext`] through the middleware pipeline, and invoke
//! the matched handler.
//!
//! ## Registration
//!
//! Handlers are registered together with their patterns:
//!
//! ```
//! use veer::{Dispatcher, Handler};
//!
//! let mut dispatcher = Dispatcher::default();
//! dispatcher
//!     .register("/user/:id", Handler::callback(|_, ctx| {
//!         println!("user {:?}", ctx.param("id"));
//!     }))
//!     .unwrap();
//! ```
//!
//! ## Dispatch flow
//!
//! 1. Resolve the path: the `url` override, or the location provider's
//!    current path.
//! 2. Emit `statechange` with that path (every call, match or miss).
//! 3. Scan rules in registration order; first match wins.
//! 4. On the first match ever, establish navigation observation
//!    (provider `watch`, `watching` event, one-shot options callback).
//! 5. Run the middleware pipeline; `Halt` ends the dispatch silently.
//! 6. Invoke the handler; `Redirect` targets re-enter the loop.
//!
//! A miss is a silent no-op. Panics from middleware or handlers are not
//! caught.

mod core;

pub use core::{
    DispatchOptions, DispatchOutcome, Dispatcher, Handler, RouteContext, STATECHANGE, WATCHING,
};
