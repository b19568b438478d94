//! # veer
//!
//! **veer** is a minimal client-side URL router: it registers path
//! patterns (named parameters, optional constrained segments, wildcards,
//! hash-based routes) mapped to handler callbacks, matches a location path
//! against those patterns in registration order, extracts parameters, runs
//! a middleware pipeline, and invokes the first matching handler.
//!
//! ## Architecture
//!
//! The library is organized into small modules:
//!
//! - **[`pattern`]** - route-pattern compiler: specifications become
//!   regex-based matchers with ordered parameter names
//! - **[`router`]** - ordered rule table with first-match-wins resolution
//!   and parameter extraction
//! - **[`dispatcher`]** - the dispatch loop: path resolution, events,
//!   middleware pipeline, handler invocation, redirects
//! - **[`middleware`]** - the `Middleware` trait and `Flow` pipeline
//!   control
//! - **[`events`]** - a small reusable event emitter, held by the
//!   dispatcher through composition
//! - **[`location`]** - the host-environment seam supplying the current
//!   path and the navigation-observation hookup
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use veer::{DispatchOptions, DispatchOutcome, Dispatcher, Handler, MemoryLocation};
//!
//! let location = Rc::new(MemoryLocation::new("/user/7"));
//! let mut dispatcher = Dispatcher::new(location);
//! dispatcher
//!     .register("/user/:id", Handler::callback(|_, ctx| {
//!         assert_eq!(ctx.param("id"), Some("7"));
//!     }))
//!     .unwrap();
//!
//! let outcome = dispatcher.dispatch(DispatchOptions::default());
//! assert_eq!(outcome, DispatchOutcome::Handled);
//! ```
//!
//! ## Scope
//!
//! The core is single-threaded and synchronous. Browser history
//! integration and hash-change observation live behind the
//! [`location::LocationProvider`] seam: the host supplies the current path
//! and re-invokes [`Dispatcher::dispatch`] when navigation changes.

pub mod dispatcher;
pub mod events;
pub mod location;
pub mod middleware;
pub mod pattern;
pub mod router;

pub use dispatcher::{
    DispatchOptions, DispatchOutcome, Dispatcher, Handler, RouteContext, STATECHANGE, WATCHING,
};
pub use events::{EventEmitter, ListenerId};
pub use location::{LocationProvider, MemoryLocation};
pub use middleware::{middleware_fn, Flow, Middleware, TracingMiddleware};
pub use pattern::{CompiledRule, Pattern};
pub use router::{get_param, params_map, ParamVec, RouteMatch, Router, Rule, MAX_INLINE_PARAMS};
