//! # Router Module
//!
//! The router module provides path matching and route resolution. It keeps
//! registered rules in a single ordered table and matches paths with the
//! regex matchers produced by the [`pattern`](crate::pattern) module.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Storing compiled rules in registration order
//! - Matching a path against the rules, first match wins
//! - Extracting parameters from the matched rule's capture groups
//!
//! ## Matching
//!
//! Matching is an ordered linear scan: the first rule whose matcher accepts
//! the path wins, and later rules are never considered - even another rule
//! registered with the identical pattern. A miss is a documented no-op,
//! not an error.
//!
//! ## Example
//!
//! ```
//! use veer::pattern::Pattern;
//! use veer::router::{get_param, Router};
//!
//! let mut router = Router::new();
//! let pattern = Pattern::from("/user/:id");
//! router.add_rule(pattern.to_string(), pattern.compile().unwrap());
//!
//! let m = router.route("/user/42").unwrap();
//! assert_eq!(get_param(&m.params, "id"), Some("42"));
//! ```

mod core;

pub use core::{get_param, params_map, ParamVec, RouteMatch, Router, Rule, MAX_INLINE_PARAMS};
