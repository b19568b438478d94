//! # Pattern Module
//!
//! The pattern module converts route specifications into matchers. A route
//! specification is one of three forms (see [`Pattern`]): a literal or
//! parameterized path string, a list of alternatives, or a pre-built
//! regular expression.
//!
//! ## Compilation
//!
//! Literal patterns go through a single left-to-right scan:
//!
//! 1. Each `:name` token (with the separator slash in front of it and an
//!    optional parenthesized constraint immediately after it) becomes an
//!    optional capture group. The default body matches one-or-more
//!    non-slash characters; an explicit constraint replaces the body.
//! 2. Each `*` becomes a greedy catch-all capture group bound to `"*"`.
//! 3. Everything else is escaped so a plain literal matches only itself.
//!
//! The result is anchored at the start (unless the pattern is a hash route,
//! which matches anywhere in the fragment), given a tolerant trailing
//! `#fragment` suffix, and compiled case-insensitively.
//!
//! ## Parameter binding
//!
//! The compiled matcher carries exactly one capture group per recorded
//! parameter name, in order of appearance, followed by the two reserved
//! groups of the hash-fragment suffix which are never bound.
//!
//! ## Example
//!
//! ```
//! use veer::pattern::Pattern;
//!
//! let rule = Pattern::from("/user/:id").compile().unwrap();
//! assert_eq!(rule.param_names().len(), 1);
//! assert!(rule.is_match("/user/42"));
//! assert!(rule.is_match("/user"));      // parameter segments are optional
//! assert!(!rule.is_match("/account"));
//! ```

mod core;
#[cfg(test)]
mod tests;

pub use core::{CompiledRule, Pattern};
