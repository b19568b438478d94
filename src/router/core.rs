//! Router core - ordered rule storage and first-match resolution.

use std::collections::HashMap;
use std::sync::Arc;

use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::pattern::CompiledRule;

/// Maximum number of extracted parameters before heap allocation.
/// Client-side routes rarely carry more than a handful of segments.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the dispatch path.
///
/// Parameter names are `Arc<str>` cloned from the compiled rule (O(1)
/// per match); values are per-dispatch strings. A `None` value means the
/// optional segment did not participate in the match.
pub type ParamVec = SmallVec<[(Arc<str>, Option<String>); MAX_INLINE_PARAMS]>;

/// A registered rule: the display form of its pattern plus the compiled
/// matcher. Immutable once appended; registration order is significant.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: String,
    compiled: CompiledRule,
}

impl Rule {
    /// The pattern as registered (after base-path prefixing).
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The compiled matcher for this rule.
    #[must_use]
    pub fn compiled(&self) -> &CompiledRule {
        &self.compiled
    }
}

/// Result of successfully matching a path against the rule table.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// Index of the matched rule, in registration order.
    pub rule_index: usize,
    /// The path string that was matched.
    pub path: String,
    /// Extracted parameters, one entry per declared name, in declaration
    /// order. Optional segments that did not participate are `None`.
    pub params: ParamVec,
}

/// Ordered rule table with first-match-wins resolution.
///
/// Rules are stored in a single append-only sequence. Insertion order is
/// never reordered or deduplicated: registering the same pattern twice
/// yields two independent rules, and matching stops at the first hit.
#[derive(Debug, Clone, Default)]
pub struct Router {
    rules: Vec<Rule>,
}

impl Router {
    /// Create an empty rule table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule, returning its index in registration order.
    pub fn add_rule(&mut self, pattern: String, compiled: CompiledRule) -> usize {
        let index = self.rules.len();
        info!(
            pattern = %pattern,
            rule_index = index,
            total_rules = index + 1,
            "rule registered"
        );
        self.rules.push(Rule { pattern, compiled });
        index
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Registered rules in registration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Display patterns of all registered rules, in registration order.
    #[must_use]
    pub fn patterns(&self) -> Vec<String> {
        self.rules.iter().map(|r| r.pattern.clone()).collect()
    }

    /// Match a path against the rule table.
    ///
    /// Scans rules in registration order and stops at the first whose
    /// matcher accepts the path; later rules are never considered.
    /// Parameters are bound positionally: capture group `n` maps to the
    /// `n`-th declared name, and the two reserved trailing hash-fragment
    /// groups are excluded.
    ///
    /// Returns `None` when no rule matches; a miss is not an error.
    #[must_use]
    pub fn route(&self, path: &str) -> Option<RouteMatch> {
        debug!(path = %path, rules = self.rules.len(), "route match attempt");

        for (rule_index, rule) in self.rules.iter().enumerate() {
            let Some(caps) = rule.compiled.matcher().captures(path) else {
                continue;
            };

            let names = rule.compiled.param_names();
            let mut params = ParamVec::new();
            for (pos, name) in names.iter().enumerate() {
                let value = caps.get(pos + 1).map(|m| m.as_str().to_string());
                params.push((Arc::clone(name), value));
            }

            info!(
                path = %path,
                pattern = %rule.pattern,
                rule_index,
                params = ?params,
                "route matched"
            );

            return Some(RouteMatch {
                rule_index,
                path: path.to_string(),
                params,
            });
        }

        warn!(path = %path, "no route matched");
        None
    }
}

/// Look up a parameter by name in a [`ParamVec`].
///
/// Uses "last write wins" semantics: with duplicate names at different
/// path depths, the last occurrence is returned. `None` covers both an
/// undeclared name and a declared segment that did not participate.
#[must_use]
pub fn get_param<'a>(params: &'a ParamVec, name: &str) -> Option<&'a str> {
    params
        .iter()
        .rfind(|(k, _)| k.as_ref() == name)
        .and_then(|(_, v)| v.as_deref())
}

/// Convert a [`ParamVec`] to a `HashMap` for compatibility with callers
/// that want owned maps. Parameters that did not participate are omitted.
/// Note: this allocates - use [`get_param`] on the dispatch path instead.
#[must_use]
pub fn params_map(params: &ParamVec) -> HashMap<String, String> {
    params
        .iter()
        .filter_map(|(k, v)| v.as_ref().map(|v| (k.to_string(), v.clone())))
        .collect()
}
