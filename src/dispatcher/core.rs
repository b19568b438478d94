//! Dispatcher core - the dispatch loop.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::events::{EventEmitter, ListenerId};
use crate::location::{LocationProvider, MemoryLocation};
use crate::middleware::{Flow, Middleware};
use crate::pattern::Pattern;
use crate::router::{get_param, params_map, ParamVec, Router};

/// Event emitted on every dispatch attempt. Payload: the exact path string
/// used for matching, whether or not any rule matched.
pub const STATECHANGE: &str = "statechange";

/// Event emitted exactly once, when navigation observation is first
/// established. No payload.
pub const WATCHING: &str = "watching";

/// Per-dispatch value threaded through the middleware pipeline and into
/// the matched handler. Created fresh for every navigation event and
/// discarded afterwards.
#[derive(Debug, Clone)]
pub struct RouteContext {
    /// The path string that was matched.
    pub path: String,
    /// Extracted parameters in declaration order. Optional segments that
    /// did not participate in the match are `None`.
    pub params: ParamVec,
}

impl RouteContext {
    /// Look up a parameter by name, last write wins for duplicate names.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        get_param(&self.params, name)
    }

    /// Owned name-to-value map of the parameters that participated.
    /// Note: this allocates - use [`param`](Self::param) where possible.
    #[must_use]
    pub fn params_map(&self) -> HashMap<String, String> {
        params_map(&self.params)
    }
}

/// The callback or redirect target associated with a rule.
pub enum Handler {
    /// User callback invoked with the dispatcher and the route context.
    Callback(Box<dyn Fn(&Dispatcher, &RouteContext)>),
    /// Client-side redirect: re-invokes dispatch with the target path.
    Redirect(String),
}

impl Handler {
    /// Wrap a closure as a handler.
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(&Dispatcher, &RouteContext) + 'static,
    {
        Handler::Callback(Box::new(f))
    }

    /// A redirect to the given target path.
    pub fn redirect(target: impl Into<String>) -> Self {
        Handler::Redirect(target.into())
    }
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Handler::Callback(_) => f.write_str("Handler::Callback"),
            Handler::Redirect(target) => write!(f, "Handler::Redirect({target})"),
        }
    }
}

/// Options for a single [`Dispatcher::dispatch`] call.
#[derive(Default)]
pub struct DispatchOptions {
    /// Path to dispatch instead of the location provider's current path.
    pub url: Option<String>,
    /// Invoked exactly once, if this call is the one that establishes
    /// navigation observation.
    pub callback: Option<Box<dyn FnOnce()>>,
}

impl DispatchOptions {
    /// Dispatch the given path instead of the current location.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Invoke the given callback when observation is first established.
    #[must_use]
    pub fn callback<F>(mut self, f: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        self.callback = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for DispatchOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchOptions")
            .field("url", &self.url)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// What a [`Dispatcher::dispatch`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A rule matched and its handler ran to completion.
    Handled,
    /// A rule matched but a middleware halted the pipeline.
    Halted,
    /// No rule matched; the call was a no-op.
    Missed,
}

/// The router's dispatch engine.
///
/// Owns the ordered rule table, the handlers registered alongside it, the
/// middleware pipeline, an [`EventEmitter`] (held by composition), the
/// location provider, and the base-path prefix. One explicit instance per
/// router; there is no implicit global.
///
/// Everything is single-threaded and synchronous. Dispatch is re-entrant:
/// a handler or middleware may call [`dispatch`](Self::dispatch) again and
/// it simply recurses on the calling thread - redirect handlers rely on
/// exactly that.
pub struct Dispatcher {
    router: Router,
    handlers: Vec<Handler>,
    middlewares: Vec<Rc<dyn Middleware>>,
    events: EventEmitter,
    location: Rc<dyn LocationProvider>,
    running: Cell<bool>,
    base: String,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Rc::new(MemoryLocation::default()))
    }
}

impl Dispatcher {
    /// Create a dispatcher backed by the given location provider.
    #[must_use]
    pub fn new(location: Rc<dyn LocationProvider>) -> Self {
        Dispatcher {
            router: Router::new(),
            handlers: Vec::new(),
            middlewares: Vec::new(),
            events: EventEmitter::new(),
            location,
            running: Cell::new(false),
            base: String::new(),
        }
    }

    /// Register a pattern with its handler.
    ///
    /// The pattern is prefixed with the base path first (skipped for `*`
    /// and patterns already carrying the prefix), then compiled. A pattern
    /// that does not compile to a valid regular expression fails here, at
    /// registration time. Chainable on success.
    pub fn register(
        &mut self,
        pattern: impl Into<Pattern>,
        handler: Handler,
    ) -> Result<&mut Self> {
        let pattern = pattern.into().with_base(&self.base);
        let compiled = pattern.compile()?;
        self.router.add_rule(pattern.to_string(), compiled);
        self.handlers.push(handler);
        Ok(self)
    }

    /// Register ordered (pattern, handler) pairs, in iteration order.
    pub fn register_map<P, I>(&mut self, pairs: I) -> Result<&mut Self>
    where
        P: Into<Pattern>,
        I: IntoIterator<Item = (P, Handler)>,
    {
        for (pattern, handler) in pairs {
            self.register(pattern, handler)?;
        }
        Ok(self)
    }

    /// Append a middleware step to the pipeline. Steps run in the order
    /// they were added. Chainable.
    pub fn add_middleware(&mut self, mw: Rc<dyn Middleware>) -> &mut Self {
        self.middlewares.push(mw);
        self
    }

    /// The current base-path prefix (default empty).
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Set the base-path prefix applied to subsequently registered
    /// patterns. Chainable.
    pub fn set_base(&mut self, base: impl Into<String>) -> &mut Self {
        self.base = base.into();
        self
    }

    /// The event emitter reporting dispatch activity.
    #[must_use]
    pub fn events(&self) -> &EventEmitter {
        &self.events
    }

    /// Register a listener on the dispatcher's emitter.
    pub fn on<F>(&self, event: &str, listener: F) -> ListenerId
    where
        F: Fn(Option<&str>) + 'static,
    {
        self.events.on(event, listener)
    }

    /// Register a one-shot listener on the dispatcher's emitter.
    pub fn once<F>(&self, event: &str, listener: F) -> ListenerId
    where
        F: Fn(Option<&str>) + 'static,
    {
        self.events.once(event, listener)
    }

    /// Display patterns of all registered rules, in registration order.
    #[must_use]
    pub fn patterns(&self) -> Vec<String> {
        self.router.patterns()
    }

    /// Whether navigation observation has been established.
    #[must_use]
    pub fn running(&self) -> bool {
        self.running.get()
    }

    /// Match the current (or overridden) path and run the first matching
    /// rule's middleware pipeline and handler.
    ///
    /// Emits [`STATECHANGE`] with the exact path on every call. On the
    /// first call that finds a match, establishes navigation observation:
    /// sets the running flag, calls the location provider's `watch`, emits
    /// [`WATCHING`], and invokes the options callback if one was supplied.
    /// All of that is idempotent across later calls.
    ///
    /// No matching rule is a silent miss, not an error. Middleware and
    /// handler panics are not caught and propagate to the caller.
    pub fn dispatch(&self, options: DispatchOptions) -> DispatchOutcome {
        let DispatchOptions { url, callback } = options;
        let path = url.unwrap_or_else(|| self.location.current_path());

        self.events.emit(STATECHANGE, Some(&path));

        let Some(matched) = self.router.route(&path) else {
            return DispatchOutcome::Missed;
        };

        if !self.running.get() {
            self.running.set(true);
            self.location.watch();
            info!("navigation observation established");
            self.events.emit(WATCHING, None);
            if let Some(cb) = callback {
                cb();
            }
        }

        let mut ctx = RouteContext {
            path: matched.path,
            params: matched.params,
        };

        for mw in &self.middlewares {
            if mw.handle(&mut ctx) == Flow::Halt {
                debug!(path = %ctx.path, "middleware halted dispatch");
                return DispatchOutcome::Halted;
            }
        }

        let Some(handler) = self.handlers.get(matched.rule_index) else {
            // Rules and handlers are appended together; this is unreachable
            // short of a bug in registration.
            warn!(rule_index = matched.rule_index, "matched rule has no handler");
            return DispatchOutcome::Missed;
        };

        match handler {
            Handler::Callback(f) => {
                f(self, &ctx);
                DispatchOutcome::Handled
            }
            Handler::Redirect(target) => {
                info!(from = %ctx.path, to = %target, "redirect");
                self.dispatch(DispatchOptions::default().url(target.clone()))
            }
        }
    }

    /// Dispatch the location provider's current path.
    pub fn dispatch_current(&self) -> DispatchOutcome {
        self.dispatch(DispatchOptions::default())
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("rules", &self.router.len())
            .field("middlewares", &self.middlewares.len())
            .field("running", &self.running.get())
            .field("base", &self.base)
            .finish()
    }
}
