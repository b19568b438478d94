use std::rc::Rc;

use crate::dispatcher::RouteContext;

/// Outcome of a middleware step.
///
/// `Halt` stops the pipeline: later middleware and the matched handler are
/// never invoked, and the dispatch ends silently. This is the explicit
/// form of "abort navigation".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Flow {
    /// Advance to the next middleware (or the handler).
    Continue,
    /// Stop the pipeline; the handler is not invoked.
    Halt,
}

/// A middleware step in the dispatch pipeline.
///
/// Middleware run strictly in registration order, each receiving the
/// mutable [`RouteContext`] before the matched handler does. Returning
/// [`Flow::Halt`] short-circuits the rest of the pipeline.
pub trait Middleware {
    fn handle(&self, ctx: &mut RouteContext) -> Flow;
}

struct FnMiddleware<F>(F);

impl<F> Middleware for FnMiddleware<F>
where
    F: Fn(&mut RouteContext) -> Flow,
{
    fn handle(&self, ctx: &mut RouteContext) -> Flow {
        (self.0)(ctx)
    }
}

/// Wrap a closure as a middleware step.
///
/// ```
/// use veer::middleware::{middleware_fn, Flow};
///
/// let mw = middleware_fn(|ctx| {
///     if ctx.path.starts_with("/admin") {
///         Flow::Halt
///     } else {
///         Flow::Continue
///     }
/// });
/// ```
pub fn middleware_fn<F>(f: F) -> Rc<dyn Middleware>
where
    F: Fn(&mut RouteContext) -> Flow + 'static,
{
    Rc::new(FnMiddleware(f))
}
