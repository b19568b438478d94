use tracing::info;

use super::{Flow, Middleware};
use crate::dispatcher::RouteContext;

/// Middleware that logs every dispatched route with its parameters.
///
/// Always continues; purely observational.
pub struct TracingMiddleware;

impl Middleware for TracingMiddleware {
    fn handle(&self, ctx: &mut RouteContext) -> Flow {
        info!(
            path = %ctx.path,
            params = ?ctx.params,
            "dispatching route"
        );
        Flow::Continue
    }
}
