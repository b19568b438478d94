mod core;
mod tracing;

pub use core::{middleware_fn, Flow, Middleware};
pub use tracing::TracingMiddleware;
