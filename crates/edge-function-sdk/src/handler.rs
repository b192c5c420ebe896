//! The handler contract between a function and its host.
//!
//! A handler is a synchronous function from [`Request`] to
//! `Result<Response, HandlerError>`. The host owns transport, timeouts and
//! fault handling; a handler only describes one request/response exchange.
//!
//! # Example
//!
//! ```ignore
//! use edge_function_sdk::prelude::*;
//!
//! fn handle(req: Request) -> Result<Response, HandlerError> {
//!     Response::ok(json!({"path": req.path}))
//! }
//!
//! let handler: Arc<dyn Handler> = Arc::new(handle);
//! ```

use crate::{HandlerError, Request, Response};

/// Anything the host can invoke once per incoming request.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: Request) -> Result<Response, HandlerError>;
}

impl<F> Handler for F
where
    F: Fn(Request) -> Result<Response, HandlerError> + Send + Sync + 'static,
{
    fn call(&self, req: Request) -> Result<Response, HandlerError> {
        self(req)
    }
}
