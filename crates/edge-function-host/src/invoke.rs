//! Handler invocation
//!
//! Handlers are synchronous, so each call runs on tokio's blocking pool
//! under a timeout. Whatever goes wrong inside the handler (an error, a
//! panic, running past the deadline) comes back as an [`InvokeError`] that
//! the router turns into a 5xx response.
//!
//! A timed-out call keeps its blocking-pool thread until the handler returns.

use std::sync::Arc;
use std::time::Duration;

use edge_function_sdk::{Handler, HandlerError, Request, Response};
use thiserror::Error;

/// Failure of a single invocation
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("handler failed: {0}")]
    Handler(#[from] HandlerError),

    #[error("handler panicked: {0}")]
    Panicked(String),

    #[error("handler timed out after {0:?}")]
    TimedOut(Duration),
}

impl InvokeError {
    pub fn into_response(self) -> Response {
        match self {
            InvokeError::Handler(err) => err.into_response(),
            InvokeError::Panicked(_) => Response::internal_error("Internal Server Error"),
            InvokeError::TimedOut(_) => Response::gateway_timeout("Handler execution timed out"),
        }
    }
}

/// The single function a host serves
#[derive(Clone)]
pub struct FunctionHost {
    handler: Arc<dyn Handler>,
    timeout: Duration,
}

impl FunctionHost {
    pub fn new(handler: impl Handler, timeout: Duration) -> Self {
        Self {
            handler: Arc::new(handler),
            timeout,
        }
    }

    /// Run the handler once for `req`
    pub async fn invoke(&self, req: Request) -> Result<Response, InvokeError> {
        let handler = Arc::clone(&self.handler);

        let task = tokio::task::spawn_blocking(move || handler.call(req));

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => Ok(result?),
            Ok(Err(join_err)) => Err(InvokeError::Panicked(panic_message(join_err))),
            Err(_) => Err(InvokeError::TimedOut(self.timeout)),
        }
    }
}

fn panic_message(err: tokio::task::JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
