//! Error types for edge function handlers

use thiserror::Error;

/// Errors that can occur in a handler
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Convert the error to an HTTP status code
    ///
    /// Every handler failure is a server fault.
    pub fn status_code(&self) -> u16 {
        500
    }

    /// Convert to a Response
    pub fn into_response(self) -> crate::Response {
        crate::Response::error(self.status_code(), self.to_string())
    }
}

impl From<HandlerError> for crate::Response {
    fn from(err: HandlerError) -> Self {
        err.into_response()
    }
}
