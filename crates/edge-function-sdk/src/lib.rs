//! Edge Function SDK - Types for writing edge function handlers
//!
//! This crate provides the request/response types and the handler trait that
//! functions are written against and that the host invokes.

pub mod error;
pub mod handler;
pub mod request;
pub mod response;

pub mod prelude {
    //! Common imports for edge function handlers
    pub use crate::error::HandlerError;
    pub use crate::handler::Handler;
    pub use crate::request::Request;
    pub use crate::response::Response;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{json, Value as JsonValue};
    pub use std::sync::Arc;
}

// Re-export key types at crate root
pub use error::HandlerError;
pub use handler::Handler;
pub use request::Request;
pub use response::Response;
