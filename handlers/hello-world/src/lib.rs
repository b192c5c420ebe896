//! Hello World handler
//!
//! Answers every request with `{"message": "Hello World"}` and echoes the
//! payload to stdout. The request is never inspected.

use std::fmt;
use std::io::{self, Write};

use edge_function_sdk::prelude::*;

pub const MESSAGE: &str = "Hello World";

/// The fixed response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Payload {
    pub message: &'static str,
}

impl Payload {
    pub fn new() -> Self {
        Self { message: MESSAGE }
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::new()
    }
}

/// Mapping form written to stdout: `{'message': 'Hello World'}`
impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{'message': '{}'}}", self.message)
    }
}

/// Handle incoming requests
pub fn handle(req: Request) -> Result<Response, HandlerError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    handle_with(&mut out, req)
}

/// Same as [`handle`], writing the payload to `out` instead of stdout.
pub fn handle_with(out: &mut impl Write, _req: Request) -> Result<Response, HandlerError> {
    let payload = Payload::new();

    writeln!(out, "{}", payload)?;
    out.flush()?;

    Response::ok(payload)
}
