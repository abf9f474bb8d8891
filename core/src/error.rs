//! Error types for the endpoint engine.
//!
//! # Design
//! Structural mistakes (a malformed template, too few URL values) get
//! dedicated variants because they are caller bugs surfaced at the boundary
//! nearest their cause. Transport failures are wrapped without inspection —
//! the engine never retries or suppresses them. Non-success HTTP statuses
//! are deliberately *not* errors: they are data handled by the response
//! handler, so a 404 never unwinds the call stack by default.

use std::fmt;

/// Errors returned by template parsing, argument classification, and
/// endpoint dispatch.
#[derive(Debug)]
pub enum ApiError {
    /// A template token started with the placeholder sigil but carried no
    /// parameter name (e.g. a bare `$` segment).
    Template { token: String },

    /// Fewer call-time values were supplied than the operation requires.
    /// Also raised for a trailing key with no paired value.
    Arity { expected: usize, supplied: usize },

    /// The transport collaborator failed (connection refused, timeout, TLS).
    /// Propagated unchanged; the engine performs no retry.
    Transport(Box<dyn std::error::Error + Send + Sync>),

    /// The JSON payload could not be serialized.
    Encode(String),

    /// A response body advertised as JSON could not be parsed.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Template { token } => {
                write!(f, "malformed placeholder token: {token:?}")
            }
            ApiError::Arity { expected, supplied } => {
                write!(f, "expected {expected} values, got {supplied}")
            }
            ApiError::Transport(err) => write!(f, "transport failed: {err}"),
            ApiError::Encode(msg) => write!(f, "JSON encoding failed: {msg}"),
            ApiError::Decode(msg) => write!(f, "JSON decoding failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
