//! Response normalization strategies.
//!
//! # Design
//! The raw [`ResponseEnvelope`] coming back from the transport is handed to
//! whichever handler is currently installed on the client. Status-code
//! semantics are a data concern here, not an exception concern: a 404 or a
//! 500 produces a diagnostic log line and a returned value, never an error.
//! Only malformed wire data ([`ApiError::Decode`]) fails a call at this
//! stage. Handlers are plain `Fn` values behind an `Arc`, so applications
//! can swap in their own policy at any time.

use std::sync::Arc;

use serde_json::Value;

use crate::codec::decode_json;
use crate::error::ApiError;
use crate::http::ResponseEnvelope;

/// The application-level result of a normalized response.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// A body decoded from `application/json`.
    Json(Value),
    /// A body returned verbatim under any other content type.
    Text(String),
    /// A bodiless response with a recognized status code, reduced to the
    /// code's symbolic name.
    Status(&'static str),
    /// The distinguished "no content" sentinel (simple policy, 204).
    NoContent,
    /// The full envelope, returned when no narrower interpretation applies.
    Envelope(ResponseEnvelope),
}

/// The replaceable normalization strategy. Installed per client; invoked
/// once per completed request with the envelope the transport returned.
pub type ResponseHandler = Arc<dyn Fn(ResponseEnvelope) -> Result<Normalized, ApiError> + Send + Sync>;

/// Symbolic name for a recognized status code.
///
/// 204 is intentionally absent: a bodiless 204 under the default policy
/// falls through to the full envelope rather than a symbolic name.
pub fn status_name(status: u16) -> Option<&'static str> {
    Some(match status {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        301 => "Moved Permanently",
        302 => "Found",
        304 => "Not Modified",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => return None,
    })
}

fn is_json(envelope: &ResponseEnvelope) -> bool {
    envelope
        .header("content-type")
        .is_some_and(|v| v.to_ascii_lowercase().contains("application/json"))
}

fn warn_non_success(status: u16) {
    if !(200..300).contains(&status) {
        tracing::warn!(status, "non-success response status");
    }
}

/// The default normalization policy.
///
/// Non-2xx statuses log a diagnostic but never fail the call. A bodiless
/// response reduces to its symbolic status name when the code is
/// recognized, otherwise the envelope comes back whole. A body is decoded
/// as JSON when the `Content-Type` header says so (case-insensitively),
/// and returned verbatim otherwise.
pub fn default_handler() -> ResponseHandler {
    Arc::new(|envelope: ResponseEnvelope| {
        warn_non_success(envelope.status);
        let json = is_json(&envelope);
        match envelope.body {
            Some(ref body) if json => Ok(Normalized::Json(decode_json(body)?)),
            Some(body) => Ok(Normalized::Text(body)),
            None => match status_name(envelope.status) {
                Some(name) => Ok(Normalized::Status(name)),
                None => Ok(Normalized::Envelope(envelope)),
            },
        }
    })
}

/// A simpler built-in policy: 200 is success (decoded per content type),
/// 204 is the [`Normalized::NoContent`] sentinel, and anything else logs a
/// diagnostic and returns the full envelope.
pub fn simple_handler() -> ResponseHandler {
    Arc::new(|envelope: ResponseEnvelope| match envelope.status {
        200 => {
            let json = is_json(&envelope);
            match envelope.body {
                Some(ref body) if json => Ok(Normalized::Json(decode_json(body)?)),
                Some(body) => Ok(Normalized::Text(body)),
                None => Ok(Normalized::Text(String::new())),
            }
        }
        204 => Ok(Normalized::NoContent),
        status => {
            tracing::warn!(status, "non-success response status");
            Ok(Normalized::Envelope(envelope))
        }
    })
}
