//! HTTP wire types for the transport boundary.
//!
//! # Design
//! These types describe requests and responses as plain data. The core
//! builds `RequestPlan` values and interprets `ResponseEnvelope` values
//! without ever touching the network — a [`Transport`](crate::Transport)
//! implementation supplied by the caller performs the actual I/O. This
//! separation keeps the engine deterministic and easy to test.
//!
//! All fields use owned types (`String`, `Vec`) so plans and envelopes can
//! be moved freely between threads and test fixtures.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully assembled request, built fresh for each endpoint call.
///
/// `url` already contains the interpolated path and query string.
/// `content_type` is present exactly when `body` is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPlan {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<String>,
    pub content_type: Option<String>,
}

/// A raw response as returned by the transport collaborator.
///
/// `body` is `None` for bodiless responses (e.g. 204), which the response
/// handler treats differently from an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ResponseEnvelope {
    /// Look up a header value by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
