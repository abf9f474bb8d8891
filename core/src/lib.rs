//! Declarative REST endpoint engine.
//!
//! # Overview
//! Declare an endpoint once — an HTTP method plus a URL template with `$`
//! placeholders — and get back a call site that, at invocation time, splits
//! its flat argument list into positional URL values, query parameters, and
//! an optional `"json"`-marked payload, assembles the request, dispatches it
//! through a pluggable [`Transport`], and normalizes the response with a
//! replaceable handler.
//!
//! # Design
//! - The core is deterministic and performs no I/O of its own; network
//!   round-trips happen only inside the [`Transport`] the caller wires in.
//! - Templates are parsed once at declaration time; placeholder order fixes
//!   the endpoint's positional arity.
//! - Non-success statuses are data, not errors: the installed
//!   [`ResponseHandler`] decides what a 404 means. Only structural mistakes
//!   (template/arity), transport failures, and malformed JSON fail a call.
//! - Base URL and handler are shared per client and swappable at any time;
//!   each call snapshots both consistently.
//!
//! ```
//! use std::sync::Arc;
//! use endpoint_core::{from_fn, HttpMethod, Normalized, ResponseEnvelope, RestClient};
//!
//! let transport = Arc::new(from_fn(|plan| {
//!     Ok(ResponseEnvelope {
//!         status: 200,
//!         headers: vec![],
//!         body: Some(plan.url.clone()),
//!     })
//! }));
//! let client = RestClient::new("http://localhost/", transport);
//! let item = client.endpoint("item", "Fetch one item.", HttpMethod::Get, "items/$id")?;
//! let out = item.call(&["42".into(), "verbose".into(), "true".into()])?;
//! assert_eq!(out, Normalized::Text("http://localhost/items/42?verbose=true".into()));
//! # Ok::<(), endpoint_core::ApiError>(())
//! ```

pub mod args;
pub mod client;
pub mod codec;
pub mod error;
pub mod handler;
pub mod http;
pub mod template;
pub mod transport;

pub use args::{classify, Arg, CallArguments, JSON_KEY};
pub use client::{Endpoint, EndpointSpec, RestClient};
pub use codec::{build_query_string, decode_json, encode_json};
pub use error::ApiError;
pub use handler::{default_handler, simple_handler, status_name, Normalized, ResponseHandler};
pub use http::{HttpMethod, RequestPlan, ResponseEnvelope};
pub use template::UrlTemplate;
pub use transport::{from_fn, FnTransport, Transport, TransportError};
