//! The pluggable transport boundary.
//!
//! # Design
//! The engine builds a [`RequestPlan`] and hands it to whatever transport
//! the application wired in — a blocking HTTP library, a test double, or a
//! recorder. Transport failures are opaque to the engine: they surface as
//! [`ApiError::Transport`](crate::ApiError::Transport) with no retry and no
//! suppression.

use crate::http::{RequestPlan, ResponseEnvelope};

/// A transport failure (connection refused, timeout, TLS, ...). The engine
/// never inspects it.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Executes a fully assembled request and returns the raw response.
///
/// Implementations decide blocking vs. externally-driven I/O, timeouts,
/// and pooling; none of that is visible to the engine. A non-success HTTP
/// status is not a transport error — it must come back as a
/// [`ResponseEnvelope`] for the response handler to interpret.
pub trait Transport: Send + Sync {
    fn send(&self, plan: &RequestPlan) -> Result<ResponseEnvelope, TransportError>;
}

/// A [`Transport`] backed by a plain closure. Built with [`from_fn`].
pub struct FnTransport<F>(F);

/// Wrap a closure over a plan as a transport, which keeps test doubles and
/// one-off adapters terse.
pub fn from_fn<F>(f: F) -> FnTransport<F>
where
    F: Fn(&RequestPlan) -> Result<ResponseEnvelope, TransportError> + Send + Sync,
{
    FnTransport(f)
}

impl<F> Transport for FnTransport<F>
where
    F: Fn(&RequestPlan) -> Result<ResponseEnvelope, TransportError> + Send + Sync,
{
    fn send(&self, plan: &RequestPlan) -> Result<ResponseEnvelope, TransportError> {
        (self.0)(plan)
    }
}
