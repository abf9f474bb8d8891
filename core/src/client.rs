//! Client declaration and the endpoint factory.
//!
//! # Design
//! A `RestClient` owns the two pieces of shared mutable state one logical
//! client carries — the base URL and the installed response handler — plus
//! the transport that executes requests. `endpoint()` parses a URL template
//! once and returns an [`Endpoint`], the generated call site: its positional
//! arity is fixed by the template's placeholder order, and every call reads
//! the *current* base URL and handler, so reassigning either takes effect
//! for all endpoints of the client immediately.
//!
//! Both shared references live behind a lock; each call snapshots them
//! together, so an in-flight call never sees a torn mix of old URL and new
//! handler.

use std::sync::{Arc, PoisonError, RwLock};

use crate::args::{classify, Arg};
use crate::codec::{build_query_string, encode_json};
use crate::error::ApiError;
use crate::handler::{default_handler, Normalized, ResponseHandler};
use crate::http::{HttpMethod, RequestPlan};
use crate::template::UrlTemplate;
use crate::transport::Transport;

/// The immutable declaration of one endpoint.
#[derive(Debug, Clone)]
pub struct EndpointSpec {
    pub name: String,
    pub doc: String,
    pub method: HttpMethod,
    pub template: String,
}

struct Shared {
    base_url: RwLock<String>,
    handler: RwLock<ResponseHandler>,
    transport: Arc<dyn Transport>,
}

/// One logical API client: a base URL, a response handler, a transport, and
/// any number of endpoints declared against them.
pub struct RestClient {
    shared: Arc<Shared>,
}

impl RestClient {
    /// Create a client with the [`default_handler`] installed.
    ///
    /// The base URL is prepended verbatim to interpolated paths — templates
    /// are relative, so a base URL normally ends with `/`.
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            shared: Arc::new(Shared {
                base_url: RwLock::new(base_url.into()),
                handler: RwLock::new(default_handler()),
                transport,
            }),
        }
    }

    /// Point every endpoint of this client at a different server. Takes
    /// effect for calls that start after the reassignment.
    pub fn set_base_url(&self, base_url: impl Into<String>) {
        *self
            .shared
            .base_url
            .write()
            .unwrap_or_else(PoisonError::into_inner) = base_url.into();
    }

    pub fn base_url(&self) -> String {
        self.shared
            .base_url
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap the response-normalization policy for every endpoint of this
    /// client.
    pub fn set_response_handler(&self, handler: ResponseHandler) {
        *self
            .shared
            .handler
            .write()
            .unwrap_or_else(PoisonError::into_inner) = handler;
    }

    /// Declare an endpoint: parse the template once, fix its positional
    /// arity, and return the generated call site. Declarations are
    /// independent and order-insensitive.
    pub fn endpoint(
        &self,
        name: &str,
        doc: &str,
        method: HttpMethod,
        template: &str,
    ) -> Result<Endpoint, ApiError> {
        let parsed = UrlTemplate::parse(template)?;
        Ok(Endpoint {
            spec: EndpointSpec {
                name: name.to_string(),
                doc: doc.to_string(),
                method,
                template: template.to_string(),
            },
            template: parsed,
            shared: Arc::clone(&self.shared),
        })
    }
}

/// A generated call site: one HTTP method bound to one parsed URL template,
/// sharing its client's base URL, handler, and transport.
pub struct Endpoint {
    spec: EndpointSpec,
    template: UrlTemplate,
    shared: Arc<Shared>,
}

impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("spec", &self.spec)
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

impl Endpoint {
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn doc(&self) -> &str {
        &self.spec.doc
    }

    pub fn method(&self) -> HttpMethod {
        self.spec.method
    }

    /// Placeholder names in template order — the call's positional contract.
    pub fn param_names(&self) -> Vec<&str> {
        self.template.param_names()
    }

    /// Build the request this call would dispatch, without dispatching it.
    ///
    /// Useful for tests and dry runs; `call` goes through the same path.
    pub fn request_plan(&self, args: &[Arg]) -> Result<RequestPlan, ApiError> {
        let base_url = self
            .shared
            .base_url
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        self.plan_against(&base_url, args)
    }

    /// Invoke the endpoint: classify the arguments, assemble and dispatch
    /// the request, and normalize the response with the currently installed
    /// handler.
    pub fn call(&self, args: &[Arg]) -> Result<Normalized, ApiError> {
        // Snapshot both shared references together so one call never mixes
        // an old base URL with a newly installed handler.
        let (base_url, handler) = {
            let base_url = self
                .shared
                .base_url
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            let handler = self
                .shared
                .handler
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            (base_url, handler)
        };

        let plan = self.plan_against(&base_url, args)?;
        tracing::debug!(endpoint = %self.spec.name, method = %plan.method, url = %plan.url, "dispatching");

        let envelope = self
            .shared
            .transport
            .send(&plan)
            .map_err(ApiError::Transport)?;
        handler(envelope)
    }

    fn plan_against(&self, base_url: &str, args: &[Arg]) -> Result<RequestPlan, ApiError> {
        let classified = classify(args, self.template.param_count())?;
        let path = self.template.interpolate(&classified.url_values)?;
        let query = build_query_string(&classified.query_pairs);

        let (body, content_type) = match classified.json_payload {
            Some(payload) => (
                Some(encode_json(&payload)?),
                Some("application/json".to_string()),
            ),
            None => (None, None),
        };

        Ok(RequestPlan {
            method: self.spec.method,
            url: format!("{base_url}{path}{query}"),
            body,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ResponseEnvelope;
    use crate::transport::TransportError;
    use serde_json::json;
    use std::sync::Mutex;

    /// Transport double that records every plan and replies 200 JSON.
    struct Recording {
        plans: Mutex<Vec<RequestPlan>>,
    }

    impl Transport for Recording {
        fn send(&self, plan: &RequestPlan) -> Result<ResponseEnvelope, TransportError> {
            self.plans
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(plan.clone());
            Ok(ResponseEnvelope {
                status: 200,
                headers: vec![("Content-Type".to_string(), "application/json".to_string())],
                body: Some(r#"{"ok":true}"#.to_string()),
            })
        }
    }

    fn recording_client() -> (RestClient, Arc<Recording>) {
        let transport = Arc::new(Recording {
            plans: Mutex::new(Vec::new()),
        });
        let client = RestClient::new("http://x/", Arc::clone(&transport) as Arc<dyn Transport>);
        (client, transport)
    }

    fn last_plan(transport: &Recording) -> RequestPlan {
        transport
            .plans
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request dispatched")
    }

    #[test]
    fn get_with_query_params_builds_expected_url() {
        let (client, transport) = recording_client();
        let items = client
            .endpoint("get-item", "Fetch one item.", HttpMethod::Get, "items/$id")
            .unwrap();

        let out = items
            .call(&["42".into(), "verbose".into(), "true".into()])
            .unwrap();

        let plan = last_plan(&transport);
        assert_eq!(plan.method, HttpMethod::Get);
        assert_eq!(plan.url, "http://x/items/42?verbose=true");
        assert!(plan.body.is_none());
        assert!(plan.content_type.is_none());
        assert_eq!(out, Normalized::Json(json!({"ok": true})));
    }

    #[test]
    fn json_payload_becomes_body_not_query() {
        let (client, transport) = recording_client();
        let create = client
            .endpoint("create", "", HttpMethod::Post, "items")
            .unwrap();

        create
            .call(&["dry_run".into(), 1.into(), "json".into(), json!({"name": "x"}).into()])
            .unwrap();

        let plan = last_plan(&transport);
        assert_eq!(plan.url, "http://x/items?dry_run=1");
        assert_eq!(plan.body.as_deref(), Some(r#"{"name":"x"}"#));
        assert_eq!(plan.content_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn base_url_reassignment_affects_existing_endpoints() {
        let (client, transport) = recording_client();
        let ping = client.endpoint("ping", "", HttpMethod::Get, "ping").unwrap();

        ping.call(&[]).unwrap();
        assert_eq!(last_plan(&transport).url, "http://x/ping");

        client.set_base_url("http://y/");
        ping.call(&[]).unwrap();
        assert_eq!(last_plan(&transport).url, "http://y/ping");
    }

    #[test]
    fn handler_reassignment_affects_existing_endpoints() {
        let (client, _) = recording_client();
        let ping = client.endpoint("ping", "", HttpMethod::Get, "ping").unwrap();

        client.set_response_handler(Arc::new(|_| Ok(Normalized::Text("swapped".to_string()))));
        let out = ping.call(&[]).unwrap();
        assert_eq!(out, Normalized::Text("swapped".to_string()));
    }

    #[test]
    fn malformed_template_fails_the_declaration_only() {
        let (client, _) = recording_client();
        let err = client
            .endpoint("broken", "", HttpMethod::Get, "items/$")
            .unwrap_err();
        assert!(matches!(err, ApiError::Template { .. }));

        // The client remains usable for further declarations.
        assert!(client.endpoint("ok", "", HttpMethod::Get, "items").is_ok());
    }

    #[test]
    fn missing_url_value_is_an_arity_error() {
        let (client, _) = recording_client();
        let items = client
            .endpoint("get-item", "", HttpMethod::Get, "items/$id")
            .unwrap();
        let err = items.call(&[]).unwrap_err();
        assert!(matches!(err, ApiError::Arity { .. }));
    }

    #[test]
    fn transport_errors_propagate_unchanged() {
        let failing = crate::transport::from_fn(|_| Err("connection refused".into()));
        let client = RestClient::new("http://x/", Arc::new(failing));
        let ping = client.endpoint("ping", "", HttpMethod::Get, "ping").unwrap();

        let err = ping.call(&[]).unwrap_err();
        match err {
            ApiError::Transport(inner) => {
                assert_eq!(inner.to_string(), "connection refused");
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn request_plan_builds_without_dispatching() {
        let (client, transport) = recording_client();
        let del = client
            .endpoint("delete", "", HttpMethod::Delete, "items/$id")
            .unwrap();

        let plan = del.request_plan(&["7".into()]).unwrap();
        assert_eq!(plan.method, HttpMethod::Delete);
        assert_eq!(plan.url, "http://x/items/7");
        assert!(transport.plans.lock().unwrap().is_empty());
    }

    #[test]
    fn endpoint_metadata_is_exposed() {
        let (client, _) = recording_client();
        let ep = client
            .endpoint("avatar", "Fetch an avatar.", HttpMethod::Get, "users/$id/$file.png")
            .unwrap();
        assert_eq!(ep.name(), "avatar");
        assert_eq!(ep.doc(), "Fetch an avatar.");
        assert_eq!(ep.method(), HttpMethod::Get);
        assert_eq!(ep.param_names(), vec!["id", "file"]);
    }
}
