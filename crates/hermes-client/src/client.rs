//! The client wrapper over a controller.

use crate::controller::{CallOptions, Controller};
use crate::error::ClientResult;
use hermes_core::{Headers, Request, ResponsePayload, Verb};
use serde_json::Value;
use tracing::debug;

/// Caller-supplied description of one request, translated 1:1 into a
/// [`Request`] before transmission.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// The request method.
    pub method: Verb,
    /// The request path, query suffix included.
    pub path: String,
    /// Optional request body.
    pub body: Option<Value>,
    /// Headers to transmit.
    pub headers: Headers,
}

impl RequestSpec {
    /// Creates a spec with no body or headers.
    #[must_use]
    pub fn new(method: Verb, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: Headers::new(),
        }
    }

    /// Sets the body (builder form).
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a header (builder form).
    #[must_use]
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }
}

/// A request client over a pluggable transport controller.
///
/// Builds a [`Request`] from a [`RequestSpec`], forwards its wire form
/// through the controller, and resolves to the decoded
/// [`ResponsePayload`], with the transport envelope already stripped.
///
/// # Example
///
/// ```ignore
/// let client = Client::new(SessionController::new(session));
///
/// let payload = client.get("/apples/3444").await?;
/// assert_eq!(payload.status, 200);
/// ```
pub struct Client<C> {
    controller: C,
}

impl<C: Controller> Client<C> {
    /// Wraps a transport controller.
    #[must_use]
    pub const fn new(controller: C) -> Self {
        Self { controller }
    }

    /// Issues one request and resolves to the decoded response payload.
    ///
    /// # Errors
    ///
    /// Rejects only for transport-level failures (timeout, disconnect) or an
    /// undecodable reply; routing-level failures arrive as ordinary non-2xx
    /// payloads.
    pub async fn call(
        &self,
        spec: RequestSpec,
        options: &CallOptions,
    ) -> ClientResult<ResponsePayload> {
        let mut request = Request::new(spec.method, spec.path);
        for (name, value) in spec.headers.iter() {
            request.set_header(name, value);
        }
        if let Some(body) = spec.body {
            request = request.with_body(body);
        }

        debug!(method = %request.method(), path = request.path(), "issuing request");

        let reply = self.controller.request(request.to_message(), options).await?;
        Ok(serde_json::from_value(reply)?)
    }

    /// Issues a GET request.
    pub async fn get(&self, path: &str) -> ClientResult<ResponsePayload> {
        self.call(RequestSpec::new(Verb::Get, path), &CallOptions::default())
            .await
    }

    /// Issues a DELETE request.
    pub async fn delete(&self, path: &str) -> ClientResult<ResponsePayload> {
        self.call(RequestSpec::new(Verb::Delete, path), &CallOptions::default())
            .await
    }

    /// Issues a POST request with a body.
    pub async fn post(&self, path: &str, body: Value) -> ClientResult<ResponsePayload> {
        self.call(
            RequestSpec::new(Verb::Post, path).with_body(body),
            &CallOptions::default(),
        )
        .await
    }

    /// Issues a PUT request with a body.
    pub async fn put(&self, path: &str, body: Value) -> ClientResult<ResponsePayload> {
        self.call(
            RequestSpec::new(Verb::Put, path).with_body(body),
            &CallOptions::default(),
        )
        .await
    }

    /// Issues a PATCH request with a body.
    pub async fn patch(&self, path: &str, body: Value) -> ClientResult<ResponsePayload> {
        self.call(
            RequestSpec::new(Verb::Patch, path).with_body(body),
            &CallOptions::default(),
        )
        .await
    }
}
