//! The inbound request value object.

use crate::{Headers, HermesError, HermesResult, Verb};
use hermes_router::Params;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Describes a JSON value's type for validation messages.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One inbound call: verb, path, headers and optional body, plus the
/// parameters and query captured during dispatch.
///
/// A `Request` is created once per inbound message, either by the dispatch
/// engine ([`Request::parse`]) or by a client about to transmit it
/// ([`Request::new`]). Handlers treat it as read-only; `params` and `query`
/// are attached by the dispatcher once a route matches.
///
/// # Example
///
/// ```
/// use hermes_core::{Request, Verb};
/// use serde_json::json;
///
/// let request = Request::parse(&json!({
///     "method": "GET",
///     "path": "/apples/3444?limit=15",
///     "headers": { "Accept": "application/json" },
/// }))
/// .unwrap();
///
/// assert_eq!(request.method(), Verb::Get);
/// assert_eq!(request.route_path(), "/apples/3444");
/// assert_eq!(request.header("accept"), Some("application/json"));
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    method: Verb,
    path: String,
    headers: Headers,
    body: Option<Value>,
    params: Params,
    query: BTreeMap<String, String>,
}

impl Request {
    /// Creates a request for transmission, with no headers or body.
    #[must_use]
    pub fn new(method: Verb, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Headers::new(),
            body: None,
            params: Params::new(),
            query: BTreeMap::new(),
        }
    }

    /// Adds a header (builder form).
    #[must_use]
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Sets the body (builder form).
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Parses a raw inbound message into a request.
    ///
    /// The message must carry a string `method` naming one of the supported
    /// verbs (case-insensitive) and a string `path`. An optional `headers`
    /// object contributes its string-valued entries; an optional `body` is
    /// carried through untouched.
    ///
    /// # Errors
    ///
    /// Returns [`HermesError::Validation`] naming the offending field when
    /// `method` or `path` is missing, mistyped, or outside the supported
    /// verb set.
    pub fn parse(raw: &Value) -> HermesResult<Self> {
        let method = match raw.get("method") {
            Some(Value::String(value)) => value.parse::<Verb>()?,
            Some(other) => {
                return Err(HermesError::validation(format!(
                    "request method must be a string, got {}",
                    json_kind(other)
                )))
            }
            None => return Err(HermesError::validation("request is missing a method")),
        };

        let path = match raw.get("path") {
            Some(Value::String(value)) => value.clone(),
            Some(other) => {
                return Err(HermesError::validation(format!(
                    "request path must be a string, got {}",
                    json_kind(other)
                )))
            }
            None => return Err(HermesError::validation("request is missing a path")),
        };

        let mut headers = Headers::new();
        if let Some(Value::Object(map)) = raw.get("headers") {
            for (name, value) in map {
                if let Value::String(value) = value {
                    headers.set(name, value.clone());
                }
            }
        }

        let body = match raw.get("body") {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.clone()),
        };

        Ok(Self {
            method,
            path,
            headers,
            body,
            params: Params::new(),
            query: BTreeMap::new(),
        })
    }

    /// Returns the request method.
    #[must_use]
    pub const fn method(&self) -> Verb {
        self.method
    }

    /// Returns the full request path, query suffix included.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the path component alone, without any `?query` suffix.
    /// This is the form route patterns match against.
    #[must_use]
    pub fn route_path(&self) -> &str {
        self.path
            .split_once('?')
            .map_or(self.path.as_str(), |(path, _)| path)
    }

    /// Returns the request body, if one was supplied.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Returns the header map.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns a header value by (case-insensitive) name.
    #[must_use]
    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        self.headers.get(name)
    }

    /// Returns true if a header is present.
    #[must_use]
    pub fn has_header(&self, name: impl AsRef<str>) -> bool {
        self.headers.contains(name)
    }

    /// Sets a header.
    pub fn set_header(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.headers.set(name, value);
    }

    /// Returns the parameters captured by the matched route pattern.
    ///
    /// Empty until the dispatcher attaches them on a match.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }

    /// Returns one captured parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Returns the captured query map.
    ///
    /// Empty until the dispatcher captures it on a match, and empty (never
    /// absent) when the path carries no query suffix.
    #[must_use]
    pub const fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    /// Returns one query value by name.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Attaches the parameters captured by a matched route pattern.
    ///
    /// Called by the dispatcher; each matching table entry replaces the
    /// captures of the previous one.
    pub fn attach_params(&mut self, params: Params) {
        self.params = params;
    }

    /// Captures the query component of the path into a flat map.
    ///
    /// Independent of route matching. An absent query yields an empty map; a
    /// malformed one degrades to an empty map as well.
    pub fn capture_query(&mut self) {
        let raw = self
            .path
            .split_once('?')
            .map_or("", |(_, query)| query);

        let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(raw) {
            Ok(pairs) => pairs,
            Err(error) => {
                debug!(query = raw, %error, "discarding unparseable query string");
                Vec::new()
            }
        };

        self.query = pairs.into_iter().collect();
    }

    /// Serializes the request into its wire form.
    ///
    /// The wire form is `{method, path, headers, body}`; `params` and `query`
    /// are dispatch-local (computed by the receiving side) and excluded.
    #[must_use]
    pub fn to_message(&self) -> Value {
        let mut message = Map::new();
        message.insert("method".into(), Value::String(self.method.as_str().into()));
        message.insert("path".into(), Value::String(self.path.clone()));
        message.insert(
            "headers".into(),
            Value::Object(
                self.headers
                    .iter()
                    .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
                    .collect(),
            ),
        );
        if let Some(body) = &self.body {
            message.insert("body".into(), body.clone());
        }
        Value::Object(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_a_full_message() {
        let request = Request::parse(&json!({
            "method": "post",
            "path": "/apples",
            "headers": { "Content-Type": "application/json" },
            "body": { "flavor": "sweet" },
        }))
        .unwrap();

        assert_eq!(request.method(), Verb::Post);
        assert_eq!(request.path(), "/apples");
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.body(), Some(&json!({ "flavor": "sweet" })));
        assert!(request.params().is_empty());
        assert!(request.query().is_empty());
    }

    #[test]
    fn method_is_case_insensitive() {
        let request =
            Request::parse(&json!({ "method": "DeLeTe", "path": "/apples/1" })).unwrap();
        assert_eq!(request.method(), Verb::Delete);
    }

    #[test]
    fn missing_method_is_a_validation_error() {
        let err = Request::parse(&json!({ "path": "/apples" })).unwrap_err();
        assert!(err.message().contains("method"));
    }

    #[test]
    fn non_string_path_is_a_validation_error() {
        let err = Request::parse(&json!({ "method": "GET", "path": 42 })).unwrap_err();
        assert_eq!(err.message(), "request path must be a string, got a number");
    }

    #[test]
    fn unsupported_method_is_a_validation_error() {
        let err = Request::parse(&json!({ "method": "OPTIONS", "path": "/" })).unwrap_err();
        assert!(err.message().contains("OPTIONS"));
    }

    #[test]
    fn route_path_strips_the_query() {
        let request = Request::new(Verb::Get, "/apples/3444?limit=15");
        assert_eq!(request.route_path(), "/apples/3444");
        assert_eq!(request.path(), "/apples/3444?limit=15");
    }

    #[test]
    fn capture_query_builds_a_flat_map() {
        let mut request = Request::new(Verb::Get, "/apples/3444?limit=15&offset=2");
        request.capture_query();
        assert_eq!(request.query_param("limit"), Some("15"));
        assert_eq!(request.query_param("offset"), Some("2"));
    }

    #[test]
    fn capture_query_without_suffix_yields_empty_map() {
        let mut request = Request::new(Verb::Get, "/apples/3444");
        request.capture_query();
        assert!(request.query().is_empty());
    }

    #[test]
    fn attach_params_replaces_previous_captures() {
        let mut request = Request::new(Verb::Get, "/apples/3444");
        request.attach_params([("id".to_string(), "3444".to_string())].into_iter().collect());
        assert_eq!(request.param("id"), Some("3444"));

        request.attach_params(Params::new());
        assert!(request.params().is_empty());
    }

    #[test]
    fn wire_form_excludes_dispatch_local_state() {
        let mut request = Request::new(Verb::Get, "/apples/3444?limit=15")
            .with_header("Accept", "application/json");
        request.capture_query();
        request.attach_params([("id".to_string(), "3444".to_string())].into_iter().collect());

        assert_eq!(
            request.to_message(),
            json!({
                "method": "get",
                "path": "/apples/3444?limit=15",
                "headers": { "accept": "application/json" },
            })
        );
    }

    #[test]
    fn wire_form_carries_the_body() {
        let request = Request::new(Verb::Post, "/apples").with_body(json!({ "flavor": "tart" }));
        assert_eq!(
            request.to_message(),
            json!({
                "method": "post",
                "path": "/apples",
                "headers": {},
                "body": { "flavor": "tart" },
            })
        );
    }
}
