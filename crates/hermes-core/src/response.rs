//! The outbound response builder.
//!
//! A [`Response`] is owned by exactly one dispatch invocation. Handlers
//! mutate it through fluent setters and finalize it with one of the `send`
//! family; finalization snapshots the state into a [`ResponsePayload`] and
//! invokes the completion callback the response was bound to. The transition
//! from unsent to sent happens at most once; a second attempt fails with a
//! contract error and never re-invokes the callback.

use crate::{ErrorObject, Headers, HermesError, HermesResult};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use tracing::debug;

/// The completion callback a response is bound to.
pub type ResponseCallback = Box<dyn FnOnce(ResponsePayload) + Send>;

/// Serialized snapshot of a finalized response.
///
/// This is the envelope that crosses the dispatch boundary: an integer
/// status, the (lower-cased) headers, and either a `data` payload or a list
/// of error objects. Unset fields are omitted from the wire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsePayload {
    /// Status code.
    pub status: u16,
    /// Response headers.
    pub headers: Headers,
    /// Payload data, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Error objects, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorObject>>,
}

/// Mutable response builder with send-exactly-once finalization.
///
/// # Example
///
/// ```
/// use hermes_core::Response;
/// use http::StatusCode;
/// use serde_json::json;
///
/// let mut response = Response::bound(|payload| {
///     assert_eq!(payload.status, 200);
/// });
///
/// response
///     .status(StatusCode::OK)
///     .data("Apple", "3444", json!({ "flavor": "sweet" }))
///     .send()
///     .unwrap();
///
/// assert!(response.send().is_err()); // only once
/// ```
pub struct Response {
    status: StatusCode,
    headers: Headers,
    data: Option<Value>,
    errors: Option<Vec<ErrorObject>>,
    sent: bool,
    callback: Option<ResponseCallback>,
}

impl Response {
    /// Creates a detached response (no completion callback).
    ///
    /// Useful in tests; finalization behaves identically except that no
    /// callback fires.
    #[must_use]
    pub fn new() -> Self {
        let mut headers = Headers::new();
        headers.set("content-type", "application/json");
        Self {
            status: StatusCode::OK,
            headers,
            data: None,
            errors: None,
            sent: false,
            callback: None,
        }
    }

    /// Creates a response bound to a completion callback.
    ///
    /// The callback receives the serialized snapshot exactly once, when the
    /// response is first sent.
    #[must_use]
    pub fn bound(callback: impl FnOnce(ResponsePayload) + Send + 'static) -> Self {
        let mut response = Self::new();
        response.callback = Some(Box::new(callback));
        response
    }

    /// Sets the status code.
    pub fn status(&mut self, status: StatusCode) -> &mut Self {
        self.status = status;
        self
    }

    /// Sets a header.
    pub fn set(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> &mut Self {
        self.headers.set(name, value);
        self
    }

    /// Sets a header. Alias of [`Response::set`].
    pub fn set_header(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> &mut Self {
        self.set(name, value)
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

    /// Appends one item to the array-valued `data` payload.
    ///
    /// Items are shaped `{type, id, attributes}`. Repeated calls accumulate;
    /// if the payload was previously overwritten with a non-array value, a
    /// fresh array replaces it.
    pub fn data(&mut self, kind: &str, id: impl Into<String>, attributes: Value) -> &mut Self {
        let item = json!({
            "type": kind,
            "id": id.into(),
            "attributes": attributes,
        });

        match &mut self.data {
            Some(Value::Array(items)) => items.push(item),
            _ => self.data = Some(Value::Array(vec![item])),
        }
        self
    }

    /// Records an error on the response.
    ///
    /// Pushes an [`ErrorObject`] onto the error list, clears any accumulated
    /// data, sets the status, and asserts the JSON content type. A later
    /// [`Response::data`] call repopulates `data` and leaves the recorded
    /// errors in place.
    pub fn error(
        &mut self,
        title: impl Into<String>,
        status: StatusCode,
        detail: impl Into<String>,
    ) -> &mut Self {
        self.data = None;
        self.errors
            .get_or_insert_with(Vec::new)
            .push(ErrorObject::new(title, detail));
        self.status = status;
        self.headers.set("content-type", "application/json");
        self
    }

    /// Returns true once the response has been finalized.
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        self.sent
    }

    /// Returns a serialized snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ResponsePayload {
        ResponsePayload {
            status: self.status.as_u16(),
            headers: self.headers.clone(),
            data: self.data.clone(),
            errors: self.errors.clone(),
        }
    }

    /// Finalizes the response.
    ///
    /// Marks the response sent and invokes the bound callback with the
    /// serialized snapshot. The unsent-to-sent transition is checked and
    /// performed under the same `&mut` borrow, so a re-entrant second call
    /// cannot slip through.
    ///
    /// # Errors
    ///
    /// Returns [`HermesError::Contract`] if the response was already sent;
    /// the callback does not fire again.
    pub fn send(&mut self) -> HermesResult<&mut Self> {
        self.ensure_unsent()?;
        self.sent = true;

        let payload = self.snapshot();
        debug!(status = payload.status, "response finalized");

        if let Some(callback) = self.callback.take() {
            callback(payload);
        }
        Ok(self)
    }

    /// Overwrites the `data` payload, then finalizes.
    pub fn send_with(&mut self, payload: Value) -> HermesResult<&mut Self> {
        self.ensure_unsent()?;
        self.data = Some(payload);
        self.send()
    }

    /// Asserts the JSON content type, then finalizes with the given payload.
    pub fn json(&mut self, payload: Value) -> HermesResult<&mut Self> {
        self.ensure_unsent()?;
        self.headers.set("content-type", "application/json");
        self.send_with(payload)
    }

    /// Finalizes with a plain-text reason phrase for the given status.
    ///
    /// Common codes get their canned phrase; anything else is sent as the
    /// numeric code in text form.
    pub fn send_status(&mut self, status: StatusCode) -> HermesResult<&mut Self> {
        self.ensure_unsent()?;
        self.status = status;
        self.headers.set("content-type", "text/plain");
        self.data = Some(Value::String(canned_phrase(status)));
        self.send()
    }

    /// Finalizes without touching the payload.
    pub fn end(&mut self) -> HermesResult<&mut Self> {
        self.send()
    }

    fn ensure_unsent(&self) -> HermesResult<()> {
        if self.sent {
            return Err(HermesError::contract(
                "Response::send() may only be called once",
            ));
        }
        Ok(())
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("data", &self.data)
            .field("errors", &self.errors)
            .field("sent", &self.sent)
            .finish_non_exhaustive()
    }
}

/// Reason phrase for the commonly-used status codes.
fn canned_phrase(status: StatusCode) -> String {
    match status.as_u16() {
        200 => "OK".to_string(),
        204 => "No Content".to_string(),
        400 => "Bad Request".to_string(),
        401 => "Unauthorized".to_string(),
        403 => "Forbidden".to_string(),
        404 => "Not Found".to_string(),
        409 => "Conflict".to_string(),
        500 => "Internal Server Error".to_string(),
        501 => "Not Implemented".to_string(),
        503 => "Service Unavailable".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Returns a bound response plus the list of payloads its callback saw.
    fn recording_response() -> (Response, Arc<Mutex<Vec<ResponsePayload>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let response = Response::bound(move |payload| {
            sink.lock().expect("callback sink poisoned").push(payload);
        });
        (response, seen)
    }

    #[test]
    fn defaults_to_200_with_json_content_type() {
        let response = Response::new();
        let snapshot = response.snapshot();
        assert_eq!(snapshot.status, 200);
        assert_eq!(snapshot.headers.get("content-type"), Some("application/json"));
        assert_eq!(snapshot.data, None);
        assert_eq!(snapshot.errors, None);
    }

    #[test]
    fn send_invokes_the_callback_once() {
        let (mut response, seen) = recording_response();
        response
            .status(StatusCode::OK)
            .data("Apple", "3444", json!({ "flavor": "sweet" }))
            .send()
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0].data,
            Some(json!([{ "type": "Apple", "id": "3444", "attributes": { "flavor": "sweet" } }]))
        );
    }

    #[test]
    fn second_send_fails_and_callback_fires_once() {
        let (mut response, seen) = recording_response();
        response.send().unwrap();

        let err = response.send().unwrap_err();
        assert!(err.message().contains("once"));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn send_with_overwrites_data() {
        let (mut response, seen) = recording_response();
        response.data("Apple", "1", json!({}));
        response.send_with(json!({ "id": "3444" })).unwrap();

        assert_eq!(seen.lock().unwrap()[0].data, Some(json!({ "id": "3444" })));
    }

    #[test]
    fn data_accumulates_items() {
        let mut response = Response::new();
        response
            .data("Apple", "1", json!({ "flavor": "sweet" }))
            .data("Apple", "2", json!({ "flavor": "tart" }));

        let data = response.snapshot().data.unwrap();
        assert_eq!(data.as_array().unwrap().len(), 2);
    }

    #[test]
    fn error_clears_data_and_sets_status() {
        let mut response = Response::new();
        response.data("Apple", "1", json!({}));
        response.error("Not Found", StatusCode::NOT_FOUND, "no apple with id 7");

        let snapshot = response.snapshot();
        assert_eq!(snapshot.status, 404);
        assert_eq!(snapshot.data, None);
        assert_eq!(
            snapshot.errors,
            Some(vec![ErrorObject::new("Not Found", "no apple with id 7")])
        );
        assert_eq!(snapshot.headers.get("content-type"), Some("application/json"));
    }

    #[test]
    fn data_after_error_repopulates_and_keeps_errors() {
        // Documented choice: error() clears data, but a later data() call
        // repopulates it and leaves the recorded errors in place.
        let mut response = Response::new();
        response.error("Internal Error", StatusCode::INTERNAL_SERVER_ERROR, "boom");
        response.data("Apple", "1", json!({}));

        let snapshot = response.snapshot();
        assert!(snapshot.data.is_some());
        assert_eq!(snapshot.errors.map(|e| e.len()), Some(1));
    }

    #[test]
    fn errors_accumulate() {
        let mut response = Response::new();
        response
            .error("Internal Error", StatusCode::INTERNAL_SERVER_ERROR, "first")
            .error("Internal Error", StatusCode::INTERNAL_SERVER_ERROR, "second");

        assert_eq!(response.snapshot().errors.map(|e| e.len()), Some(2));
    }

    #[test]
    fn json_sets_content_type_and_sends() {
        let (mut response, seen) = recording_response();
        response.set("content-type", "text/plain");
        response.json(json!({ "limit": "15" })).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].headers.get("content-type"), Some("application/json"));
        assert_eq!(seen[0].data, Some(json!({ "limit": "15" })));
    }

    #[test]
    fn send_status_uses_canned_phrases() {
        let (mut response, seen) = recording_response();
        response.send_status(StatusCode::NO_CONTENT).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].status, 204);
        assert_eq!(seen[0].headers.get("content-type"), Some("text/plain"));
        assert_eq!(seen[0].data, Some(json!("No Content")));
    }

    #[test]
    fn send_status_falls_back_to_numeric_text() {
        let (mut response, seen) = recording_response();
        response.send_status(StatusCode::IM_A_TEAPOT).unwrap();
        assert_eq!(seen.lock().unwrap()[0].data, Some(json!("418")));
    }

    #[test]
    fn end_sends_without_payload() {
        let (mut response, seen) = recording_response();
        response.status(StatusCode::NO_CONTENT).end().unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].status, 204);
        assert_eq!(seen[0].data, None);
    }

    #[test]
    fn sugar_fails_cleanly_after_send() {
        let (mut response, seen) = recording_response();
        response.send().unwrap();

        assert!(response.send_with(json!(1)).is_err());
        assert!(response.json(json!(1)).is_err());
        assert!(response.send_status(StatusCode::OK).is_err());
        assert!(response.end().is_err());
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn payload_wire_shape_omits_unset_fields() {
        let mut response = Response::new();
        response.data("Apple", "3444", json!({ "flavor": "sweet" }));

        let wire = serde_json::to_value(response.snapshot()).expect("serializes");
        assert_eq!(
            wire,
            json!({
                "status": 200,
                "headers": { "content-type": "application/json" },
                "data": [{ "type": "Apple", "id": "3444", "attributes": { "flavor": "sweet" } }],
            })
        );
    }

    #[test]
    fn payload_round_trips_through_json() {
        let mut response = Response::new();
        response.error("Not Found", StatusCode::NOT_FOUND, "nope");
        let payload = response.snapshot();

        let text = serde_json::to_string(&payload).expect("serializes");
        let back: ResponsePayload = serde_json::from_str(&text).expect("deserializes");
        assert_eq!(payload, back);
    }
}
