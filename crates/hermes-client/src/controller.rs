//! The transport-controller capability and its reference adapters.
//!
//! A [`Controller`] reduces one concrete transport's round-trip machinery to
//! a single shape: send a message, resolve to the raw reply value. Each
//! implementing type is independent; there is no shared base state, only the
//! shared contract.

use crate::error::{ClientError, ClientResult};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

/// A boxed future, as returned by controllers and transport primitives.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Per-call options.
///
/// This is the configuration surface of the client layer: timeout semantics
/// live here, on the calling side, never inside the dispatch engine.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Upper bound on the wait for a reply. Adapters without an inherent
    /// bound ([`AckController`]) fall back to
    /// [`CallOptions::DEFAULT_ACK_TIMEOUT`] when unset.
    pub timeout: Option<Duration>,
}

impl CallOptions {
    /// Default bound applied by acknowledgment-based adapters.
    pub const DEFAULT_ACK_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates options with an explicit timeout.
    #[must_use]
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// Uniform request capability over an arbitrary transport.
pub trait Controller: Send + Sync + 'static {
    /// Performs one round trip: transmits `message` and resolves to the raw
    /// reply value (the response envelope, still undecoded).
    fn request<'a>(
        &'a self,
        message: Value,
        options: &'a CallOptions,
    ) -> BoxFuture<'a, ClientResult<Value>>;
}

/// A correlated request/reply session primitive.
///
/// The transport pairs replies to requests itself (per-exchange reply
/// streams); the adapter only has to take the first reply.
pub trait RequestSession: Send + Sync + 'static {
    /// Opens one exchange: transmits `message` and returns the stream of
    /// reply messages for that exchange.
    fn request(&self, message: Value) -> BoxFuture<'_, ClientResult<mpsc::Receiver<Value>>>;
}

/// Controller over a correlated request/reply session.
///
/// Awaits the first reply message of the exchange and unwraps its `payload`
/// envelope field. Further streamed replies are ignored.
pub struct SessionController<S> {
    session: S,
}

impl<S: RequestSession> SessionController<S> {
    /// Wraps a session primitive.
    #[must_use]
    pub const fn new(session: S) -> Self {
        Self { session }
    }
}

impl<S: RequestSession> Controller for SessionController<S> {
    fn request<'a>(
        &'a self,
        message: Value,
        options: &'a CallOptions,
    ) -> BoxFuture<'a, ClientResult<Value>> {
        Box::pin(async move {
            let mut replies = self.session.request(message).await?;

            let first = match options.timeout {
                Some(limit) => timeout(limit, replies.recv())
                    .await
                    .map_err(|_| ClientError::timeout(limit))?,
                None => replies.recv().await,
            };

            let reply = first
                .ok_or_else(|| ClientError::closed("reply stream ended before the first reply"))?;
            unwrap_payload(reply)
        })
    }
}

/// Extracts the `payload` field from a reply envelope.
fn unwrap_payload(reply: Value) -> ClientResult<Value> {
    match reply {
        Value::Object(mut envelope) => envelope
            .remove("payload")
            .ok_or_else(|| ClientError::envelope("reply is missing its payload field")),
        _ => Err(ClientError::envelope("reply must be an object")),
    }
}

/// An acknowledgment-based send primitive.
///
/// The transport's send resolves directly with the receiver's reply; there
/// is no session or reply stream to manage.
pub trait AckTransport: Send + Sync + 'static {
    /// Transmits `message`; resolves to the receiver's acknowledgment value.
    fn send(&self, message: Value) -> BoxFuture<'_, ClientResult<Value>>;
}

/// Controller over a timeout-bounded acknowledgment primitive.
///
/// The wait is always bounded: the per-call timeout when one is set,
/// [`CallOptions::DEFAULT_ACK_TIMEOUT`] otherwise.
pub struct AckController<T> {
    transport: T,
}

impl<T: AckTransport> AckController<T> {
    /// Wraps an acknowledgment transport.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }
}

impl<T: AckTransport> Controller for AckController<T> {
    fn request<'a>(
        &'a self,
        message: Value,
        options: &'a CallOptions,
    ) -> BoxFuture<'a, ClientResult<Value>> {
        Box::pin(async move {
            let limit = options.timeout.unwrap_or(CallOptions::DEFAULT_ACK_TIMEOUT);
            timeout(limit, self.transport.send(message))
                .await
                .map_err(|_| ClientError::timeout(limit))?
        })
    }
}
