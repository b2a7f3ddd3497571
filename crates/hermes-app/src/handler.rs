//! The handler trait and chain continuation.
//!
//! Handlers receive a read-only view of the request, the mutable response
//! builder, and a [`Next`] continuation. A terminal handler finalizes the
//! response and leaves `next` alone; middleware calls [`Next::proceed`] to
//! hand control back to the table scan without finalizing.

use hermes_core::{HermesResult, Request, Response};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};

/// A boxed future, as returned by handlers.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The future a handler invocation resolves to.
///
/// An `Err` return is the handler "throwing": the dispatcher catches it and
/// finalizes the response as a 500 carrying the error's message.
pub type HandlerFuture<'a> = BoxFuture<'a, HermesResult<()>>;

/// A request handler or middleware body.
///
/// Implement this on a struct for stateful handlers, or rely on the blanket
/// implementation for plain functions with the matching signature:
///
/// ```
/// use hermes_app::{HandlerFuture, Next};
/// use hermes_core::{Request, Response};
/// use serde_json::json;
///
/// fn get_apple<'a>(
///     req: &'a Request,
///     res: &'a mut Response,
///     _next: &'a Next,
/// ) -> HandlerFuture<'a> {
///     Box::pin(async move {
///         let id = req.param("id").unwrap_or_default().to_string();
///         res.data("Apple", id, json!({ "flavor": "sweet" })).send()?;
///         Ok(())
///     })
/// }
/// ```
pub trait Handler: Send + Sync + 'static {
    /// Processes a matched request.
    ///
    /// The request is read-only (its params and query were attached by the
    /// dispatcher before this call); the response is finalized here or passed
    /// onward via `next`.
    fn call<'a>(
        &'a self,
        request: &'a Request,
        response: &'a mut Response,
        next: &'a Next,
    ) -> HandlerFuture<'a>;
}

impl<F> Handler for F
where
    F: for<'a> Fn(&'a Request, &'a mut Response, &'a Next) -> HandlerFuture<'a>
        + Send
        + Sync
        + 'static,
{
    fn call<'a>(
        &'a self,
        request: &'a Request,
        response: &'a mut Response,
        next: &'a Next,
    ) -> HandlerFuture<'a> {
        self(request, response, next)
    }
}

/// Continuation handed to each handler invocation.
///
/// Calling [`Next::proceed`] flips a single-use flag; after the handler
/// returns, the dispatcher resumes the table scan from the following entry if
/// the flag was set and the response is still unsent. Calling it more than
/// once is harmless.
#[derive(Debug, Default)]
pub struct Next {
    called: AtomicBool,
}

impl Next {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Passes control onward once this handler returns.
    pub fn proceed(&self) {
        self.called.store(true, Ordering::SeqCst);
    }

    /// Returns true if [`Next::proceed`] was called.
    #[must_use]
    pub fn was_called(&self) -> bool {
        self.called.load(Ordering::SeqCst)
    }
}
