//! The route table and dispatch state machine.

use crate::handler::{Handler, Next};
use hermes_core::{Request, Response, ResponsePayload, Verb};
use hermes_router::{Params, PathPattern};
use http::StatusCode;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Generic detail carried by the 404 finalizer.
const NOT_FOUND_DETAIL: &str = "The page or resource you are looking for does not exist";

/// One registered table entry: a method-specific route or, when `method` is
/// `None`, a method-agnostic middleware whose pattern also matches any
/// sub-path beneath it.
#[derive(Clone)]
struct RouteEntry {
    method: Option<Verb>,
    pattern: PathPattern,
    handler: Arc<dyn Handler>,
}

impl RouteEntry {
    fn accepts(&self, method: Verb) -> bool {
        self.method.map_or(true, |own| own == method)
    }

    fn matches(&self, path: &str) -> Option<Params> {
        if self.method.is_none() {
            self.pattern.matches_prefix(path)
        } else {
            self.pattern.matches(path)
        }
    }
}

/// The dispatch engine: an ordered table of routes and middleware.
///
/// Entries are appended in registration order, and that order is the sole
/// tie-break for overlapping patterns: the first structurally-matching entry
/// wins. One table doubles as both a method-exact router and a middleware
/// pipeline, so no separate matching pass exists for either.
///
/// The table is expected to be fully populated before traffic starts;
/// independent [`App::receive`] calls may then run concurrently, each owning
/// its own request/response pair.
///
/// # Example
///
/// ```
/// use hermes_app::{App, HandlerFuture, Next};
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
///
/// # tokio_test::block_on(async {
/// let mut app = App::new();
/// app.get("/apples/:id", get_apple);
///
/// let response = app
///     .receive(json!({ "method": "GET", "path": "/apples/3444" }), |payload| {
///         assert_eq!(payload.status, 200);
///     })
///     .await;
/// assert!(response.is_sent());
/// # });
/// ```
#[derive(Clone, Default)]
pub struct App {
    entries: Vec<RouteEntry>,
}

impl App {
    /// Creates an empty dispatch table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a table entry.
    ///
    /// `method = None` registers middleware: it matches any verb, and its
    /// pattern is matched as a prefix so it also covers every sub-path
    /// beneath it. Duplicate and overlapping patterns are legal; dispatch
    /// order resolves them.
    ///
    /// # Panics
    ///
    /// Panics if the pattern does not compile (see
    /// [`PathPattern::compile`](hermes_router::PathPattern::compile)).
    pub fn register(
        &mut self,
        method: Option<Verb>,
        path: &str,
        handler: impl Handler,
    ) -> &mut Self {
        let pattern = PathPattern::compile(path);
        debug!(
            method = method.map_or("*", |verb| verb.as_str()),
            pattern = pattern.as_str(),
            "route registered"
        );
        self.entries.push(RouteEntry {
            method,
            pattern,
            handler: Arc::new(handler),
        });
        self
    }

    /// Registers a GET route.
    pub fn get(&mut self, path: &str, handler: impl Handler) -> &mut Self {
        self.register(Some(Verb::Get), path, handler)
    }

    /// Registers a POST route.
    pub fn post(&mut self, path: &str, handler: impl Handler) -> &mut Self {
        self.register(Some(Verb::Post), path, handler)
    }

    /// Registers a PUT route.
    pub fn put(&mut self, path: &str, handler: impl Handler) -> &mut Self {
        self.register(Some(Verb::Put), path, handler)
    }

    /// Registers a PATCH route.
    pub fn patch(&mut self, path: &str, handler: impl Handler) -> &mut Self {
        self.register(Some(Verb::Patch), path, handler)
    }

    /// Registers a DELETE route.
    pub fn delete(&mut self, path: &str, handler: impl Handler) -> &mut Self {
        self.register(Some(Verb::Delete), path, handler)
    }

    /// Registers middleware under a path prefix.
    pub fn mount(&mut self, path: &str, handler: impl Handler) -> &mut Self {
        self.register(None, path, handler)
    }

    /// Returns the number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Processes one raw inbound message.
    ///
    /// This is the sole entry point for inbound traffic. The message is
    /// parsed into a request (failures finalize a 400), then the table is
    /// scanned in registration order. Each structurally-matching entry gets
    /// its captured params and the parsed query attached to the request
    /// before its handler runs; a handler error finalizes a 500 carrying the
    /// error's message; an exhausted table finalizes a 404.
    ///
    /// Every terminal state invokes `callback` exactly once, except the
    /// caller-contract violation where a terminal handler neither sends nor
    /// calls `next`, in which case the unsent response is returned and the
    /// callback never fires.
    pub async fn receive<F>(&self, raw: Value, callback: F) -> Response
    where
        F: FnOnce(ResponsePayload) + Send + 'static,
    {
        let dispatch_id = Uuid::now_v7();
        let mut response = Response::bound(callback);

        let mut request = match Request::parse(&raw) {
            Ok(request) => request,
            Err(error) => {
                debug!(%dispatch_id, %error, "rejecting unparseable message");
                finalize(
                    &mut response,
                    error.title(),
                    error.status_code(),
                    error.message(),
                );
                return response;
            }
        };

        debug!(
            %dispatch_id,
            method = %request.method(),
            path = request.path(),
            "dispatch started"
        );

        for (index, entry) in self.entries.iter().enumerate() {
            if !entry.accepts(request.method()) {
                continue;
            }
            let Some(params) = entry.matches(request.route_path()) else {
                continue;
            };

            request.attach_params(params);
            request.capture_query();

            debug!(
                %dispatch_id,
                entry = index,
                pattern = entry.pattern.as_str(),
                "entry matched"
            );

            let next = Next::new();
            if let Err(error) = entry.handler.call(&request, &mut response, &next).await {
                warn!(%dispatch_id, entry = index, %error, "handler failed");
                finalize(
                    &mut response,
                    "Internal Error",
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error.message(),
                );
                return response;
            }

            if response.is_sent() {
                debug!(%dispatch_id, entry = index, "response finalized by handler");
                return response;
            }
            if !next.was_called() {
                warn!(
                    %dispatch_id,
                    entry = index,
                    pattern = entry.pattern.as_str(),
                    "terminal handler returned without finalizing"
                );
                return response;
            }
            // Middleware passed control onward; resume the scan.
        }

        debug!(%dispatch_id, path = request.path(), "no entry matched");
        finalize(
            &mut response,
            "Not Found",
            StatusCode::NOT_FOUND,
            NOT_FOUND_DETAIL,
        );
        response
    }
}

/// Finalizes an error response, tolerating the already-sent race.
fn finalize(response: &mut Response, title: &str, status: StatusCode, detail: &str) {
    response.error(title, status, detail);
    if let Err(error) = response.send() {
        warn!(%error, "response was already finalized");
    }
}
