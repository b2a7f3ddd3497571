//! End-to-end tests: a dispatch table served behind an in-memory duplex
//! channel, exercised through the client over both controller variants.

use hermes::client::BoxFuture;
use hermes::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

fn stamp_pipeline<'a>(
    _req: &'a Request,
    res: &'a mut Response,
    next: &'a Next,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        res.set("x-pipeline", "seen");
        next.proceed();
        Ok(())
    })
}

fn get_apple<'a>(req: &'a Request, res: &'a mut Response, _next: &'a Next) -> HandlerFuture<'a> {
    Box::pin(async move {
        let id = req.param("id").unwrap_or_default().to_string();
        res.data("Apple", id, json!({ "flavor": "sweet" })).send()?;
        Ok(())
    })
}

fn create_apple<'a>(
    req: &'a Request,
    res: &'a mut Response,
    _next: &'a Next,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let body = req.body().cloned().unwrap_or(Value::Null);
        res.status(http::StatusCode::CREATED)
            .send_with(json!({ "created": body }))?;
        Ok(())
    })
}

fn echo_query<'a>(req: &'a Request, res: &'a mut Response, _next: &'a Next) -> HandlerFuture<'a> {
    Box::pin(async move {
        let query = serde_json::to_value(req.query()).expect("query serializes");
        res.json(query)?;
        Ok(())
    })
}

fn failing<'a>(_req: &'a Request, _res: &'a mut Response, _next: &'a Next) -> HandlerFuture<'a> {
    Box::pin(async move { Err(HermesError::handler("the orchard is on fire")) })
}

fn build_app() -> Arc<App> {
    let mut app = App::new();
    app.mount("/apples", stamp_pipeline)
        .get("/apples/:id", get_apple)
        .post("/apples", create_apple)
        .get("/search", echo_query)
        .get("/fail", failing);
    Arc::new(app)
}

/// In-memory duplex channel posing as a correlated request/reply session:
/// each exchange gets its own reply stream, fed by the serving side's
/// completion callback.
struct LoopbackSession {
    app: Arc<App>,
}

impl RequestSession for LoopbackSession {
    fn request(&self, message: Value) -> BoxFuture<'_, ClientResult<mpsc::Receiver<Value>>> {
        let app = Arc::clone(&self.app);
        Box::pin(async move {
            let (tx, rx) = mpsc::channel(1);
            tokio::spawn(async move {
                app.receive(message, move |payload| {
                    let payload = serde_json::to_value(payload).expect("payload serializes");
                    let _ = tx.try_send(json!({ "payload": payload }));
                })
                .await;
            });
            Ok(rx)
        })
    }
}

/// The same dispatch table behind an acknowledgment-style primitive: the
/// send resolves once the serving side's callback produces the reply.
struct LoopbackAck {
    app: Arc<App>,
}

impl AckTransport for LoopbackAck {
    fn send(&self, message: Value) -> BoxFuture<'_, ClientResult<Value>> {
        let app = Arc::clone(&self.app);
        Box::pin(async move {
            let (tx, rx) = oneshot::channel();
            app.receive(message, move |payload| {
                let _ = tx.send(serde_json::to_value(payload).expect("payload serializes"));
            })
            .await;
            rx.await
                .map_err(|_| ClientError::closed("no acknowledgment produced"))
        })
    }
}

fn session_client() -> Client<SessionController<LoopbackSession>> {
    Client::new(SessionController::new(LoopbackSession { app: build_app() }))
}

#[tokio::test]
async fn get_round_trips_through_the_session_transport() {
    init_tracing();
    let client = session_client();

    let payload = client.get("/apples/3444").await.expect("round trip");

    assert_eq!(payload.status, 200);
    assert_eq!(
        payload.data,
        Some(json!([{
            "type": "Apple",
            "id": "3444",
            "attributes": { "flavor": "sweet" },
        }]))
    );
    // The middleware ran first and its mutation survived to the wire.
    assert_eq!(payload.headers.get("x-pipeline"), Some("seen"));
    assert_eq!(payload.headers.get("content-type"), Some("application/json"));
}

#[tokio::test]
async fn post_carries_the_body_both_ways() {
    init_tracing();
    let client = session_client();

    let payload = client
        .post("/apples", json!({ "flavor": "tart" }))
        .await
        .expect("round trip");

    assert_eq!(payload.status, 201);
    assert_eq!(payload.data, Some(json!({ "created": { "flavor": "tart" } })));
}

#[tokio::test]
async fn query_suffix_reaches_the_handler() {
    init_tracing();
    let client = session_client();

    let payload = client.get("/search?limit=15").await.expect("round trip");
    assert_eq!(payload.data, Some(json!({ "limit": "15" })));

    let payload = client.get("/search").await.expect("round trip");
    assert_eq!(payload.data, Some(json!({})));
}

#[tokio::test]
async fn routing_failures_resolve_as_payloads_not_rejections() {
    init_tracing();
    let client = session_client();

    let payload = client.get("/nowhere").await.expect("still a clean reply");
    assert_eq!(payload.status, 404);
    let errors = payload.errors.expect("error envelope");
    assert_eq!(errors[0].title, "Not Found");
}

#[tokio::test]
async fn handler_failures_arrive_as_500_payloads() {
    init_tracing();
    let client = session_client();

    let payload = client.get("/fail").await.expect("still a clean reply");
    assert_eq!(payload.status, 500);
    let errors = payload.errors.expect("error envelope");
    assert_eq!(errors[0].title, "Internal Error");
    assert_eq!(errors[0].detail, "the orchard is on fire");
}

#[tokio::test]
async fn the_same_table_serves_the_ack_transport() {
    init_tracing();
    let client = Client::new(AckController::new(LoopbackAck { app: build_app() }));

    let payload = client.get("/apples/77").await.expect("round trip");
    assert_eq!(payload.status, 200);
    assert_eq!(payload.data.unwrap()[0]["id"], json!("77"));

    let payload = client
        .delete("/apples/77")
        .await
        .expect("still a clean reply");
    assert_eq!(payload.status, 404);
}

#[tokio::test]
async fn concurrent_clients_share_one_table() {
    init_tracing();
    let app = build_app();
    let mut tasks = Vec::new();

    for id in 0..16 {
        let client = Client::new(SessionController::new(LoopbackSession {
            app: Arc::clone(&app),
        }));
        tasks.push(tokio::spawn(async move {
            let payload = client
                .get(&format!("/apples/{id}"))
                .await
                .expect("round trip");
            assert_eq!(payload.data.unwrap()[0]["id"], json!(id.to_string()));
        }));
    }

    for task in tasks {
        task.await.expect("client task panicked");
    }
}
