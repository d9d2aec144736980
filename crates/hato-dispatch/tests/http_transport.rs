// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP transport against a local listener.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use tokio::sync::Mutex;
use uuid::Uuid;

use hato_core::event::BotEventType;
use hato_core::types::EventLogResult;
use hato_dispatch::transport::{HttpTransport, Transport};
use hato_dispatch::EventLogWriter;
use hato_test_utils::{InMemoryEventLogStore, bot};

#[derive(Clone)]
struct Received {
    status: StatusCode,
    headers: Arc<Mutex<Option<HeaderMap>>>,
    bodies: Arc<Mutex<Vec<String>>>,
}

async fn webhook(State(state): State<Received>, headers: HeaderMap, body: String) -> StatusCode {
    *state.headers.lock().await = Some(headers);
    state.bodies.lock().await.push(body);
    state.status
}

async fn spawn_endpoint(status: StatusCode) -> (SocketAddr, Received) {
    let state = Received {
        status,
        headers: Arc::new(Mutex::new(None)),
        bodies: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/webhook", post(webhook))
        .with_state(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, state)
}

fn transport() -> (HttpTransport, Arc<InMemoryEventLogStore>) {
    let logs = Arc::new(InMemoryEventLogStore::new());
    let writer = Arc::new(EventLogWriter::new(logs.clone()));
    (HttpTransport::new(writer).unwrap(), logs)
}

#[tokio::test]
async fn accepted_event_logs_ok_with_204() {
    let (addr, received) = spawn_endpoint(StatusCode::NO_CONTENT).await;
    let (transport, logs) = transport();

    let b = bot()
        .post_url(format!("http://{addr}/webhook"))
        .verification_token("sesame")
        .build();
    let body = bytes::Bytes::from_static(br#"{"eventTime":"2026-08-06T09:30:00Z"}"#);
    let ok = transport.send(&b, BotEventType::Ping, body.clone()).await;
    assert!(ok);

    let records = logs.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].result, EventLogResult::Ok);
    assert_eq!(records[0].code, 204);
    assert_eq!(records[0].bot_id, b.id);
    assert_eq!(records[0].event, BotEventType::Ping);
    assert!(records[0].error.is_empty());
    assert!(records[0].latency > 0);

    let headers = received.headers.lock().await.clone().unwrap();
    assert_eq!(headers["X-TRAQ-BOT-EVENT"], "PING");
    assert_eq!(headers["X-TRAQ-BOT-TOKEN"], "sesame");
    assert_eq!(headers["User-Agent"], "traQ_Bot_Processor/1.0");
    assert_eq!(headers["Content-Type"], "application/json; charset=utf-8");
    let request_id = headers["X-TRAQ-BOT-REQUEST-ID"].to_str().unwrap();
    assert_eq!(
        Uuid::parse_str(request_id).unwrap(),
        records[0].request_id,
        "the header request id is the logged one"
    );

    assert_eq!(
        received.bodies.lock().await.as_slice(),
        &[String::from_utf8(body.to_vec()).unwrap()]
    );
}

#[tokio::test]
async fn non_204_success_status_is_ng() {
    let (addr, _received) = spawn_endpoint(StatusCode::OK).await;
    let (transport, logs) = transport();

    let b = bot().post_url(format!("http://{addr}/webhook")).build();
    let ok = transport
        .send(&b, BotEventType::Ping, bytes::Bytes::from_static(b"{}"))
        .await;
    assert!(!ok, "200 is not acceptance; only 204 is");

    let records = logs.records();
    assert_eq!(records[0].result, EventLogResult::Ng);
    assert_eq!(records[0].code, 200);
}

#[tokio::test]
async fn server_error_is_ng_with_the_status() {
    let (addr, _received) = spawn_endpoint(StatusCode::INTERNAL_SERVER_ERROR).await;
    let (transport, logs) = transport();

    let b = bot().post_url(format!("http://{addr}/webhook")).build();
    let ok = transport
        .send(&b, BotEventType::Ping, bytes::Bytes::from_static(b"{}"))
        .await;
    assert!(!ok);

    let records = logs.records();
    assert_eq!(records[0].result, EventLogResult::Ng);
    assert_eq!(records[0].code, 500);
}

#[tokio::test]
async fn redirects_are_not_followed() {
    let (addr, _received) = spawn_endpoint(StatusCode::SEE_OTHER).await;
    let (transport, logs) = transport();

    let b = bot().post_url(format!("http://{addr}/webhook")).build();
    let ok = transport
        .send(&b, BotEventType::Ping, bytes::Bytes::from_static(b"{}"))
        .await;
    assert!(!ok);

    let records = logs.records();
    assert_eq!(records[0].result, EventLogResult::Ng);
    assert_eq!(records[0].code, 303);
}

#[tokio::test]
async fn network_failure_is_ne_with_code_minus_one() {
    // Nothing listens here.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (transport, logs) = transport();
    let b = bot().post_url(format!("http://{addr}/webhook")).build();
    let ok = transport
        .send(&b, BotEventType::Ping, bytes::Bytes::from_static(b"{}"))
        .await;
    assert!(!ok);

    let records = logs.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].result, EventLogResult::Ne);
    assert_eq!(records[0].code, -1);
    assert!(!records[0].error.is_empty());
}
