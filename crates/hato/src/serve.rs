// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hato serve` command implementation.
//!
//! Wires the full dispatch stack: configuration, tracing, the Prometheus
//! recorder, SQLite event log storage, seeded domain stores, the WebSocket
//! streamer, the event bus, and the dispatch service. An axum server
//! exposes `/metrics` and the bot WebSocket endpoint. Shutdown is ordered:
//! drain handlers, close sessions, checkpoint storage.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::{StatusCode, header::AUTHORIZATION};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use hato_bus::EventBus;
use hato_config::HatoConfig;
use hato_core::traits::bot_store::{BotStore, BotsQuery};
use hato_core::traits::streamer::EventStreamer;
use hato_core::HatoError;
use hato_dispatch::{
    BotEventService, DispatchContext, Dispatcher, EventLogWriter, HandlerRegistry, PurgeSettings,
};
use hato_prometheus::PrometheusRecorder;
use hato_storage::SqliteEventLogStore;
use hato_streamer::Streamer;
use hato_streamer::handler::{BotUserId, ws_handler};

use crate::seed;
use crate::shutdown;

/// How long shutdown waits for in-flight deliveries.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs the `hato serve` command.
pub async fn run_serve(config: HatoConfig) -> Result<(), HatoError> {
    init_tracing(&config.service.log_level);
    info!("starting hato serve");

    let recorder =
        Arc::new(PrometheusRecorder::install().map_err(HatoError::Internal)?);

    // Event log storage.
    let log_store = Arc::new(SqliteEventLogStore::new(config.storage.clone()));
    log_store.initialize().await?;

    // Domain projections.
    let stores = seed::load(config.service.seed_file.as_deref())?;

    // Streamer and dispatcher.
    let streamer = Arc::new(Streamer::new());
    let writer = Arc::new(EventLogWriter::new(log_store.clone()));
    let dispatcher = Arc::new(Dispatcher::new(writer, streamer.clone())?);

    let ctx = Arc::new(DispatchContext::new(
        stores.bots.clone(),
        stores.channels,
        stores.users,
        stores.tags,
        dispatcher,
    ));

    let bus = Arc::new(EventBus::new());
    let service = BotEventService::new(
        bus.clone(),
        ctx,
        HandlerRegistry::with_defaults(),
        log_store.clone(),
        purge_settings(&config),
    );
    service.start().await;

    let cancel = shutdown::install_signal_handler();

    // HTTP surface: metrics and the bot WebSocket endpoint.
    let server = if config.streamer.enabled {
        let ws_routes = Router::new()
            .route("/api/bot-ws", get(ws_handler))
            .layer(middleware::from_fn_with_state(
                stores.bots.clone(),
                authenticate_bot,
            ))
            .with_state(streamer.clone());
        let metrics_routes = Router::new()
            .route("/metrics", get(render_metrics))
            .with_state(recorder.clone());
        let app = Router::new()
            .merge(ws_routes)
            .merge(metrics_routes)
            .layer(TraceLayer::new_for_http());

        let listener = tokio::net::TcpListener::bind(&config.streamer.bind_addr)
            .await
            .map_err(|e| HatoError::Config(format!(
                "cannot bind {}: {e}",
                config.streamer.bind_addr
            )))?;
        info!(addr = %config.streamer.bind_addr, "http server listening");

        let server_cancel = cancel.clone();
        Some(tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move { server_cancel.cancelled().await })
                .await;
            if let Err(e) = result {
                warn!(error = %e, "http server exited with error");
            }
        }))
    } else {
        None
    };

    cancel.cancelled().await;
    info!("shutting down");

    service.shutdown(DRAIN_TIMEOUT).await?;
    streamer.close().await;
    if let Some(server) = server {
        let _ = server.await;
    }
    log_store.close().await?;

    info!("hato serve stopped");
    Ok(())
}

fn purge_settings(config: &HatoConfig) -> PurgeSettings {
    PurgeSettings {
        retention: Duration::from_secs(u64::from(config.log.retention_days) * 24 * 60 * 60),
        period_floor: Duration::from_secs(
            u64::from(config.log.purge_jitter_floor_hours) * 60 * 60,
        ),
        period_base: Duration::from_secs(u64::from(config.log.purge_base_hours) * 60 * 60),
    }
}

async fn render_metrics(State(recorder): State<Arc<PrometheusRecorder>>) -> String {
    recorder.render()
}

/// Resolve the connecting bot from its verification token.
///
/// `Authorization: Bearer <verification_token>` identifies the bot; its
/// synthetic user id is handed to the WebSocket handler as an extension.
async fn authenticate_bot(
    State(bots): State<Arc<dyn BotStore>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned);

    let Some(token) = token else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    let known = match bots.bots(BotsQuery::default().active()).await {
        Ok(known) => known,
        Err(e) => {
            warn!(error = %e, "bot lookup failed during websocket auth");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    let Some(bot) = known.into_iter().find(|b| b.verification_token == token) else {
        return StatusCode::FORBIDDEN.into_response();
    };

    request.extensions_mut().insert(BotUserId(bot.bot_user_id));
    next.run(request).await
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hato={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
