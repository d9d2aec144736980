// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics-rs facade so any recorder (Prometheus, statsd, etc.)
//! can collect these metrics.

use metrics::{describe_counter, describe_gauge, describe_histogram};
use uuid::Uuid;

/// Register all Hato metric descriptions.
///
/// Called once at startup after the recorder is installed.
pub fn register_metrics() {
    describe_counter!(
        "hato_bot_event_send_count_total",
        "Total bot event delivery attempts by bot and outcome"
    );
    describe_gauge!(
        "hato_bot_ws_connected_sessions",
        "Currently connected bot WebSocket sessions"
    );
    describe_histogram!(
        "hato_bot_event_delivery_latency_seconds",
        "Bot event delivery latency in seconds"
    );
}

/// Record one delivery attempt outcome.
///
/// `status` is the counter label of the event log result; dropped
/// WebSocket writes arrive here already mapped to "ok".
pub fn record_event_send(bot_id: Uuid, status: &'static str) {
    metrics::counter!(
        "hato_bot_event_send_count_total",
        "bot_id" => bot_id.to_string(),
        "status" => status
    )
    .increment(1);
}

/// Set the number of connected bot WebSocket sessions.
pub fn set_connected_sessions(count: f64) {
    metrics::gauge!("hato_bot_ws_connected_sessions").set(count);
}

/// Record the wall-clock latency of one delivery attempt.
pub fn record_delivery_latency(seconds: f64) {
    metrics::histogram!("hato_bot_event_delivery_latency_seconds").record(seconds);
}
