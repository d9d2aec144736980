// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-connection session handles.
//!
//! Each WebSocket connection owns one bounded frame buffer. A single
//! forwarder task drains the buffer onto the socket, which keeps frame
//! order serial per session.

use std::fmt;

use tokio::sync::mpsc;
use uuid::Uuid;

/// Frames buffered per session before writes start failing.
pub const SESSION_BUFFER: usize = 64;

/// Why a session write was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionWriteError {
    /// The session's frame buffer is full.
    BufferFull,
    /// The session's forwarder task has gone away.
    Closed,
}

impl fmt::Display for SessionWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferFull => f.write_str("session buffer is full"),
            Self::Closed => f.write_str("session is closed"),
        }
    }
}

impl std::error::Error for SessionWriteError {}

/// Sender half of one session's frame buffer, kept in the registry.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    pub id: Uuid,
    pub user_id: Uuid,
    tx: mpsc::Sender<String>,
}

impl SessionHandle {
    /// Create a handle and the receiver its forwarder task drains.
    pub fn new(user_id: Uuid) -> (Self, mpsc::Receiver<String>) {
        Self::with_capacity(user_id, SESSION_BUFFER)
    }

    pub fn with_capacity(user_id: Uuid, capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(capacity);
        (
            Self {
                id: Uuid::new_v4(),
                user_id,
                tx,
            },
            rx,
        )
    }

    /// Queue one text frame without blocking.
    ///
    /// The streamer must never stall on a slow session, so a full buffer
    /// is an error rather than a wait.
    pub fn try_write(&self, frame: String) -> Result<(), SessionWriteError> {
        self.tx.try_send(frame).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SessionWriteError::BufferFull,
            mpsc::error::TrySendError::Closed(_) => SessionWriteError::Closed,
        })
    }
}
