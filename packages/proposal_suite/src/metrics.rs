//! Server metrics for observability
//!
//! Counters are process-wide; selection state itself never lives here.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Server-wide metrics
#[derive(Debug, Default)]
pub struct ServerMetrics {
    // Session metrics
    /// Sessions created since server start
    pub sessions_created: AtomicU64,
    /// Sessions dropped by the idle sweep
    pub sessions_expired: AtomicU64,
    /// Sessions dropped to stay under the session cap
    pub sessions_dropped: AtomicU64,

    // Page metrics
    /// Full page renders
    pub pages_rendered: AtomicU64,

    // Selection metrics
    /// Select requests that changed (or confirmed) a session's assistant
    pub selections_accepted: AtomicU64,
    /// Select requests naming an unknown assistant
    pub selections_rejected: AtomicU64,

    /// Server start time (for uptime calculation)
    start_time: Option<Instant>,
}

impl ServerMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    pub fn session_created(&self) {
        self.sessions_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn sessions_swept(&self, count: usize) {
        self.sessions_expired
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn sessions_evicted(&self, count: usize) {
        self.sessions_dropped
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn page_rendered(&self) {
        self.pages_rendered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn selection_accepted(&self) {
        self.selections_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn selection_rejected(&self) {
        self.selections_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.map_or(0, |t| t.elapsed().as_secs())
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sessions: SessionMetrics {
                created: self.sessions_created.load(Ordering::Relaxed),
                expired: self.sessions_expired.load(Ordering::Relaxed),
                evicted: self.sessions_dropped.load(Ordering::Relaxed),
            },
            pages_rendered: self.pages_rendered.load(Ordering::Relaxed),
            selections: SelectionMetrics {
                accepted: self.selections_accepted.load(Ordering::Relaxed),
                rejected: self.selections_rejected.load(Ordering::Relaxed),
            },
            uptime_secs: self.uptime_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub sessions: SessionMetrics,
    pub pages_rendered: u64,
    pub selections: SelectionMetrics,
    pub uptime_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub created: u64,
    pub expired: u64,
    pub evicted: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionMetrics {
    pub accepted: u64,
    pub rejected: u64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub assistants: usize,
    pub active_sessions: usize,
    pub uptime_secs: u64,
}
