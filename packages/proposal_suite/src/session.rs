//! Per-session selection state, keyed by a random cookie id.
//!
//! Each entry is owned by exactly one browser session. The store only
//! threads a session's `SelectionState` through the pure controller
//! operations and remembers the result.

use assistant_registry::{Registry, SelectError, SelectionState};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::config::SessionConfig;

/// Result of initializing a session for one request.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    pub id: Uuid,
    pub selection: SelectionState,
    /// True when no live session matched and a new one was started.
    pub created: bool,
    /// Sessions dropped to make room for this one.
    pub evicted: usize,
}

#[derive(Debug)]
struct SessionEntry {
    selection: SelectionState,
    last_seen: Instant,
    /// Store-wide touch counter at the last access; orders eviction.
    touched: u64,
}

#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
    ttl: Option<Duration>,
    /// Upper bound on live sessions. `None` is unbounded.
    capacity: Option<usize>,
    touches: AtomicU64,
}

impl SessionStore {
    pub fn new(ttl: Option<Duration>, capacity: Option<usize>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
            capacity,
            touches: AtomicU64::new(0),
        }
    }

    fn touch(&self) -> u64 {
        self.touches.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Evict least recently seen sessions until one more fits. Returns how
    /// many were evicted.
    fn make_room(&self, sessions: &mut HashMap<Uuid, SessionEntry>) -> usize {
        let mut evicted = 0;
        if let Some(capacity) = self.capacity {
            while sessions.len() >= capacity.max(1) {
                let Some(oldest) = sessions
                    .iter()
                    .min_by_key(|(_, entry)| entry.touched)
                    .map(|(id, _)| *id)
                else {
                    break;
                };
                sessions.remove(&oldest);
                debug!(session = %oldest, "Evicting least recently seen session");
                evicted += 1;
            }
        }
        evicted
    }

    /// Initialize the session named by `requested`, or start a new one when
    /// it is missing, unknown or expired.
    pub async fn initialize(&self, registry: &Registry, requested: Option<Uuid>) -> SessionHandle {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().await;

        if let Some(id) = requested {
            if let Some(entry) = sessions
                .get_mut(&id)
                .filter(|entry| !is_expired(self.ttl, entry, now))
            {
                entry.selection =
                    SelectionState::initialize(registry, Some(entry.selection.clone()));
                entry.last_seen = now;
                entry.touched = self.touch();
                return SessionHandle {
                    id,
                    selection: entry.selection.clone(),
                    created: false,
                    evicted: 0,
                };
            }
            if sessions.remove(&id).is_some() {
                debug!(session = %id, "Dropping expired session");
            }
        }

        let id = Uuid::new_v4();
        let selection = SelectionState::initialize(registry, None);
        let evicted = self.make_room(&mut sessions);
        sessions.insert(
            id,
            SessionEntry {
                selection: selection.clone(),
                last_seen: now,
                touched: self.touch(),
            },
        );
        SessionHandle {
            id,
            selection,
            created: true,
            evicted,
        }
    }

    /// Apply a select to the session's stored state. On rejection the stored
    /// state is left as it was.
    pub async fn select(
        &self,
        registry: &Registry,
        id: Uuid,
        name: &str,
    ) -> Result<SelectionState, SelectError> {
        let now = Instant::now();
        let touched = self.touch();
        let mut sessions = self.sessions.lock().await;
        if !sessions.contains_key(&id) {
            // Evicted or swept since the request's initialize.
            self.make_room(&mut sessions);
        }
        let entry = sessions.entry(id).or_insert_with(|| SessionEntry {
            selection: SelectionState::initial(registry),
            last_seen: now,
            touched,
        });
        entry.last_seen = now;
        entry.touched = touched;

        let next = entry.selection.select(registry, name)?;
        entry.selection = next.clone();
        Ok(next)
    }

    pub async fn current(&self, id: Uuid) -> Option<SelectionState> {
        self.sessions
            .lock()
            .await
            .get(&id)
            .map(|entry| entry.selection.clone())
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Drop sessions idle for longer than the TTL as of `now`.
    pub async fn purge_expired_at(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !is_expired(self.ttl, entry, now));
        before - sessions.len()
    }
}

fn is_expired(ttl: Option<Duration>, entry: &SessionEntry, now: Instant) -> bool {
    ttl.is_some_and(|ttl| now.saturating_duration_since(entry.last_seen) > ttl)
}

/// Session id carried by the request, if it parses.
pub fn session_id(jar: &CookieJar, config: &SessionConfig) -> Option<Uuid> {
    jar.get(&config.cookie_name)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

/// Browser-session cookie holding `id`.
pub fn session_cookie(config: &SessionConfig, id: Uuid) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .build()
}
