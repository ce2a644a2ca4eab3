use std::sync::Arc;

use assistant_registry::{AssistantDescriptor, Registry};
use axum::http::header;
use axum::response::Response;
use uuid::Uuid;

use crate::AppState;
use crate::config::{PageConfig, PageFileConfig, SessionConfig, SessionFileConfig};
use crate::metrics::ServerMetrics;
use crate::session::SessionStore;

/// The two-assistant registry used throughout the handler tests.
pub fn test_registry() -> Registry {
    Registry::new(vec![
        AssistantDescriptor::new(
            "RFP Assessment",
            "https://hub.example.com/w/chat/rfp",
            "📋",
            "Analyze and evaluate RFP requirements",
        ),
        AssistantDescriptor::new(
            "Generate Proposal",
            "https://hub.example.com/w/chat/proposal",
            "📄",
            "Create comprehensive proposals",
        ),
    ])
    .expect("test registry")
}

/// Build a fully-wired `AppState` with default page and session settings.
pub fn test_app_state() -> AppState {
    let session_config = SessionConfig::from_file(&SessionFileConfig::default());
    AppState {
        registry: Arc::new(test_registry()),
        sessions: Arc::new(SessionStore::new(
            session_config.ttl,
            session_config.max_sessions,
        )),
        session_config: Arc::new(session_config),
        page: Arc::new(PageConfig::from_file(&PageFileConfig::default())),
        metrics: Arc::new(ServerMetrics::new()),
    }
}

/// `name=value` of the session cookie set by a response, if any.
pub fn session_cookie_header(resp: &Response) -> Option<String> {
    resp.headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub fn session_id_from_cookie(cookie: &str) -> Uuid {
    let (_, value) = cookie.split_once('=').expect("name=value cookie");
    Uuid::parse_str(value).expect("session id")
}
