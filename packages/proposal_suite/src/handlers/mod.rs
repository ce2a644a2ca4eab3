pub mod health;
pub mod selection;

pub use health::{health_handler, health_live_handler, metrics_handler};
pub use selection::{get_selection, list_assistants, post_selection};

use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use crate::AppState;
use crate::session::{self, SessionHandle};

/// Initialize the caller's session, attaching a cookie when a new one starts.
pub(crate) async fn open_session(state: &AppState, jar: CookieJar) -> (CookieJar, SessionHandle) {
    let requested = session::session_id(&jar, &state.session_config);
    let handle = state.sessions.initialize(&state.registry, requested).await;

    if !handle.created {
        return (jar, handle);
    }

    state.metrics.session_created();
    if handle.evicted > 0 {
        state.metrics.sessions_evicted(handle.evicted);
    }
    info!(
        session = %handle.id,
        selected = handle.selection.selected(),
        "Started session"
    );
    let jar = jar.add(session::session_cookie(&state.session_config, handle.id));
    (jar, handle)
}
