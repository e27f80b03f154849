use crate::ipc::error::{not_authenticated, ok_view};
use crate::ipc::types::{AppState, Request};
use crate::view;

/// The dashboard is shaped entirely from the session; no API reads.
fn handle_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return not_authenticated(&req.id);
    };
    ok_view(&req.id, &view::dashboard_page(&session.user))
}

pub async fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "dashboard.open" => Some(handle_open(state, req)),
        _ => None,
    }
}
