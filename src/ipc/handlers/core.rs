use crate::api::HttpTransport;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::session;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "apiUrl": state.config.api_url,
            "authenticated": state.session.is_some()
        }),
    )
}

/// Repoints the API base url and/or the state dir. Changing the state dir
/// reloads whatever session is persisted there, so a shell can switch
/// profiles without restarting the sidecar.
fn handle_configure(state: &mut AppState, req: &Request) -> serde_json::Value {
    let api_url = req.params.get("apiUrl").and_then(|v| v.as_str());
    let state_dir = req
        .params
        .get("stateDir")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);

    if let Some(url) = api_url {
        let transport = match HttpTransport::new(url) {
            Ok(t) => t,
            Err(e) => return err(&req.id, "bad_params", format!("{e:#}"), None),
        };
        state.api = Arc::new(transport);
        state.config.api_url = url.to_string();
    }

    if let Some(dir) = state_dir {
        state.config.state_dir = dir;
        state.session = match session::load(&state.config.state_dir) {
            Ok(s) => s,
            Err(e) => return err(&req.id, "io_error", format!("{e:#}"), None),
        };
    }

    ok(
        &req.id,
        json!({
            "apiUrl": state.config.api_url,
            "stateDir": state.config.state_dir.to_string_lossy(),
            "authenticated": state.session.is_some()
        }),
    )
}

pub async fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "configure" => Some(handle_configure(state, req)),
        _ => None,
    }
}
