use crate::api;
use crate::ipc::error::{api_failure, err, ok, validation};
use crate::ipc::types::{AppState, Request};
use crate::model::Role;
use crate::session::{self, Session};
use crate::validate::RegisterForm;
use crate::view;
use serde_json::json;

/// Startup probe. A persisted token is only trusted after the profile fetch
/// succeeds; any failure clears it and reports anonymous, so a stale token
/// can never wedge the shell at the login screen.
async fn handle_session(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(current) = state.session.as_ref() else {
        return ok(&req.id, json!({ "authenticated": false }));
    };

    let api = state.api.clone();
    let token = current.token.clone();
    match api::auth::profile(api.as_ref(), &token).await {
        Ok(user) => {
            if let Some(session) = state.session.as_mut() {
                session.user = user.clone();
                let _ = session::save(&state.config.state_dir, session);
            }
            ok(
                &req.id,
                json!({ "authenticated": true, "user": view::user_view(&user) }),
            )
        }
        Err(e) => {
            tracing::info!(error = %e, "session probe failed, clearing stored session");
            state.session = None;
            if let Err(e) = session::clear(&state.config.state_dir) {
                tracing::warn!(error = format!("{e:#}"), "failed to remove session file");
            }
            ok(&req.id, json!({ "authenticated": false }))
        }
    }
}

fn establish(state: &mut AppState, req: &Request, auth: api::auth::AuthResponse) -> serde_json::Value {
    let session = Session::new(auth.token, auth.user);
    if let Err(e) = session::save(&state.config.state_dir, &session) {
        return err(&req.id, "io_error", format!("{e:#}"), None);
    }
    tracing::info!(
        token = %session.token_fingerprint(),
        role = session.user.role.as_str(),
        "session established"
    );
    let user = view::user_view(&session.user);
    state.session = Some(session);
    ok(&req.id, json!({ "user": user, "redirect": "/dashboard" }))
}

async fn handle_login(state: &mut AppState, req: &Request) -> serde_json::Value {
    let email = match req.params.get("email").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing email", None),
    };
    let password = match req.params.get("password").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing password", None),
    };

    let api = state.api.clone();
    let auth = match api::auth::login(api.as_ref(), &email, &password).await {
        Ok(v) => v,
        Err(e) => return api_failure(&req.id, &e),
    };
    establish(state, req, auth)
}

async fn handle_register(state: &mut AppState, req: &Request) -> serde_json::Value {
    let form: RegisterForm = match serde_json::from_value(req.params.clone()) {
        Ok(f) => f,
        Err(e) => return err(&req.id, "bad_params", e.to_string(), None),
    };
    let errors = form.validate();
    if !errors.is_empty() {
        return validation(&req.id, &errors);
    }
    let Some(role) = Role::parse(&form.role) else {
        return err(&req.id, "bad_params", "unknown role", None);
    };

    let api = state.api.clone();
    let registration = api::auth::Registration {
        email: &form.email,
        password: &form.password,
        role,
        first_name: &form.first_name,
        last_name: &form.last_name,
    };
    let auth = match api::auth::register(api.as_ref(), &registration).await {
        Ok(v) => v,
        Err(e) => return api_failure(&req.id, &e),
    };
    establish(state, req, auth)
}

/// Client-side only: the token is forgotten and the file removed. No server
/// call is made.
fn handle_logout(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Some(session) = state.session.take() {
        tracing::info!(token = %session.token_fingerprint(), "signed out");
    }
    if let Err(e) = session::clear(&state.config.state_dir) {
        tracing::warn!(error = format!("{e:#}"), "failed to remove session file");
    }
    ok(&req.id, json!({ "redirect": "/login" }))
}

pub async fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "auth.session" => Some(handle_session(state, req).await),
        "auth.login" => Some(handle_login(state, req).await),
        "auth.register" => Some(handle_register(state, req).await),
        "auth.logout" => Some(handle_logout(state, req)),
        _ => None,
    }
}
