use crate::api;
use crate::ipc::error::{api_failure, err, forbidden, not_authenticated, ok_view};
use crate::ipc::types::{AppState, Request};
use crate::model::EnrollmentStatus;
use crate::roles;
use crate::view;

async fn handle_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return not_authenticated(&req.id);
    };
    if !roles::capabilities(session.user.role).review_enrollments {
        return forbidden(&req.id);
    }
    let filter = match req.params.get("status").and_then(|v| v.as_str()) {
        None | Some("all") => None,
        Some(s) => match EnrollmentStatus::parse(s) {
            Some(status) => Some(status),
            None => return err(&req.id, "bad_params", format!("unknown status: {s}"), None),
        },
    };

    let api = state.api.clone();
    let token = session.token.clone();
    match api::enrollments::list(api.as_ref(), &token).await {
        Ok(enrollments) => ok_view(&req.id, &view::enrollments_page(&enrollments, filter)),
        Err(e) => api_failure(&req.id, &e),
    }
}

async fn handle_set_status(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return not_authenticated(&req.id);
    };
    if !roles::capabilities(session.user.role).review_enrollments {
        return forbidden(&req.id);
    }
    let Some(enrollment_id) = req.params.get("enrollmentId").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "missing enrollmentId", None);
    };
    let status = match req.params.get("status").and_then(|v| v.as_str()) {
        Some(s) => match EnrollmentStatus::parse(s) {
            Some(EnrollmentStatus::Pending) | None => {
                return err(
                    &req.id,
                    "bad_params",
                    "status must be approved or rejected",
                    None,
                )
            }
            Some(status) => status,
        },
        None => return err(&req.id, "bad_params", "missing status", None),
    };

    let api = state.api.clone();
    let token = session.token.clone();
    if let Err(e) = api::enrollments::set_status(api.as_ref(), &token, enrollment_id, status).await
    {
        return api_failure(&req.id, &e);
    }
    match api::enrollments::list(api.as_ref(), &token).await {
        Ok(enrollments) => ok_view(&req.id, &view::enrollments_page(&enrollments, None)),
        Err(e) => api_failure(&req.id, &e),
    }
}

pub async fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "enrollments.open" => Some(handle_open(state, req).await),
        "enrollments.setStatus" => Some(handle_set_status(state, req).await),
        _ => None,
    }
}
