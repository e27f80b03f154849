use crate::api;
use crate::ipc::error::{api_failure, err, forbidden, not_authenticated, ok_view};
use crate::ipc::types::{AppState, Request};
use crate::roles;
use crate::view;

async fn handle_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return not_authenticated(&req.id);
    };
    if !roles::capabilities(session.user.role).view_own_grades {
        return forbidden(&req.id);
    }
    let course_id = match req.params.get("courseId") {
        None => None,
        Some(v) => match v.as_i64() {
            Some(id) => Some(id),
            None => return err(&req.id, "bad_params", "courseId must be a number", None),
        },
    };

    let api = state.api.clone();
    let token = session.token.clone();
    let user = session.user.clone();
    let grades = match course_id {
        Some(course_id) => {
            api::assignments::course_grades(api.as_ref(), &token, course_id, &user.id)
                .await
                .map(|g| vec![g])
        }
        None => api::assignments::student_grades(api.as_ref(), &token, &user.id).await,
    };
    match grades {
        Ok(grades) => ok_view(&req.id, &view::grades_page(&grades)),
        Err(e) => api_failure(&req.id, &e),
    }
}

pub async fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grades.open" => Some(handle_open(state, req).await),
        _ => None,
    }
}
