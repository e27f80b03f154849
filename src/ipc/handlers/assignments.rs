use crate::api::{self, Transport};
use crate::error::ApiError;
use crate::ipc::error::{api_failure, err, forbidden, not_authenticated, ok_view, validation};
use crate::ipc::types::{AppState, Request};
use crate::model::{Assignment, Course, Role, Submission, User};
use crate::roles;
use crate::validate::AssignmentForm;
use crate::view;
use chrono::Utc;

/// Students see their own submission state on every card, so the list fetch
/// fans out one lookup per assignment. Missing submissions come back as None
/// and are simply skipped.
async fn load_student(
    api: &dyn Transport,
    token: &str,
    user: &User,
) -> Result<(Vec<Assignment>, Vec<Submission>), ApiError> {
    let assignments = api::assignments::for_student(api, token, &user.id).await?;
    let lookups = assignments
        .iter()
        .map(|a| api::assignments::my_submission(api, token, a.id, &user.id));
    let mut submissions = Vec::new();
    for result in futures::future::join_all(lookups).await {
        if let Some(submission) = result? {
            submissions.push(submission);
        }
    }
    Ok((assignments, submissions))
}

async fn load_lecturer(
    api: &dyn Transport,
    token: &str,
    user: &User,
) -> Result<(Vec<Assignment>, Vec<Course>), ApiError> {
    let (assignments, courses) = tokio::try_join!(
        api::assignments::for_lecturer(api, token, &user.id),
        api::courses::list(api, token),
    )?;
    let owned: Vec<Course> = courses
        .iter()
        .filter(|c| c.owned_by(&user.id))
        .cloned()
        .collect();
    let courses = if owned.is_empty() {
        tracing::warn!(lecturer = %user.id, "no courses matched lecturer ownership, using full list");
        courses
    } else {
        owned
    };
    Ok((assignments, courses))
}

async fn load_page(
    api: &dyn Transport,
    token: &str,
    user: &User,
    search: Option<&str>,
    filter: Option<&str>,
) -> Result<view::AssignmentsPage, ApiError> {
    let now = Utc::now();
    if user.role == Role::Student {
        let (assignments, submissions) = load_student(api, token, user).await?;
        Ok(view::assignments_page(
            user,
            &assignments,
            &submissions,
            &[],
            search,
            filter,
            now,
        ))
    } else {
        let (assignments, courses) = load_lecturer(api, token, user).await?;
        Ok(view::assignments_page(
            user,
            &assignments,
            &[],
            &courses,
            search,
            filter,
            now,
        ))
    }
}

async fn reload(id: &str, api: &dyn Transport, token: &str, user: &User) -> serde_json::Value {
    match load_page(api, token, user, None, None).await {
        Ok(page) => ok_view(id, &page),
        Err(e) => api_failure(id, &e),
    }
}

async fn handle_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return not_authenticated(&req.id);
    };
    let caps = roles::capabilities(session.user.role);
    if !caps.manage_assignments && !caps.submit_work {
        return forbidden(&req.id);
    }
    let api = state.api.clone();
    let token = session.token.clone();
    let user = session.user.clone();
    let search = req
        .params
        .get("search")
        .and_then(|v| v.as_str())
        .map(str::to_string);
    let filter = req
        .params
        .get("filter")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    match load_page(
        api.as_ref(),
        &token,
        &user,
        search.as_deref(),
        filter.as_deref(),
    )
    .await
    {
        Ok(page) => ok_view(&req.id, &page),
        Err(e) => api_failure(&req.id, &e),
    }
}

async fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return not_authenticated(&req.id);
    };
    if !roles::capabilities(session.user.role).manage_assignments {
        return forbidden(&req.id);
    }
    let form: AssignmentForm = match serde_json::from_value(req.params.clone()) {
        Ok(f) => f,
        Err(e) => return err(&req.id, "bad_params", e.to_string(), None),
    };
    let errors = form.validate();
    if !errors.is_empty() {
        return validation(&req.id, &errors);
    }

    let api = state.api.clone();
    let token = session.token.clone();
    let user = session.user.clone();
    if let Err(e) = api::assignments::create(api.as_ref(), &token, &form).await {
        return api_failure(&req.id, &e);
    }
    reload(&req.id, api.as_ref(), &token, &user).await
}

async fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return not_authenticated(&req.id);
    };
    if !roles::capabilities(session.user.role).manage_assignments {
        return forbidden(&req.id);
    }
    let Some(assignment_id) = req.params.get("assignmentId").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "missing assignmentId", None);
    };
    let form: AssignmentForm = match serde_json::from_value(req.params.clone()) {
        Ok(f) => f,
        Err(e) => return err(&req.id, "bad_params", e.to_string(), None),
    };
    let errors = form.validate();
    if !errors.is_empty() {
        return validation(&req.id, &errors);
    }

    let api = state.api.clone();
    let token = session.token.clone();
    let user = session.user.clone();
    if let Err(e) = api::assignments::update(api.as_ref(), &token, assignment_id, &form).await {
        return api_failure(&req.id, &e);
    }
    reload(&req.id, api.as_ref(), &token, &user).await
}

async fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return not_authenticated(&req.id);
    };
    if !roles::capabilities(session.user.role).manage_assignments {
        return forbidden(&req.id);
    }
    let Some(assignment_id) = req.params.get("assignmentId").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "missing assignmentId", None);
    };

    let api = state.api.clone();
    let token = session.token.clone();
    let user = session.user.clone();
    if let Err(e) = api::assignments::delete(api.as_ref(), &token, assignment_id).await {
        return api_failure(&req.id, &e);
    }
    reload(&req.id, api.as_ref(), &token, &user).await
}

pub async fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "assignments.open" => Some(handle_open(state, req).await),
        "assignments.create" => Some(handle_create(state, req).await),
        "assignments.update" => Some(handle_update(state, req).await),
        "assignments.delete" => Some(handle_delete(state, req).await),
        _ => None,
    }
}
