use crate::api::{self, Transport};
use crate::error::ApiError;
use crate::ipc::error::{api_failure, err, forbidden, not_authenticated, ok_view, validation};
use crate::ipc::types::{AppState, Request};
use crate::model::User;
use crate::roles;
use crate::validate;
use crate::view;
use chrono::Utc;
use std::path::PathBuf;

/// There is no single-assignment endpoint, so the page finds its assignment
/// in the student's own list. None means the id is not one of theirs.
async fn load_submit_page(
    api: &dyn Transport,
    token: &str,
    user: &User,
    assignment_id: i64,
) -> Result<Option<view::SubmitPage>, ApiError> {
    let (assignments, submission) = tokio::try_join!(
        api::assignments::for_student(api, token, &user.id),
        api::assignments::my_submission(api, token, assignment_id, &user.id),
    )?;
    let Some(assignment) = assignments.into_iter().find(|a| a.id == assignment_id) else {
        return Ok(None);
    };
    Ok(Some(view::submit_page(
        &assignment,
        submission.as_ref(),
        Utc::now(),
    )))
}

async fn submit_page(
    id: &str,
    api: &dyn Transport,
    token: &str,
    user: &User,
    assignment_id: i64,
) -> serde_json::Value {
    match load_submit_page(api, token, user, assignment_id).await {
        Ok(Some(page)) => ok_view(id, &page),
        Ok(None) => err(id, "api_error", "Assignment not found", None),
        Err(e) => api_failure(id, &e),
    }
}

async fn review_page(
    id: &str,
    api: &dyn Transport,
    token: &str,
    user: &User,
    assignment_id: i64,
) -> serde_json::Value {
    let loaded = tokio::try_join!(
        api::assignments::for_lecturer(api, token, &user.id),
        api::assignments::submissions_for(api, token, assignment_id),
    );
    let (assignments, submissions) = match loaded {
        Ok(pair) => pair,
        Err(e) => return api_failure(id, &e),
    };
    // Placeholder title keeps the page rendering when the assignment is not
    // in the lecturer's list.
    let title = assignments
        .into_iter()
        .find(|a| a.id == assignment_id)
        .map(|a| a.title)
        .unwrap_or_else(|| "Assignment".to_string());
    ok_view(id, &view::submissions_page(&title, &submissions))
}

async fn handle_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return not_authenticated(&req.id);
    };
    if !roles::capabilities(session.user.role).submit_work {
        return forbidden(&req.id);
    }
    let Some(assignment_id) = req.params.get("assignmentId").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "missing assignmentId", None);
    };

    let api = state.api.clone();
    let token = session.token.clone();
    let user = session.user.clone();
    submit_page(&req.id, api.as_ref(), &token, &user, assignment_id).await
}

async fn handle_submit(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return not_authenticated(&req.id);
    };
    if !roles::capabilities(session.user.role).submit_work {
        return forbidden(&req.id);
    }
    let Some(assignment_id) = req.params.get("assignmentId").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "missing assignmentId", None);
    };
    let text = req.params.get("text").and_then(|v| v.as_str());
    let file_path = req.params.get("filePath").and_then(|v| v.as_str());

    let errors = validate::submission_content(text, file_path.is_some());
    if !errors.is_empty() {
        return validation(&req.id, &errors);
    }
    let file = match file_path {
        Some(file_path) => {
            let path = PathBuf::from(file_path);
            let Some(file_name) = path
                .file_name()
                .and_then(|s| s.to_str())
                .map(str::to_string)
            else {
                return err(&req.id, "bad_params", "filePath has no file name", None);
            };
            let size = match std::fs::metadata(&path) {
                Ok(m) => m.len(),
                Err(e) => {
                    return err(
                        &req.id,
                        "io_error",
                        format!("failed to read {}: {e}", path.to_string_lossy()),
                        None,
                    )
                }
            };
            let errors = validate::check_file("file", &file_name, size, validate::SUBMISSION_TYPES);
            if !errors.is_empty() {
                return validation(&req.id, &errors);
            }
            let bytes = match std::fs::read(&path) {
                Ok(b) => b,
                Err(e) => {
                    return err(
                        &req.id,
                        "io_error",
                        format!("failed to read {}: {e}", path.to_string_lossy()),
                        None,
                    )
                }
            };
            Some((file_name, bytes))
        }
        None => None,
    };
    let text = text.map(str::trim).filter(|t| !t.is_empty());

    let api = state.api.clone();
    let token = session.token.clone();
    let user = session.user.clone();
    if let Err(e) =
        api::assignments::submit(api.as_ref(), &token, assignment_id, text, file).await
    {
        return api_failure(&req.id, &e);
    }
    submit_page(&req.id, api.as_ref(), &token, &user, assignment_id).await
}

async fn handle_review(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return not_authenticated(&req.id);
    };
    if !roles::capabilities(session.user.role).grade_submissions {
        return forbidden(&req.id);
    }
    let Some(assignment_id) = req.params.get("assignmentId").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "missing assignmentId", None);
    };

    let api = state.api.clone();
    let token = session.token.clone();
    let user = session.user.clone();
    review_page(&req.id, api.as_ref(), &token, &user, assignment_id).await
}

async fn handle_grade(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return not_authenticated(&req.id);
    };
    if !roles::capabilities(session.user.role).grade_submissions {
        return forbidden(&req.id);
    }
    let Some(submission_id) = req.params.get("submissionId").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "missing submissionId", None);
    };
    let Some(grade) = req.params.get("grade").and_then(|v| v.as_f64()) else {
        return err(&req.id, "bad_params", "missing grade", None);
    };
    let Some(assignment_id) = req.params.get("assignmentId").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "missing assignmentId", None);
    };
    let feedback = req
        .params
        .get("feedback")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    let errors = validate::grade(grade);
    if !errors.is_empty() {
        return validation(&req.id, &errors);
    }

    let api = state.api.clone();
    let token = session.token.clone();
    let user = session.user.clone();
    if let Err(e) =
        api::assignments::grade(api.as_ref(), &token, submission_id, grade, feedback.as_deref())
            .await
    {
        return api_failure(&req.id, &e);
    }
    review_page(&req.id, api.as_ref(), &token, &user, assignment_id).await
}

pub async fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "submissions.open" => Some(handle_open(state, req).await),
        "submissions.submit" => Some(handle_submit(state, req).await),
        "submissions.review" => Some(handle_review(state, req).await),
        "submissions.grade" => Some(handle_grade(state, req).await),
        _ => None,
    }
}
