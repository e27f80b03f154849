use crate::api::{self, Transport};
use crate::error::ApiError;
use crate::ipc::error::{api_failure, err, forbidden, not_authenticated, ok_view, validation};
use crate::ipc::types::{AppState, Request};
use crate::model::{Role, User};
use crate::roles;
use crate::validate::{self, CourseForm};
use crate::view;
use std::path::PathBuf;

/// One fetch pass for the page. Students also pull their own course list so
/// cards can show Drop instead of Enroll for courses they already hold.
async fn load_page(
    api: &dyn Transport,
    token: &str,
    user: &User,
    search: Option<&str>,
) -> Result<view::CoursesPage, ApiError> {
    if user.role == Role::Student {
        let (courses, mine) = tokio::try_join!(
            api::courses::list(api, token),
            api::courses::for_student(api, token, &user.id),
        )?;
        let enrolled: Vec<i64> = mine.iter().map(|c| c.id).collect();
        Ok(view::courses_page(user, &courses, &enrolled, search))
    } else {
        let courses = api::courses::list(api, token).await?;
        Ok(view::courses_page(user, &courses, &[], search))
    }
}

async fn reload(id: &str, api: &dyn Transport, token: &str, user: &User) -> serde_json::Value {
    match load_page(api, token, user, None).await {
        Ok(page) => ok_view(id, &page),
        Err(e) => api_failure(id, &e),
    }
}

async fn handle_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return not_authenticated(&req.id);
    };
    let api = state.api.clone();
    let token = session.token.clone();
    let user = session.user.clone();
    let search = req
        .params
        .get("search")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    match load_page(api.as_ref(), &token, &user, search.as_deref()).await {
        Ok(page) => ok_view(&req.id, &page),
        Err(e) => api_failure(&req.id, &e),
    }
}

async fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return not_authenticated(&req.id);
    };
    if !roles::capabilities(session.user.role).manage_courses {
        return forbidden(&req.id);
    }
    let form: CourseForm = match serde_json::from_value(req.params.clone()) {
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
    if let Err(e) = api::courses::create(api.as_ref(), &token, &form).await {
        return api_failure(&req.id, &e);
    }
    reload(&req.id, api.as_ref(), &token, &user).await
}

async fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return not_authenticated(&req.id);
    };
    if !roles::capabilities(session.user.role).manage_courses {
        return forbidden(&req.id);
    }
    let Some(course_id) = req.params.get("courseId").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "missing courseId", None);
    };
    let form: CourseForm = match serde_json::from_value(req.params.clone()) {
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
    if let Err(e) = api::courses::update(api.as_ref(), &token, course_id, &form).await {
        return api_failure(&req.id, &e);
    }
    reload(&req.id, api.as_ref(), &token, &user).await
}

async fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return not_authenticated(&req.id);
    };
    if !roles::capabilities(session.user.role).manage_courses {
        return forbidden(&req.id);
    }
    let Some(course_id) = req.params.get("courseId").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "missing courseId", None);
    };

    let api = state.api.clone();
    let token = session.token.clone();
    let user = session.user.clone();
    if let Err(e) = api::courses::delete(api.as_ref(), &token, course_id).await {
        return api_failure(&req.id, &e);
    }
    reload(&req.id, api.as_ref(), &token, &user).await
}

async fn handle_enroll(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return not_authenticated(&req.id);
    };
    if !roles::capabilities(session.user.role).enroll {
        return forbidden(&req.id);
    }
    let Some(course_id) = req.params.get("courseId").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "missing courseId", None);
    };

    let api = state.api.clone();
    let token = session.token.clone();
    let user = session.user.clone();
    if let Err(e) = api::enrollments::enroll(api.as_ref(), &token, course_id).await {
        return api_failure(&req.id, &e);
    }
    reload(&req.id, api.as_ref(), &token, &user).await
}

async fn handle_drop(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return not_authenticated(&req.id);
    };
    if !roles::capabilities(session.user.role).enroll {
        return forbidden(&req.id);
    }
    let Some(course_id) = req.params.get("courseId").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "missing courseId", None);
    };

    let api = state.api.clone();
    let token = session.token.clone();
    let user = session.user.clone();
    if let Err(e) = api::courses::drop(api.as_ref(), &token, course_id).await {
        return api_failure(&req.id, &e);
    }
    reload(&req.id, api.as_ref(), &token, &user).await
}

/// The upload reads a local file, so size and type are checked before any
/// bytes leave the machine.
async fn handle_upload_syllabus(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return not_authenticated(&req.id);
    };
    if !roles::capabilities(session.user.role).manage_courses {
        return forbidden(&req.id);
    }
    let Some(course_id) = req.params.get("courseId").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "missing courseId", None);
    };
    let Some(file_path) = req.params.get("filePath").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing filePath", None);
    };

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
    let errors = validate::check_file("syllabus", &file_name, size, validate::SYLLABUS_TYPES);
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

    let api = state.api.clone();
    let token = session.token.clone();
    let user = session.user.clone();
    if let Err(e) =
        api::courses::upload_syllabus(api.as_ref(), &token, course_id, &file_name, bytes).await
    {
        return api_failure(&req.id, &e);
    }
    reload(&req.id, api.as_ref(), &token, &user).await
}

async fn handle_assign_lecturer(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return not_authenticated(&req.id);
    };
    if !roles::capabilities(session.user.role).assign_lecturers {
        return forbidden(&req.id);
    }
    let Some(course_id) = req.params.get("courseId").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "missing courseId", None);
    };
    let Some(lecturer_id) = req.params.get("lecturerId").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing lecturerId", None);
    };
    let lecturer_id = lecturer_id.to_string();

    let api = state.api.clone();
    let token = session.token.clone();
    let user = session.user.clone();
    if let Err(e) =
        api::courses::assign_lecturer(api.as_ref(), &token, course_id, &lecturer_id).await
    {
        return api_failure(&req.id, &e);
    }
    reload(&req.id, api.as_ref(), &token, &user).await
}

pub async fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "courses.open" => Some(handle_open(state, req).await),
        "courses.create" => Some(handle_create(state, req).await),
        "courses.update" => Some(handle_update(state, req).await),
        "courses.delete" => Some(handle_delete(state, req).await),
        "courses.enroll" => Some(handle_enroll(state, req).await),
        "courses.drop" => Some(handle_drop(state, req).await),
        "courses.uploadSyllabus" => Some(handle_upload_syllabus(state, req).await),
        "courses.assignLecturer" => Some(handle_assign_lecturer(state, req).await),
        _ => None,
    }
}
