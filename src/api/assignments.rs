use crate::api::{self, envelope, ApiRequest, Part, Transport};
use crate::error::ApiError;
use crate::model::{Assignment, CourseGrade, Submission};
use crate::validate::AssignmentForm;
use serde_json::{json, Value};

pub async fn for_course(
    transport: &dyn Transport,
    token: &str,
    course_id: i64,
) -> Result<Vec<Assignment>, ApiError> {
    let payload = api::call_list(
        transport,
        ApiRequest::get(format!("/assignments/course/{course_id}")).token(token),
    )
    .await?;
    envelope::unwrap_list(payload, "assignments")
}

pub async fn for_lecturer(
    transport: &dyn Transport,
    token: &str,
    lecturer_id: &str,
) -> Result<Vec<Assignment>, ApiError> {
    let payload = api::call_list(
        transport,
        ApiRequest::get(format!("/assignments/lecturer/{lecturer_id}")).token(token),
    )
    .await?;
    envelope::unwrap_list(payload, "assignments")
}

pub async fn for_student(
    transport: &dyn Transport,
    token: &str,
    student_id: &str,
) -> Result<Vec<Assignment>, ApiError> {
    let payload = api::call_list(
        transport,
        ApiRequest::get(format!("/assignments/student/{student_id}")).token(token),
    )
    .await?;
    envelope::unwrap_list(payload, "assignments")
}

pub async fn create(
    transport: &dyn Transport,
    token: &str,
    form: &AssignmentForm,
) -> Result<Assignment, ApiError> {
    let payload = api::call(
        transport,
        ApiRequest::post("/assignments", assignment_body(form)).token(token),
        "failed to create assignment",
    )
    .await?;
    envelope::unwrap_entity(payload, "assignment")
}

pub async fn update(
    transport: &dyn Transport,
    token: &str,
    assignment_id: i64,
    form: &AssignmentForm,
) -> Result<Assignment, ApiError> {
    let payload = api::call(
        transport,
        ApiRequest::put(format!("/assignments/{assignment_id}"), assignment_body(form))
            .token(token),
        "failed to update assignment",
    )
    .await?;
    envelope::unwrap_entity(payload, "assignment")
}

pub async fn delete(
    transport: &dyn Transport,
    token: &str,
    assignment_id: i64,
) -> Result<(), ApiError> {
    api::call(
        transport,
        ApiRequest::delete(format!("/assignments/{assignment_id}")).token(token),
        "failed to delete assignment",
    )
    .await?;
    Ok(())
}

pub async fn submissions_for(
    transport: &dyn Transport,
    token: &str,
    assignment_id: i64,
) -> Result<Vec<Submission>, ApiError> {
    let payload = api::call_list(
        transport,
        ApiRequest::get(format!("/assignments/{assignment_id}/submissions")).token(token),
    )
    .await?;
    envelope::unwrap_list(payload, "submissions")
}

/// Student work goes up as a form: the assignment id, optional text and an
/// optional file, any combination the validator allowed.
pub async fn submit(
    transport: &dyn Transport,
    token: &str,
    assignment_id: i64,
    text: Option<&str>,
    file: Option<(String, Vec<u8>)>,
) -> Result<Submission, ApiError> {
    let mut parts = vec![Part::Text {
        name: "assignmentId",
        value: assignment_id.to_string(),
    }];
    if let Some(text) = text {
        parts.push(Part::Text {
            name: "textSubmission",
            value: text.to_string(),
        });
    }
    if let Some((file_name, bytes)) = file {
        parts.push(Part::File {
            name: "file",
            file_name,
            bytes,
        });
    }
    let payload = api::call(
        transport,
        ApiRequest::post_multipart("/assignments/submit", parts).token(token),
        "failed to submit assignment",
    )
    .await?;
    envelope::unwrap_entity(payload, "submission")
}

/// The student's own submission for one assignment. First-time submitters
/// have none; a missing slot or a 404 both read as `None`.
pub async fn my_submission(
    transport: &dyn Transport,
    token: &str,
    assignment_id: i64,
    student_id: &str,
) -> Result<Option<Submission>, ApiError> {
    let result = api::call(
        transport,
        ApiRequest::get(format!("/assignments/{assignment_id}/submission/{student_id}"))
            .token(token),
        "failed to load submission",
    )
    .await;
    match result {
        Ok(payload) => envelope::unwrap_optional_entity(payload, "submission"),
        Err(ApiError::Api {
            status: Some(404), ..
        }) => Ok(None),
        Err(e) => Err(e),
    }
}

pub async fn grade(
    transport: &dyn Transport,
    token: &str,
    submission_id: i64,
    grade: f64,
    feedback: Option<&str>,
) -> Result<Submission, ApiError> {
    let mut body = json!({ "submissionId": submission_id, "grade": grade });
    if let Some(feedback) = feedback {
        body["feedback"] = json!(feedback);
    }
    let payload = api::call(
        transport,
        ApiRequest::post("/assignments/grade", body).token(token),
        "failed to grade submission",
    )
    .await?;
    envelope::unwrap_entity(payload, "submission")
}

pub async fn course_grades(
    transport: &dyn Transport,
    token: &str,
    course_id: i64,
    student_id: &str,
) -> Result<CourseGrade, ApiError> {
    let payload = api::call(
        transport,
        ApiRequest::get(format!("/assignments/course/{course_id}/grades/{student_id}"))
            .token(token),
        "failed to load grades",
    )
    .await?;
    envelope::unwrap_entity(payload, "grades")
}

pub async fn student_grades(
    transport: &dyn Transport,
    token: &str,
    student_id: &str,
) -> Result<Vec<CourseGrade>, ApiError> {
    let payload = api::call_list(
        transport,
        ApiRequest::get(format!("/assignments/student/{student_id}/grades")).token(token),
    )
    .await?;
    envelope::unwrap_list(payload, "grades")
}

fn assignment_body(form: &AssignmentForm) -> Value {
    let mut body = json!({
        "courseId": form.course_id,
        "title": form.title,
        "weight": form.weight,
    });
    if let Some(description) = &form.description {
        body["description"] = json!(description);
    }
    if let Some(due_at) = form.due_at {
        body["dueAt"] = json!(due_at);
    }
    if let Some(is_active) = form.is_active {
        body["isActive"] = json!(is_active);
    }
    body
}
