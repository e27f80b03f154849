use crate::api::{self, envelope, ApiRequest, Part, Transport};
use crate::error::ApiError;
use crate::model::Course;
use crate::validate::CourseForm;
use serde_json::json;

pub async fn list(transport: &dyn Transport, token: &str) -> Result<Vec<Course>, ApiError> {
    let payload = api::call_list(transport, ApiRequest::get("/courses").token(token)).await?;
    envelope::unwrap_list(payload, "courses")
}

pub async fn for_lecturer(
    transport: &dyn Transport,
    token: &str,
    lecturer_id: &str,
) -> Result<Vec<Course>, ApiError> {
    let payload = api::call_list(
        transport,
        ApiRequest::get(format!("/courses/lecturer/{lecturer_id}")).token(token),
    )
    .await?;
    envelope::unwrap_list(payload, "courses")
}

pub async fn for_student(
    transport: &dyn Transport,
    token: &str,
    student_id: &str,
) -> Result<Vec<Course>, ApiError> {
    let payload = api::call_list(
        transport,
        ApiRequest::get(format!("/courses/student/{student_id}")).token(token),
    )
    .await?;
    envelope::unwrap_list(payload, "courses")
}

pub async fn create(
    transport: &dyn Transport,
    token: &str,
    form: &CourseForm,
) -> Result<Course, ApiError> {
    let payload = api::call(
        transport,
        ApiRequest::post("/courses", course_body(form)).token(token),
        "failed to create course",
    )
    .await?;
    envelope::unwrap_entity(payload, "course")
}

pub async fn update(
    transport: &dyn Transport,
    token: &str,
    course_id: i64,
    form: &CourseForm,
) -> Result<Course, ApiError> {
    let payload = api::call(
        transport,
        ApiRequest::put(format!("/courses/{course_id}"), course_body(form)).token(token),
        "failed to update course",
    )
    .await?;
    envelope::unwrap_entity(payload, "course")
}

pub async fn delete(transport: &dyn Transport, token: &str, course_id: i64) -> Result<(), ApiError> {
    api::call(
        transport,
        ApiRequest::delete(format!("/courses/{course_id}")).token(token),
        "failed to delete course",
    )
    .await?;
    Ok(())
}

pub async fn upload_syllabus(
    transport: &dyn Transport,
    token: &str,
    course_id: i64,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<Course, ApiError> {
    let parts = vec![Part::File {
        name: "syllabus",
        file_name: file_name.to_string(),
        bytes,
    }];
    let payload = api::call(
        transport,
        ApiRequest::post_multipart(format!("/courses/{course_id}/syllabus"), parts).token(token),
        "failed to upload syllabus",
    )
    .await?;
    envelope::unwrap_entity(payload, "course")
}

pub async fn assign_lecturer(
    transport: &dyn Transport,
    token: &str,
    course_id: i64,
    lecturer_id: &str,
) -> Result<Course, ApiError> {
    let payload = api::call(
        transport,
        ApiRequest::put(
            format!("/courses/{course_id}/assign-lecturer"),
            json!({ "lecturerId": lecturer_id }),
        )
        .token(token),
        "failed to assign lecturer",
    )
    .await?;
    envelope::unwrap_entity(payload, "course")
}

/// Dropping is the inverse of enrolling but lives on the course route.
pub async fn drop(transport: &dyn Transport, token: &str, course_id: i64) -> Result<(), ApiError> {
    api::call(
        transport,
        ApiRequest::delete(format!("/courses/{course_id}/enroll")).token(token),
        "failed to drop course",
    )
    .await?;
    Ok(())
}

fn course_body(form: &CourseForm) -> serde_json::Value {
    json!({
        "title": form.title,
        "description": form.description,
        "code": form.code,
        "credits": form.credits,
        "maxStudents": form.max_students,
    })
}
