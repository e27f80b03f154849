use crate::api::{self, envelope, ApiRequest, Transport};
use crate::error::ApiError;
use crate::model::{Enrollment, EnrollmentStatus};
use serde_json::json;

pub async fn enroll(
    transport: &dyn Transport,
    token: &str,
    course_id: i64,
) -> Result<Enrollment, ApiError> {
    let payload = api::call(
        transport,
        ApiRequest::post("/enrollments/enroll", json!({ "courseId": course_id })).token(token),
        "failed to enroll",
    )
    .await?;
    envelope::unwrap_entity(payload, "enrollment")
}

pub async fn list(transport: &dyn Transport, token: &str) -> Result<Vec<Enrollment>, ApiError> {
    let payload = api::call_list(transport, ApiRequest::get("/enrollments").token(token)).await?;
    envelope::unwrap_list(payload, "enrollments")
}

pub async fn set_status(
    transport: &dyn Transport,
    token: &str,
    enrollment_id: i64,
    status: EnrollmentStatus,
) -> Result<Enrollment, ApiError> {
    let payload = api::call(
        transport,
        ApiRequest::patch(
            format!("/enrollments/{enrollment_id}/approve"),
            json!({ "status": status.as_str() }),
        )
        .token(token),
        "failed to update enrollment",
    )
    .await?;
    envelope::unwrap_entity(payload, "enrollment")
}
