mod common;

use campusd::api::Part;
use campusd::ipc::handle_request;
use campusd::model::Role;
use common::{error_code, request, sign_in, state, temp_state_dir, FakeTransport};
use serde_json::json;

fn assignment(id: i64, title: &str, active: bool, due: Option<&str>) -> serde_json::Value {
    let mut a = json!({
        "id": id,
        "courseId": 2,
        "title": title,
        "weight": 25.0,
        "isActive": active
    });
    if let Some(due) = due {
        a["dueAt"] = json!(due);
    }
    a
}

fn student_assignments(items: Vec<serde_json::Value>) -> serde_json::Value {
    json!({ "success": true, "data": { "assignments": items } })
}

#[tokio::test]
async fn open_renders_an_unlocked_form_for_fresh_work() {
    let api = FakeTransport::new();
    api.script(
        "GET /assignments/student/20",
        200,
        student_assignments(vec![assignment(5, "Essay", true, Some("2030-01-01T00:00:00Z"))]),
    );
    let mut state = state(api.clone(), "campusd-submit-open");
    sign_in(&mut state, Role::Student);

    let resp = handle_request(
        &mut state,
        request("1", "submissions.open", json!({ "assignmentId": 5 })),
    )
    .await;

    assert_eq!(resp["ok"], json!(true));
    assert_eq!(resp["result"]["assignmentTitle"], json!("Essay"));
    assert_eq!(resp["result"]["canSubmit"], json!(true));
    assert_eq!(resp["result"]["status"]["label"], json!("Pending"));
    assert!(resp["result"]["submission"].is_null());
    assert!(resp["result"]["overdueWarning"].is_null());
}

#[tokio::test]
async fn open_locks_after_submission_and_when_inactive() {
    let api = FakeTransport::new();
    api.script(
        "GET /assignments/student/20",
        200,
        student_assignments(vec![assignment(5, "Essay", true, None)]),
    );
    api.script(
        "GET /assignments/5/submission/20",
        200,
        json!({ "success": true, "data": { "submission": {
            "id": 31,
            "assignmentId": 5,
            "status": "submitted",
            "textSubmission": "My essay text",
            "submittedAt": "2025-09-10T18:00:00Z"
        } } }),
    );
    let mut state = state(api.clone(), "campusd-submit-locked");
    sign_in(&mut state, Role::Student);

    let resp = handle_request(
        &mut state,
        request("1", "submissions.open", json!({ "assignmentId": 5 })),
    )
    .await;

    assert_eq!(resp["result"]["canSubmit"], json!(false));
    assert_eq!(
        resp["result"]["submission"]["heading"],
        json!("Submission Submitted")
    );
    assert_eq!(
        resp["result"]["submission"]["textPrefill"],
        json!("My essay text")
    );

    // Inactive assignments lock the form even without a submission.
    let api = FakeTransport::new();
    api.script(
        "GET /assignments/student/20",
        200,
        student_assignments(vec![assignment(6, "Closed quiz", false, None)]),
    );
    let mut state = common::state(api.clone(), "campusd-submit-inactive");
    sign_in(&mut state, Role::Student);

    let resp = handle_request(
        &mut state,
        request("2", "submissions.open", json!({ "assignmentId": 6 })),
    )
    .await;
    assert_eq!(resp["result"]["canSubmit"], json!(false));
    assert_eq!(
        resp["result"]["activeLine"],
        json!("Assignment Status: Inactive")
    );
    assert_eq!(
        resp["result"]["activeCaption"],
        json!("This assignment is currently inactive.")
    );
}

#[tokio::test]
async fn open_flags_overdue_work() {
    let api = FakeTransport::new();
    api.script(
        "GET /assignments/student/20",
        200,
        student_assignments(vec![assignment(5, "Essay", true, Some("2020-01-01T00:00:00Z"))]),
    );
    let mut state = state(api.clone(), "campusd-submit-overdue");
    sign_in(&mut state, Role::Student);

    let resp = handle_request(
        &mut state,
        request("1", "submissions.open", json!({ "assignmentId": 5 })),
    )
    .await;

    assert_eq!(resp["result"]["status"]["label"], json!("Overdue"));
    assert_eq!(
        resp["result"]["overdueWarning"],
        json!("This assignment is overdue. Late submissions may be subject to penalties.")
    );
    // Overdue alone does not lock the form.
    assert_eq!(resp["result"]["canSubmit"], json!(true));
}

#[tokio::test]
async fn open_for_an_unknown_assignment_is_an_api_error() {
    let api = FakeTransport::new();
    api.script("GET /assignments/student/20", 200, student_assignments(vec![]));
    let mut state = state(api.clone(), "campusd-submit-unknown");
    sign_in(&mut state, Role::Student);

    let resp = handle_request(
        &mut state,
        request("1", "submissions.open", json!({ "assignmentId": 5 })),
    )
    .await;

    assert_eq!(error_code(&resp), "api_error");
    assert_eq!(resp["error"]["message"], json!("Assignment not found"));
}

#[tokio::test]
async fn submit_requires_text_or_file_before_any_network() {
    let api = FakeTransport::new();
    let mut state = state(api.clone(), "campusd-submit-empty");
    sign_in(&mut state, Role::Student);

    let resp = handle_request(
        &mut state,
        request(
            "1",
            "submissions.submit",
            json!({ "assignmentId": 5, "text": "   " }),
        ),
    )
    .await;

    assert_eq!(error_code(&resp), "validation_failed");
    assert_eq!(
        resp["error"]["details"]["fields"][0]["field"],
        json!("textSubmission")
    );
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn submit_checks_the_file_before_any_network() {
    let api = FakeTransport::new();
    let mut state = state(api.clone(), "campusd-submit-badfile");
    sign_in(&mut state, Role::Student);

    let scratch = temp_state_dir("campusd-submit-files");
    let bad = scratch.join("essay.zip");
    std::fs::write(&bad, b"PK").expect("write file");

    let resp = handle_request(
        &mut state,
        request(
            "1",
            "submissions.submit",
            json!({ "assignmentId": 5, "filePath": bad.to_string_lossy() }),
        ),
    )
    .await;

    assert_eq!(error_code(&resp), "validation_failed");
    assert_eq!(resp["error"]["details"]["fields"][0]["field"], json!("file"));
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn submit_sends_the_form_then_reloads_the_page() {
    let api = FakeTransport::new();
    api.script(
        "POST /assignments/submit",
        201,
        json!({ "success": true, "data": { "submission": {
            "id": 31, "assignmentId": 5, "status": "submitted"
        } } }),
    );
    api.script(
        "GET /assignments/student/20",
        200,
        student_assignments(vec![assignment(5, "Essay", true, None)]),
    );
    api.script(
        "GET /assignments/5/submission/20",
        200,
        json!({ "success": true, "data": { "submission": {
            "id": 31, "assignmentId": 5, "status": "submitted"
        } } }),
    );
    let mut state = state(api.clone(), "campusd-submit-send");
    sign_in(&mut state, Role::Student);

    let scratch = temp_state_dir("campusd-submit-ok");
    let path = scratch.join("essay.pdf");
    std::fs::write(&path, b"%PDF-1.4 essay").expect("write file");

    let resp = handle_request(
        &mut state,
        request(
            "1",
            "submissions.submit",
            json!({
                "assignmentId": 5,
                "text": "  My essay text  ",
                "filePath": path.to_string_lossy()
            }),
        ),
    )
    .await;

    assert_eq!(resp["ok"], json!(true));
    assert_eq!(resp["result"]["canSubmit"], json!(false));

    let parts = api
        .last_multipart_body("POST /assignments/submit")
        .expect("multipart");
    assert_eq!(parts.len(), 3);
    match &parts[0] {
        Part::Text { name, value } => {
            assert_eq!(*name, "assignmentId");
            assert_eq!(value, "5");
        }
        other => panic!("expected text part, got {other:?}"),
    }
    match &parts[1] {
        Part::Text { name, value } => {
            assert_eq!(*name, "textSubmission");
            assert_eq!(value, "My essay text");
        }
        other => panic!("expected text part, got {other:?}"),
    }
    match &parts[2] {
        Part::File { name, file_name, .. } => {
            assert_eq!(*name, "file");
            assert_eq!(file_name, "essay.pdf");
        }
        other => panic!("expected file part, got {other:?}"),
    }
}

#[tokio::test]
async fn blank_text_with_a_file_sends_only_the_file() {
    let api = FakeTransport::new();
    api.script(
        "POST /assignments/submit",
        201,
        json!({ "success": true, "data": { "submission": {
            "id": 31, "assignmentId": 5, "status": "submitted"
        } } }),
    );
    api.script(
        "GET /assignments/student/20",
        200,
        student_assignments(vec![assignment(5, "Essay", true, None)]),
    );
    api.script(
        "GET /assignments/5/submission/20",
        200,
        json!({ "success": true, "data": { "submission": {
            "id": 31, "assignmentId": 5, "status": "submitted"
        } } }),
    );
    let mut state = state(api.clone(), "campusd-submit-fileonly");
    sign_in(&mut state, Role::Student);

    let scratch = temp_state_dir("campusd-submit-fileonly-files");
    let path = scratch.join("essay.txt");
    std::fs::write(&path, b"essay body").expect("write file");

    let resp = handle_request(
        &mut state,
        request(
            "1",
            "submissions.submit",
            json!({
                "assignmentId": 5,
                "text": "   ",
                "filePath": path.to_string_lossy()
            }),
        ),
    )
    .await;

    assert_eq!(resp["ok"], json!(true));
    let parts = api
        .last_multipart_body("POST /assignments/submit")
        .expect("multipart");
    assert_eq!(parts.len(), 2);
    assert!(matches!(&parts[1], Part::File { .. }));
}

#[tokio::test]
async fn review_uses_the_assignment_title_when_known() {
    let api = FakeTransport::new();
    api.script(
        "GET /assignments/lecturer/7",
        200,
        student_assignments(vec![assignment(5, "Essay", true, None)]),
    );
    api.script(
        "GET /assignments/5/submissions",
        200,
        json!({ "success": true, "data": { "submissions": [
            {
                "id": 31,
                "assignmentId": 5,
                "status": "submitted",
                "student": { "id": 20, "firstName": "Sam", "lastName": "Osei" },
                "submittedAt": "2025-09-10T18:00:00Z"
            },
            {
                "id": 32,
                "assignmentId": 5,
                "status": "graded",
                "grade": 91.0,
                "student": { "id": 21, "firstName": "Ada", "lastName": "Byron" }
            }
        ] } }),
    );
    let mut state = state(api.clone(), "campusd-review");
    sign_in(&mut state, Role::Lecturer);

    let resp = handle_request(
        &mut state,
        request("1", "submissions.review", json!({ "assignmentId": 5 })),
    )
    .await;

    assert_eq!(resp["ok"], json!(true));
    assert_eq!(resp["result"]["title"], json!("Essay Submissions"));
    assert_eq!(resp["result"]["countLine"], json!("2 submissions"));
    let rows = resp["result"]["rows"].as_array().expect("rows");
    assert_eq!(rows[0]["status"]["label"], json!("Submitted"));
    assert_eq!(rows[1]["gradeLine"], json!("91/100"));
    let panels = resp["result"]["panels"].as_array().expect("panels");
    assert_eq!(panels[1]["gradePrefill"], json!(91.0));
    assert_eq!(panels[1]["letter"], json!("A-"));
}

#[tokio::test]
async fn review_falls_back_to_a_placeholder_title() {
    let api = FakeTransport::new();
    api.script("GET /assignments/lecturer/7", 200, student_assignments(vec![]));
    api.script(
        "GET /assignments/5/submissions",
        200,
        json!({ "success": true, "data": { "submissions": [] } }),
    );
    let mut state = state(api.clone(), "campusd-review-placeholder");
    sign_in(&mut state, Role::Lecturer);

    let resp = handle_request(
        &mut state,
        request("1", "submissions.review", json!({ "assignmentId": 5 })),
    )
    .await;

    assert_eq!(resp["result"]["title"], json!("Assignment Submissions"));
    assert_eq!(resp["result"]["empty"], json!("No submissions yet"));
}

#[tokio::test]
async fn review_is_for_lecturers_only() {
    let api = FakeTransport::new();
    let mut state = state(api.clone(), "campusd-review-gate");
    sign_in(&mut state, Role::Student);

    let resp = handle_request(
        &mut state,
        request("1", "submissions.review", json!({ "assignmentId": 5 })),
    )
    .await;

    assert_eq!(error_code(&resp), "forbidden");
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn grade_range_is_checked_before_any_network() {
    let api = FakeTransport::new();
    let mut state = state(api.clone(), "campusd-grade-range");
    sign_in(&mut state, Role::Lecturer);

    let resp = handle_request(
        &mut state,
        request(
            "1",
            "submissions.grade",
            json!({ "submissionId": 31, "grade": 150.0, "assignmentId": 5 }),
        ),
    )
    .await;

    assert_eq!(error_code(&resp), "validation_failed");
    assert_eq!(
        resp["error"]["details"]["fields"][0]["message"],
        json!("Grade cannot exceed 100")
    );
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn grade_posts_then_reloads_the_review() {
    let api = FakeTransport::new();
    api.script(
        "POST /assignments/grade",
        200,
        json!({ "success": true, "data": { "submission": {
            "id": 31, "assignmentId": 5, "status": "graded", "grade": 88.0
        } } }),
    );
    api.script(
        "GET /assignments/lecturer/7",
        200,
        student_assignments(vec![assignment(5, "Essay", true, None)]),
    );
    api.script(
        "GET /assignments/5/submissions",
        200,
        json!({ "success": true, "data": { "submissions": [
            { "id": 31, "assignmentId": 5, "status": "graded", "grade": 88.0 }
        ] } }),
    );
    let mut state = state(api.clone(), "campusd-grade-send");
    sign_in(&mut state, Role::Lecturer);

    let resp = handle_request(
        &mut state,
        request(
            "1",
            "submissions.grade",
            json!({
                "submissionId": 31,
                "grade": 88.0,
                "feedback": "Solid work",
                "assignmentId": 5
            }),
        ),
    )
    .await;

    assert_eq!(resp["ok"], json!(true));
    assert_eq!(resp["result"]["rows"][0]["gradeLine"], json!("88/100"));

    let body = api.last_json_body("POST /assignments/grade").expect("body");
    assert_eq!(body["submissionId"], json!(31));
    assert_eq!(body["grade"], json!(88.0));
    assert_eq!(body["feedback"], json!("Solid work"));
}
