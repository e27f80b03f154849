//! Render-ready view models for the shell.
//!
//! Everything here is a pure function from domain records (plus the signed-in
//! user and, where it matters, the clock) to serializable structs. No I/O:
//! handlers fetch, these shape. Tones are semantic ("green", "red") and the
//! shell maps them to styling.

use crate::model::{
    Assignment, Course, CourseGrade, Enrollment, EnrollmentStatus, Role, Submission, User,
};
use crate::roles::{self, Capabilities, NavItem};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub fn short_date(t: DateTime<Utc>) -> String {
    t.format("%-m/%-d/%Y").to_string()
}

pub fn medium_date(t: DateTime<Utc>) -> String {
    t.format("%b %-d, %Y").to_string()
}

pub fn medium_datetime(t: DateTime<Utc>) -> String {
    t.format("%b %-d, %Y, %I:%M %p").to_string()
}

pub fn long_datetime(t: DateTime<Utc>) -> String {
    t.format("%B %-d, %Y, %I:%M %p").to_string()
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Chip {
    pub label: String,
    pub tone: &'static str,
}

impl Chip {
    fn new(label: impl Into<String>, tone: &'static str) -> Self {
        Chip {
            label: label.into(),
            tone,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: &'static str,
    pub label: &'static str,
    pub route: Option<String>,
}

impl Action {
    fn command(id: &'static str, label: &'static str) -> Self {
        Action {
            id,
            label,
            route: None,
        }
    }

    fn nav(id: &'static str, label: &'static str, route: String) -> Self {
        Action {
            id,
            label,
            route: Some(route),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EmptyState {
    pub heading: String,
    pub caption: String,
}

/// Letter scale used everywhere a percentage becomes a grade.
pub fn grade_letter(percentage: f64) -> &'static str {
    if percentage >= 97.0 {
        "A+"
    } else if percentage >= 93.0 {
        "A"
    } else if percentage >= 90.0 {
        "A-"
    } else if percentage >= 87.0 {
        "B+"
    } else if percentage >= 83.0 {
        "B"
    } else if percentage >= 80.0 {
        "B-"
    } else if percentage >= 77.0 {
        "C+"
    } else if percentage >= 73.0 {
        "C"
    } else if percentage >= 70.0 {
        "C-"
    } else if percentage >= 67.0 {
        "D+"
    } else if percentage >= 63.0 {
        "D"
    } else if percentage >= 60.0 {
        "D-"
    } else {
        "F"
    }
}

pub fn grade_tone(percentage: f64) -> &'static str {
    if percentage >= 90.0 {
        "green"
    } else if percentage >= 80.0 {
        "blue"
    } else if percentage >= 70.0 {
        "yellow"
    } else if percentage >= 60.0 {
        "orange"
    } else {
        "red"
    }
}

// ---------------------------------------------------------------------------
// Signed-in user

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub role: &'static str,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: String,
}

pub fn user_view(user: &User) -> UserView {
    UserView {
        id: user.id.clone(),
        email: user.email.clone(),
        role: user.role.as_str(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        display_name: user.display_name(),
    }
}

// ---------------------------------------------------------------------------
// Dashboard

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCard {
    pub title: &'static str,
    pub caption: &'static str,
    pub route: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPage {
    pub title: &'static str,
    pub welcome: String,
    pub cards: Vec<DashboardCard>,
    pub nav: Vec<NavItem>,
    pub capabilities: Capabilities,
}

pub fn dashboard_page(user: &User) -> DashboardPage {
    let title = match user.role {
        Role::Student => "Student Dashboard",
        Role::Lecturer => "Lecturer Dashboard",
        Role::Admin => "Admin Dashboard",
    };
    let cards = match user.role {
        Role::Student => vec![
            DashboardCard {
                title: "Browse Courses",
                caption: "View and enroll in courses",
                route: Some("/courses"),
            },
            DashboardCard {
                title: "Grades",
                caption: "Check your progress",
                route: None,
            },
            DashboardCard {
                title: "Assignments",
                caption: "Submit your work",
                route: None,
            },
        ],
        Role::Lecturer => vec![
            DashboardCard {
                title: "My Courses",
                caption: "Manage your courses",
                route: Some("/courses"),
            },
            DashboardCard {
                title: "Students",
                caption: "View enrolled students",
                route: None,
            },
            DashboardCard {
                title: "Grade Book",
                caption: "Grade assignments",
                route: None,
            },
        ],
        Role::Admin => vec![
            DashboardCard {
                title: "User Management",
                caption: "Manage all users",
                route: None,
            },
            DashboardCard {
                title: "Course Management",
                caption: "Oversee all courses",
                route: Some("/courses"),
            },
            DashboardCard {
                title: "Enrollments",
                caption: "Approve/reject requests",
                route: Some("/enrollments"),
            },
        ],
    };
    DashboardPage {
        title,
        welcome: format!("Welcome back, {}", user.display_name()),
        cards,
        nav: roles::nav_items(user.role),
        capabilities: roles::capabilities(user.role),
    }
}

// ---------------------------------------------------------------------------
// Courses

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCard {
    pub id: i64,
    pub title: String,
    pub credits_line: Option<String>,
    pub description: Option<String>,
    pub lecturer: Option<String>,
    pub created_line: Option<String>,
    pub syllabus_available: bool,
    pub enrollment_status: Option<Chip>,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursesPage {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub can_create: bool,
    pub cards: Vec<CourseCard>,
    pub empty: Option<EmptyState>,
}

fn enrollment_chip(status: EnrollmentStatus) -> Chip {
    let tone = match status {
        EnrollmentStatus::Pending => "yellow",
        EnrollmentStatus::Approved => "green",
        EnrollmentStatus::Rejected => "red",
    };
    Chip::new(status.as_str(), tone)
}

pub fn course_card(
    course: &Course,
    role: Role,
    enrollment_status: Option<EnrollmentStatus>,
) -> CourseCard {
    let mut actions = Vec::new();
    match role {
        Role::Student => match enrollment_status {
            None => actions.push(Action::command("enroll", "Enroll")),
            Some(EnrollmentStatus::Approved) => {
                actions.push(Action::command("drop", "Drop Course"))
            }
            Some(_) => {}
        },
        Role::Lecturer => {
            actions.push(Action::command("edit", "Edit"));
            actions.push(Action::command(
                "uploadSyllabus",
                if course.syllabus.is_some() {
                    "Update Syllabus"
                } else {
                    "Upload Syllabus"
                },
            ));
            actions.push(Action::command("delete", "Delete"));
        }
        Role::Admin => actions.push(Action::command("edit", "Manage")),
    }
    CourseCard {
        id: course.id,
        title: course.title.clone(),
        credits_line: course.credits.map(|c| format!("{c} credits")),
        description: course.description.clone(),
        lecturer: course.lecturer_name(),
        created_line: course.created_at.map(|t| format!("Created: {}", short_date(t))),
        syllabus_available: course.syllabus.is_some(),
        enrollment_status: enrollment_status.map(enrollment_chip),
        actions,
    }
}

/// `enrolled_course_ids` is the student's approved set; other roles pass an
/// empty slice.
pub fn courses_page(
    user: &User,
    courses: &[Course],
    enrolled_course_ids: &[i64],
    search: Option<&str>,
) -> CoursesPage {
    let (title, subtitle) = match user.role {
        Role::Student => ("Browse Courses", "Browse and enroll in available courses"),
        Role::Lecturer => ("My Courses", "Manage your courses and upload syllabi"),
        Role::Admin => ("Course Management", "Oversee all courses and enrollments"),
    };
    let needle = search.unwrap_or("").to_lowercase();
    let cards: Vec<CourseCard> = courses
        .iter()
        .filter(|c| {
            needle.is_empty()
                || c.title.to_lowercase().contains(&needle)
                || c.description
                    .as_ref()
                    .map(|d| d.to_lowercase().contains(&needle))
                    .unwrap_or(false)
        })
        .map(|c| {
            let status = if user.role == Role::Student && enrolled_course_ids.contains(&c.id) {
                Some(EnrollmentStatus::Approved)
            } else {
                None
            };
            course_card(c, user.role, status)
        })
        .collect();
    let empty = if cards.is_empty() {
        Some(if needle.is_empty() {
            EmptyState {
                heading: "No courses available".to_string(),
                caption: "Check back later for new courses".to_string(),
            }
        } else {
            EmptyState {
                heading: "No courses found".to_string(),
                caption: "Try adjusting your search terms".to_string(),
            }
        })
    } else {
        None
    };
    CoursesPage {
        title,
        subtitle,
        can_create: user.role == Role::Lecturer,
        cards,
        empty,
    }
}

// ---------------------------------------------------------------------------
// Assignments

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentCard {
    pub id: i64,
    pub title: String,
    pub course_line: Option<String>,
    pub description: Option<String>,
    pub due_line: String,
    pub weight_line: String,
    pub status: Chip,
    pub submitted_line: Option<String>,
    pub grade_line: Option<String>,
    pub created_line: Option<String>,
    pub updated_line: Option<String>,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOption {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentsPage {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub can_create: bool,
    pub filter_options: Vec<&'static str>,
    pub course_options: Vec<CourseOption>,
    pub cards: Vec<AssignmentCard>,
    pub empty: Option<EmptyState>,
}

fn course_line(assignment: &Assignment) -> Option<String> {
    let course = assignment.course.as_ref()?;
    match (&course.code, &course.title) {
        (Some(code), Some(title)) => Some(format!("{code} - {title}")),
        (None, Some(title)) => Some(title.clone()),
        (Some(code), None) => Some(code.clone()),
        (None, None) => None,
    }
}

fn student_chip(assignment: &Assignment, submission: Option<&Submission>, now: DateTime<Utc>) -> Chip {
    let graded = submission.map(|s| s.is_graded()).unwrap_or(false);
    let submitted = submission.map(|s| s.is_submitted()).unwrap_or(false);
    if graded {
        Chip::new("Graded", "green")
    } else if submitted {
        Chip::new("Submitted", "blue")
    } else if assignment.past_due(now) {
        Chip::new("Overdue", "red")
    } else {
        Chip::new("Pending", "yellow")
    }
}

fn lecturer_chip(assignment: &Assignment) -> Chip {
    if assignment.active() {
        Chip::new("Active", "green")
    } else {
        Chip::new("Inactive", "gray")
    }
}

pub fn assignment_card(
    assignment: &Assignment,
    submission: Option<&Submission>,
    role: Role,
    now: DateTime<Utc>,
) -> AssignmentCard {
    let due_line = assignment
        .due_at
        .map(medium_date)
        .unwrap_or_else(|| "No due date".to_string());
    let (status, submitted_line, grade_line, created_line, updated_line, actions) =
        if role == Role::Student {
            let submitted = submission.map(|s| s.is_submitted()).unwrap_or(false);
            let label = if submitted {
                "View Submission"
            } else {
                "Submit Assignment"
            };
            (
                student_chip(assignment, submission, now),
                submission
                    .and_then(|s| s.submitted_at)
                    .map(|t| format!("Submitted: {}", medium_datetime(t))),
                submission
                    .filter(|s| s.is_graded())
                    .and_then(|s| s.grade)
                    .map(|g| format!("{g}/100")),
                None,
                None,
                vec![Action::nav(
                    "view",
                    label,
                    format!("/assignments/{}/submit", assignment.id),
                )],
            )
        } else {
            (
                lecturer_chip(assignment),
                None,
                None,
                assignment
                    .created_at
                    .map(|t| format!("Created: {}", medium_datetime(t))),
                assignment
                    .updated_at
                    .map(|t| format!("Last Updated: {}", medium_datetime(t))),
                vec![
                    Action::nav(
                        "view",
                        "View Submissions",
                        format!("/assignments/{}/submissions", assignment.id),
                    ),
                    Action::command("edit", "Edit"),
                    Action::command("delete", "Delete"),
                ],
            )
        };
    AssignmentCard {
        id: assignment.id,
        title: assignment.title.clone(),
        course_line: course_line(assignment),
        description: assignment.description.clone(),
        due_line,
        weight_line: format!("{}%", assignment.weight),
        status,
        submitted_line,
        grade_line,
        created_line,
        updated_line,
        actions,
    }
}

fn find_submission<'a>(submissions: &'a [Submission], assignment_id: i64) -> Option<&'a Submission> {
    submissions.iter().find(|s| s.assignment_id == assignment_id)
}

#[allow(clippy::too_many_arguments)]
pub fn assignments_page(
    user: &User,
    assignments: &[Assignment],
    submissions: &[Submission],
    courses: &[Course],
    search: Option<&str>,
    filter: Option<&str>,
    now: DateTime<Utc>,
) -> AssignmentsPage {
    let role = user.role;
    let (subtitle, filter_options) = if role == Role::Student {
        (
            "View and submit your assignments",
            vec!["all", "pending", "submitted", "graded", "overdue"],
        )
    } else {
        (
            "Create and manage assignments for your courses",
            vec!["all", "active", "inactive"],
        )
    };
    let needle = search.unwrap_or("").to_lowercase();
    let filter = filter.unwrap_or("all");
    let cards: Vec<AssignmentCard> = assignments
        .iter()
        .filter(|a| {
            let matches_search = needle.is_empty()
                || a.title.to_lowercase().contains(&needle)
                || a.course
                    .as_ref()
                    .and_then(|c| c.title.as_ref())
                    .map(|t| t.to_lowercase().contains(&needle))
                    .unwrap_or(false);
            if !matches_search {
                return false;
            }
            if role == Role::Student {
                let submission = find_submission(submissions, a.id);
                let submitted = submission.map(|s| s.is_submitted()).unwrap_or(false);
                let graded = submission.map(|s| s.is_graded()).unwrap_or(false);
                match filter {
                    "pending" => !submitted,
                    "submitted" => submitted && !graded,
                    "graded" => graded,
                    "overdue" => a.past_due(now) && !submitted,
                    _ => true,
                }
            } else {
                match filter {
                    "active" => a.active(),
                    "inactive" => !a.active(),
                    _ => true,
                }
            }
        })
        .map(|a| assignment_card(a, find_submission(submissions, a.id), role, now))
        .collect();
    let empty = if cards.is_empty() {
        let caption = if !needle.is_empty() || filter != "all" {
            "Try adjusting your search or filter criteria."
        } else if role == Role::Lecturer {
            "Get started by creating your first assignment."
        } else {
            "You don't have any assignments yet."
        };
        Some(EmptyState {
            heading: "No assignments found".to_string(),
            caption: caption.to_string(),
        })
    } else {
        None
    };
    AssignmentsPage {
        title: "My Assignments",
        subtitle,
        can_create: role == Role::Lecturer,
        filter_options,
        course_options: courses
            .iter()
            .map(|c| CourseOption {
                id: c.id,
                title: c.title.clone(),
            })
            .collect(),
        cards,
        empty,
    }
}

// ---------------------------------------------------------------------------
// Submit page (student)

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDetail {
    pub heading: &'static str,
    pub submitted_line: Option<String>,
    pub grade_line: Option<String>,
    pub feedback: Option<String>,
    pub text_prefill: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPage {
    pub title: &'static str,
    pub back_route: &'static str,
    pub assignment_id: i64,
    pub assignment_title: String,
    pub description: Option<String>,
    pub status: Chip,
    pub due_line: String,
    pub weight_line: String,
    pub active_line: String,
    pub active_caption: &'static str,
    pub submission: Option<SubmissionDetail>,
    pub overdue_warning: Option<&'static str>,
    pub can_submit: bool,
}

/// Here "Overdue" outranks everything; the list page only shows it for work
/// that is neither submitted nor graded, but this page warns even while the
/// chip for graded work stays green.
pub fn submit_page(
    assignment: &Assignment,
    submission: Option<&Submission>,
    now: DateTime<Utc>,
) -> SubmitPage {
    let submitted = submission.map(|s| s.is_submitted()).unwrap_or(false);
    let graded = submission.map(|s| s.is_graded()).unwrap_or(false);
    let overdue = assignment.past_due(now) && !submitted;
    let status = if overdue {
        Chip::new("Overdue", "red")
    } else if graded {
        Chip::new("Graded", "green")
    } else if submitted {
        Chip::new("Submitted", "blue")
    } else {
        Chip::new("Pending", "yellow")
    };
    let active = assignment.active();
    SubmitPage {
        title: "Assignment Submission",
        back_route: "/assignments",
        assignment_id: assignment.id,
        assignment_title: assignment.title.clone(),
        description: assignment.description.clone(),
        status,
        due_line: assignment
            .due_at
            .map(long_datetime)
            .unwrap_or_else(|| "No due date".to_string()),
        weight_line: format!("{}%", assignment.weight),
        active_line: format!(
            "Assignment Status: {}",
            if active { "Active" } else { "Inactive" }
        ),
        active_caption: if active {
            "You can submit your work for this assignment."
        } else {
            "This assignment is currently inactive."
        },
        submission: submission.map(|s| SubmissionDetail {
            heading: if s.is_graded() {
                "Submission Graded"
            } else {
                "Submission Submitted"
            },
            submitted_line: s
                .submitted_at
                .map(|t| format!("Submitted on: {}", long_datetime(t))),
            grade_line: s
                .grade
                .filter(|_| s.is_graded())
                .map(|g| format!("{g}/100")),
            feedback: s.feedback.clone(),
            text_prefill: s.text_submission.clone(),
        }),
        overdue_warning: overdue
            .then_some("This assignment is overdue. Late submissions may be subject to penalties."),
        can_submit: !submitted && active,
    }
}

// ---------------------------------------------------------------------------
// Submissions review (lecturer)

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRow {
    pub id: i64,
    pub student_name: String,
    pub student_email: Option<String>,
    pub date_line: Option<String>,
    pub status: Chip,
    pub grade_line: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionsPage {
    pub title: String,
    pub subtitle: &'static str,
    pub back_route: &'static str,
    pub count_line: String,
    pub rows: Vec<SubmissionRow>,
    pub panels: Vec<GradingPanel>,
    pub empty: Option<&'static str>,
}

fn review_chip(submission: &Submission) -> Chip {
    if submission.is_graded() {
        Chip::new("Graded", "green")
    } else if submission.is_submitted() {
        Chip::new("Submitted", "blue")
    } else {
        Chip::new("Draft", "yellow")
    }
}

pub fn submission_row(submission: &Submission) -> SubmissionRow {
    SubmissionRow {
        id: submission.id,
        student_name: submission
            .student
            .as_ref()
            .map(|s| s.full_name())
            .unwrap_or_default(),
        student_email: submission.student.as_ref().and_then(|s| s.email.clone()),
        date_line: submission
            .submitted_at
            .or(submission.created_at)
            .map(medium_datetime),
        status: review_chip(submission),
        grade_line: submission.grade.map(|g| format!("{g}/100")),
    }
}

/// Rows feed the list, panels feed the per-row grading form.
pub fn submissions_page(assignment_title: &str, submissions: &[Submission]) -> SubmissionsPage {
    let count = submissions.len();
    SubmissionsPage {
        title: format!("{assignment_title} Submissions"),
        subtitle: "Grade and provide feedback for student submissions",
        back_route: "/assignments",
        count_line: format!(
            "{count} submission{}",
            if count == 1 { "" } else { "s" }
        ),
        rows: submissions.iter().map(submission_row).collect(),
        panels: submissions.iter().map(grading_panel).collect(),
        empty: (count == 0).then_some("No submissions yet"),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingPanel {
    pub submission_id: i64,
    pub assignment_title: Option<String>,
    pub student_name: String,
    pub submitted_line: Option<String>,
    pub status: Chip,
    pub text: Option<String>,
    pub file_name: Option<String>,
    pub file_url: Option<String>,
    pub grade_label: &'static str,
    pub grade_prefill: f64,
    pub feedback_prefill: String,
    pub letter: Option<&'static str>,
    pub tone: Option<&'static str>,
}

pub fn grading_panel(submission: &Submission) -> GradingPanel {
    let status = if submission.is_graded() {
        Chip::new("Graded", "green")
    } else {
        Chip::new("Pending", "blue")
    };
    GradingPanel {
        submission_id: submission.id,
        assignment_title: submission.assignment.as_ref().map(|a| a.title.clone()),
        student_name: submission
            .student
            .as_ref()
            .map(|s| s.full_name())
            .unwrap_or_default(),
        submitted_line: submission
            .submitted_at
            .map(|t| format!("Submitted: {}", long_datetime(t))),
        status,
        text: submission.text_submission.clone(),
        file_name: submission.file_name.clone(),
        file_url: submission.file_url.clone(),
        grade_label: "Grade (0 - 100)",
        grade_prefill: submission.grade.unwrap_or(0.0),
        feedback_prefill: submission.feedback.clone().unwrap_or_default(),
        letter: submission.grade.map(grade_letter),
        tone: submission.grade.map(grade_tone),
    }
}

// ---------------------------------------------------------------------------
// Enrollments (admin)

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

pub fn status_counts(enrollments: &[Enrollment]) -> StatusCounts {
    StatusCounts {
        total: enrollments.len(),
        pending: enrollments
            .iter()
            .filter(|e| e.status == EnrollmentStatus::Pending)
            .count(),
        approved: enrollments
            .iter()
            .filter(|e| e.status == EnrollmentStatus::Approved)
            .count(),
        rejected: enrollments
            .iter()
            .filter(|e| e.status == EnrollmentStatus::Rejected)
            .count(),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOption {
    pub value: &'static str,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRow {
    pub id: i64,
    pub course_title: Option<String>,
    pub credits_line: Option<String>,
    pub status: Chip,
    pub student_line: Option<String>,
    pub lecturer_line: Option<String>,
    pub applied_line: Option<String>,
    pub updated_line: Option<String>,
    pub description: Option<String>,
    pub can_review: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentsPage {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub counts: StatusCounts,
    pub filter_options: Vec<FilterOption>,
    pub rows: Vec<EnrollmentRow>,
    pub empty: Option<EmptyState>,
}

pub fn enrollment_row(enrollment: &Enrollment) -> EnrollmentRow {
    let course = enrollment.course.as_ref();
    // Updated only shows when the record actually changed after creation.
    let updated_line = match (enrollment.created_at, enrollment.updated_at) {
        (Some(c), Some(u)) if u != c => Some(format!("Updated: {}", short_date(u))),
        (None, Some(u)) => Some(format!("Updated: {}", short_date(u))),
        _ => None,
    };
    EnrollmentRow {
        id: enrollment.id,
        course_title: course.map(|c| c.title.clone()),
        credits_line: course.and_then(|c| c.credits).map(|c| format!("{c} credits")),
        status: enrollment_chip(enrollment.status),
        student_line: enrollment
            .student
            .as_ref()
            .map(|s| format!("Student: {}", s.full_name())),
        lecturer_line: course
            .and_then(|c| c.lecturer_name())
            .map(|n| format!("Lecturer: {n}")),
        applied_line: enrollment
            .created_at
            .map(|t| format!("Applied: {}", short_date(t))),
        updated_line,
        description: course.and_then(|c| c.description.clone()),
        can_review: enrollment.status == EnrollmentStatus::Pending,
    }
}

pub fn enrollments_page(
    enrollments: &[Enrollment],
    status_filter: Option<EnrollmentStatus>,
) -> EnrollmentsPage {
    let counts = status_counts(enrollments);
    let rows: Vec<EnrollmentRow> = enrollments
        .iter()
        .filter(|e| status_filter.map(|s| e.status == s).unwrap_or(true))
        .map(enrollment_row)
        .collect();
    let empty = if rows.is_empty() {
        Some(match status_filter {
            None => EmptyState {
                heading: "No enrollments found".to_string(),
                caption: "There are no course enrollments at the moment".to_string(),
            },
            Some(status) => EmptyState {
                heading: format!("No {} enrollments", status.as_str()),
                caption: format!(
                    "There are no {} enrollments at the moment",
                    status.as_str()
                ),
            },
        })
    } else {
        None
    };
    EnrollmentsPage {
        title: "Enrollment Management",
        subtitle: "Review and manage course enrollment requests",
        counts,
        filter_options: vec![
            FilterOption {
                value: "all",
                label: format!("All ({})", counts.total),
            },
            FilterOption {
                value: "pending",
                label: format!("Pending ({})", counts.pending),
            },
            FilterOption {
                value: "approved",
                label: format!("Approved ({})", counts.approved),
            },
            FilterOption {
                value: "rejected",
                label: format!("Rejected ({})", counts.rejected),
            },
        ],
        rows,
        empty,
    }
}

// ---------------------------------------------------------------------------
// Grades (student)

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeLineRow {
    pub assignment_id: i64,
    pub title: Option<String>,
    pub weight_line: Option<String>,
    pub grade_line: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseGradeCard {
    pub course_id: i64,
    pub percentage: Option<f64>,
    pub letter: Option<String>,
    pub tone: Option<&'static str>,
    pub lines: Vec<GradeLineRow>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradesPage {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub cards: Vec<CourseGradeCard>,
}

/// The server may send its own letter; when it does not, the percentage runs
/// through the shared scale.
pub fn course_grade_card(grade: &CourseGrade) -> CourseGradeCard {
    let letter = grade
        .letter_grade
        .clone()
        .or_else(|| grade.percentage.map(|p| grade_letter(p).to_string()));
    CourseGradeCard {
        course_id: grade.course_id,
        percentage: grade.percentage,
        letter,
        tone: grade.percentage.map(grade_tone),
        lines: grade
            .assignments
            .iter()
            .map(|line| GradeLineRow {
                assignment_id: line.assignment_id,
                title: line.title.clone(),
                weight_line: line.weight.map(|w| format!("{w}%")),
                grade_line: line.grade.map(|g| format!("{g}/100")),
            })
            .collect(),
    }
}

pub fn grades_page(grades: &[CourseGrade]) -> GradesPage {
    GradesPage {
        title: "My Grades",
        subtitle: "Check your progress",
        cards: grades.iter().map(course_grade_card).collect(),
    }
}
