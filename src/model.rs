use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire records for the campus API. Field names mirror the server's JSON
/// (camelCase); anything the server may omit is an `Option`.
///
/// User ids are strings on the wire while course/enrollment/assignment ids
/// are numbers. Ownership checks that cross that seam (course.lecturerId vs
/// user.id) compare through strings; see `Course::owned_by`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Lecturer,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Lecturer => "lecturer",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "student" => Some(Role::Student),
            "lecturer" => Some(Role::Lecturer),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// "First Last", falling back to the email for accounts without names.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(f), Some(l)) => format!("{} {}", f, l),
            (Some(f), None) => f.clone(),
            (None, Some(l)) => l.clone(),
            (None, None) => self.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    Draft,
    Published,
    Archived,
}

impl CourseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CourseStatus::Draft => "draft",
            CourseStatus::Published => "published",
            CourseStatus::Archived => "archived",
        }
    }
}

/// Embedded person reference (`course.lecturer`, `assignment.lecturer`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl PersonRef {
    pub fn full_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(f), Some(l)) => format!("{} {}", f, l),
            (Some(f), None) => f.clone(),
            (None, Some(l)) => l.clone(),
            (None, None) => String::new(),
        }
    }
}

/// Embedded student reference (`submission.student`, `enrollment.student`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRef {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl StudentRef {
    pub fn full_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(f), Some(l)) => format!("{} {}", f, l),
            (Some(f), None) => f.clone(),
            (None, Some(l)) => l.clone(),
            (None, None) => self.email.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub code: Option<String>,
    pub credits: Option<i64>,
    pub max_students: Option<i64>,
    pub status: Option<CourseStatus>,
    pub lecturer_id: Option<i64>,
    pub lecturer: Option<PersonRef>,
    pub syllabus: Option<String>,
    pub syllabus_url: Option<String>,
    pub syllabus_file_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Course {
    /// User ids are strings, lecturer ids numbers; compare through strings.
    pub fn owned_by(&self, user_id: &str) -> bool {
        self.lecturer_id
            .map(|id| id.to_string() == user_id)
            .unwrap_or(false)
    }

    pub fn lecturer_name(&self) -> Option<String> {
        self.lecturer
            .as_ref()
            .map(|l| l.full_name())
            .filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Pending,
    Approved,
    Rejected,
}

impl EnrollmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EnrollmentStatus::Pending => "pending",
            EnrollmentStatus::Approved => "approved",
            EnrollmentStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<EnrollmentStatus> {
        match s {
            "pending" => Some(EnrollmentStatus::Pending),
            "approved" => Some(EnrollmentStatus::Approved),
            "rejected" => Some(EnrollmentStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: i64,
    pub course_id: i64,
    pub student_id: Option<i64>,
    pub status: EnrollmentStatus,
    pub notes: Option<String>,
    pub approved_by: Option<i64>,
    pub course: Option<Course>,
    pub student: Option<StudentRef>,
    pub approver: Option<PersonRef>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Embedded course reference on assignments (`assignment.course`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRef {
    pub id: i64,
    pub title: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub weight: f64,
    pub due_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
    pub course: Option<CourseRef>,
    pub lecturer: Option<PersonRef>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Assignment {
    /// Only an explicit `isActive: true` counts as active; an absent flag
    /// reads as inactive, which also blocks student submission.
    pub fn active(&self) -> bool {
        self.is_active.unwrap_or(false)
    }

    pub fn past_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at.map(|due| due < now).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Draft,
    Submitted,
    Graded,
}

impl SubmissionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionStatus::Draft => "draft",
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::Graded => "graded",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: Option<i64>,
    pub text_submission: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub grade: Option<f64>,
    pub feedback: Option<String>,
    pub status: SubmissionStatus,
    pub submitted_at: Option<DateTime<Utc>>,
    pub graded_at: Option<DateTime<Utc>>,
    pub assignment: Option<Assignment>,
    pub student: Option<StudentRef>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Submission {
    pub fn is_submitted(&self) -> bool {
        matches!(
            self.status,
            SubmissionStatus::Submitted | SubmissionStatus::Graded
        )
    }

    pub fn is_graded(&self) -> bool {
        self.status == SubmissionStatus::Graded
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeLine {
    pub assignment_id: i64,
    pub title: Option<String>,
    pub weight: Option<f64>,
    pub max_points: Option<f64>,
    pub earned_points: Option<f64>,
    pub grade: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseGrade {
    pub course_id: i64,
    pub student_id: Option<i64>,
    pub total_points: Option<f64>,
    pub earned_points: Option<f64>,
    pub percentage: Option<f64>,
    pub letter_grade: Option<String>,
    #[serde(default)]
    pub assignments: Vec<GradeLine>,
}
