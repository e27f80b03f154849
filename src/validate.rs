//! Client-side form checks, run before any request leaves the process.
//!
//! Each validator returns the full list of field errors so the caller can
//! surface every problem at once instead of one per round trip.

use crate::model::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_FILE_MB: u64 = 10;
pub const SYLLABUS_TYPES: &[&str] = &[".pdf", ".docx", ".doc"];
pub const SUBMISSION_TYPES: &[&str] = &[
    ".pdf", ".doc", ".docx", ".txt", ".jpg", ".jpeg", ".png", ".gif",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        FieldError {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseForm {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub code: String,
    #[serde(default = "default_credits")]
    pub credits: i64,
    #[serde(default = "default_max_students")]
    pub max_students: i64,
}

fn default_credits() -> i64 {
    3
}

fn default_max_students() -> i64 {
    30
}

impl CourseForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.title.chars().count() < 3 {
            errors.push(FieldError::new(
                "title",
                "Course title must be at least 3 characters",
            ));
        }
        if self.code.chars().count() < 2 {
            errors.push(FieldError::new("code", "Course code is required"));
        }
        if self.credits < 1 {
            errors.push(FieldError::new("credits", "Credits must be at least 1"));
        } else if self.credits > 10 {
            errors.push(FieldError::new("credits", "Credits cannot exceed 10"));
        }
        if self.max_students < 1 {
            errors.push(FieldError::new(
                "maxStudents",
                "Max students must be at least 1",
            ));
        }
        errors
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentForm {
    #[serde(default)]
    pub course_id: i64,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub weight: f64,
    pub due_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

impl AssignmentForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.course_id < 1 {
            errors.push(FieldError::new("courseId", "Please select a course"));
        }
        let title_len = self.title.chars().count();
        if title_len < 1 {
            errors.push(FieldError::new("title", "Title is required"));
        } else if title_len > 200 {
            errors.push(FieldError::new(
                "title",
                "Title must be less than 200 characters",
            ));
        }
        if self.weight < 0.1 {
            errors.push(FieldError::new("weight", "Weight must be at least 0.1%"));
        } else if self.weight > 100.0 {
            errors.push(FieldError::new("weight", "Weight cannot exceed 100%"));
        }
        errors
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if !self.email.contains('@') {
            errors.push(FieldError::new("email", "Invalid email"));
        }
        if self.password.chars().count() < 6 {
            errors.push(FieldError::new(
                "password",
                "Password must be at least 6 characters",
            ));
        }
        if self.first_name.trim().is_empty() {
            errors.push(FieldError::new("firstName", "First name is required"));
        }
        if self.last_name.trim().is_empty() {
            errors.push(FieldError::new("lastName", "Last name is required"));
        }
        if Role::parse(&self.role).is_none() {
            errors.push(FieldError::new(
                "role",
                "Role must be student, lecturer, or admin",
            ));
        }
        errors
    }
}

pub fn grade(value: f64) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if value < 0.0 {
        errors.push(FieldError::new("grade", "Grade must be at least 0"));
    } else if value > 100.0 {
        errors.push(FieldError::new("grade", "Grade cannot exceed 100"));
    }
    errors
}

/// A submission needs some content: non-blank text, a file, or both.
pub fn submission_content(text: Option<&str>, has_file: bool) -> Vec<FieldError> {
    let has_text = text.map(str::trim).is_some_and(|t| !t.is_empty());
    if has_text || has_file {
        Vec::new()
    } else {
        vec![FieldError::new(
            "textSubmission",
            "Please provide either text submission or upload a file",
        )]
    }
}

/// Size is checked before type, and only the first problem is reported.
/// The extension is everything after the last dot, lowercased; a name with
/// no dot fails the type check.
pub fn check_file(
    field: &'static str,
    file_name: &str,
    size: u64,
    accepted: &[&str],
) -> Vec<FieldError> {
    if size > MAX_FILE_MB * 1024 * 1024 {
        return vec![FieldError::new(
            field,
            format!("File size must be less than {MAX_FILE_MB}MB"),
        )];
    }
    let extension = format!(
        ".{}",
        file_name.rsplit('.').next().unwrap_or("").to_lowercase()
    );
    if !accepted.contains(&extension.as_str()) {
        return vec![FieldError::new(
            field,
            format!("File type must be one of: {}", accepted.join(", ")),
        )];
    }
    Vec::new()
}
