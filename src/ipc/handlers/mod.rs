pub mod assignments;
pub mod auth;
pub mod core;
pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod grades;
pub mod submissions;
