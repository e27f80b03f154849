use crate::model::Role;
use serde::Serialize;

/// What a role may do, derived in exactly one place. Handlers gate on these
/// flags and view builders use them to decide which actions to offer, so
/// role checks never spread through the page logic.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub manage_courses: bool,
    pub assign_lecturers: bool,
    pub review_enrollments: bool,
    pub manage_assignments: bool,
    pub grade_submissions: bool,
    pub enroll: bool,
    pub submit_work: bool,
    pub view_own_grades: bool,
}

pub fn capabilities(role: Role) -> Capabilities {
    match role {
        Role::Student => Capabilities {
            manage_courses: false,
            assign_lecturers: false,
            review_enrollments: false,
            manage_assignments: false,
            grade_submissions: false,
            enroll: true,
            submit_work: true,
            view_own_grades: true,
        },
        Role::Lecturer => Capabilities {
            manage_courses: true,
            assign_lecturers: false,
            review_enrollments: false,
            manage_assignments: true,
            grade_submissions: true,
            enroll: false,
            submit_work: false,
            view_own_grades: false,
        },
        Role::Admin => Capabilities {
            manage_courses: true,
            assign_lecturers: true,
            review_enrollments: true,
            manage_assignments: false,
            grade_submissions: false,
            enroll: false,
            submit_work: false,
            view_own_grades: false,
        },
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub label: &'static str,
    pub route: &'static str,
}

/// Top navigation per role, same sets the shell always rendered.
pub fn nav_items(role: Role) -> Vec<NavItem> {
    let mut items = vec![NavItem {
        label: "Dashboard",
        route: "/dashboard",
    }];
    match role {
        Role::Student => items.push(NavItem {
            label: "Courses",
            route: "/courses",
        }),
        Role::Lecturer => items.push(NavItem {
            label: "My Courses",
            route: "/courses",
        }),
        Role::Admin => {
            items.push(NavItem {
                label: "Courses",
                route: "/courses",
            });
            items.push(NavItem {
                label: "Enrollments",
                route: "/enrollments",
            });
            items.push(NavItem {
                label: "Users",
                route: "/users",
            });
        }
    }
    items
}
