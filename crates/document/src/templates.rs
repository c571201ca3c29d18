//! Fixed technical-writing template text for each SRS section.
//!
//! Only the cover, purpose, scope and product perspective interpolate user input.

pub const TITLE: &str = "Software Requirements Specification (SRS)";

pub const UNTITLED_PROJECT: &str = "Untitled Project";
pub const NO_DESCRIPTION: &str = "No description provided.";
pub const NO_MEMBERS: &str = "(No members)";

/// `(term, meaning)` pairs, in display order.
pub const DEFINITIONS: [(&str, &str); 3] = [
    ("SRS", "Software Requirements Specification"),
    ("DBMS", "Database Management System"),
    ("KYC", "Know Your Customer (if applicable for the project)"),
];

pub const REFERENCES: &str = "Relevant documents and references include project proposal, design mockups, any API contracts, and applicable coding or security standards.";

pub const PRODUCT_FUNCTIONS: &str = "Key functions include: user authentication and role management, class/session creation by faculty, student joining via enrollment number, attendance capture and modification, monthly report generation in PDF/XLSX formats, and administrative management features.";

pub const USER_CHARACTERISTICS: &str = "Primary users are (1) Students — will join sessions using enrollment numbers, (2) Faculty — will create and manage attendance sessions and reports, and (3) Administrators — will manage users, audit logs, and system configuration.";

pub const GENERAL_CONSTRAINTS: &str = "The application must be responsive, work on modern mobile/desktop browsers, adhere to data privacy rules (as applicable), and operate with the chosen DBMS and hosting limits.";

pub const ASSUMPTIONS_DEPENDENCIES: &str = "Assumes stable network connectivity for users, availability of any external APIs (if used), and that user enrollment numbers are unique. Dependencies may include authentication services, email providers, and external data APIs.";

pub const FUNCTIONAL_REQUIREMENTS: [&str; 5] = [
    "FR-1: User login/logout with role-based access control (Student, Faculty, Admin).",
    "FR-2: Faculty can create attendance sessions with date/time and subject details.",
    "FR-3: Students can join sessions using unique enrollment numbers and mark attendance.",
    "FR-4: Admin can generate monthly attendance reports for any class in PDF/XLSX.",
    "FR-5: System must maintain attendance history and allow limited edits with audit logs.",
];

pub const EXTERNAL_INTERFACES: &str = "RESTful JSON API endpoints for frontend-backend communication. If integrations exist, define payload formats, auth methods (e.g., JWT), rate limits, and error handling.";

pub const NON_FUNCTIONAL_REQUIREMENTS: [&str; 4] = [
    "NFR-1: Performance — typical page load times < 2s on modern connections.",
    "NFR-2: Security — store passwords hashed, use HTTPS, follow OWASP best practices.",
    "NFR-3: Usability — responsive UI with clear workflows for students and faculty.",
    "NFR-4: Reliability — data must be backed up; system uptime target 99%.",
];

pub fn purpose(project_name: &str) -> String {
    format!(
        "The purpose of this document is to provide a comprehensive Software Requirements Specification (SRS) for the \"{project_name}\" project. \
         This SRS captures the objectives, scope, and formalized requirements to align stakeholders, designers, and developers."
    )
}

pub fn scope(project_name: &str, description: &str) -> String {
    format!(
        "The {project_name} aims to {description} \
         This SRS defines functional and non-functional requirements, external interfaces, constraints, and user characteristics required to deliver the system."
    )
}

pub fn product_perspective(project_name: &str) -> String {
    format!(
        "{project_name} is a standalone web-based system designed to integrate with existing college/staff systems as needed. \
         It provides a front-end UI for students and faculty and a backend API for data storage and reporting."
    )
}
