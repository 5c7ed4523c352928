pub mod admin_dashboard;
pub mod admin_login;
pub mod submission_status;
pub mod submit;
