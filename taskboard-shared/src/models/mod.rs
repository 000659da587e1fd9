/// Database models for Taskboard
///
/// This module contains the row types and their single-statement queries.
/// Nothing here validates input; the `domain` module does that before any
/// of these are called.
///
/// # Models
///
/// - `user`: User accounts
/// - `project`: Projects owned by users
/// - `task`: Tasks belonging to projects
/// - `assignment`: Task to user assignments
/// - `todo`: Legacy todo list items

pub mod assignment;
pub mod project;
pub mod task;
pub mod todo;
pub mod user;
