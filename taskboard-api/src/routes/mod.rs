/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `users`: Create and fetch users
/// - `projects`: Create projects
/// - `tasks`: Create tasks
/// - `assignments`: Assign tasks to users
/// - `todos`: Legacy todo list at the root
/// - `health`: Health check endpoint

pub mod assignments;
pub mod health;
pub mod projects;
pub mod tasks;
pub mod todos;
pub mod users;
