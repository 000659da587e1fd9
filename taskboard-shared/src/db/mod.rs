/// Database layer for Taskboard
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with a startup health check
/// - `migrations`: Embedded migration runner
///
/// Row types and their queries are in the `models` module.

pub mod migrations;
pub mod pool;
