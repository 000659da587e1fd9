/// Middleware modules for the API server
///
/// - `error_details`: Development-only error causes in 500 responses

pub mod error_details;
