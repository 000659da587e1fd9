/// Application state and router builder
///
/// This module defines the shared application state and the route table,
/// and folds the table into an Axum router with its middleware stack.
///
/// # Example
///
/// ```no_run
/// use taskboard_api::{app::AppState, config::Config};
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskboard_shared::store::postgres::PgStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     ..Default::default()
/// })
/// .await?;
/// let state = AppState::new(PgStore::new(pool), config);
/// let app = taskboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::error_details::attach_error_details, routes};
use axum::{
    routing::{get, post, MethodRouter},
    Router,
};
use std::sync::Arc;
use taskboard_shared::store::Store;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway
    pub store: Arc<dyn Store>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: impl Store + 'static, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    /// Creates state around a store that the caller keeps a handle to
    pub fn with_shared_store(store: Arc<dyn Store>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// The route table: every path with the methods it serves
///
/// ```text
/// /
/// ├── GET, POST, DELETE  /                  # Todo list, create, clear
/// ├── GET, PATCH, DELETE /:id               # Todo get, merge, delete
/// ├── POST               /users             # Create user
/// ├── GET                /users/:id         # Fetch user
/// ├── POST               /projects          # Create project
/// ├── POST               /tasks             # Create task
/// ├── POST               /assign/:task_id   # Assign task to user
/// └── GET                /health            # Store connectivity
/// ```
///
/// Static segments take priority over `/:id`, so `/users` and `/health`
/// never reach the todo handlers.
pub fn route_table() -> Vec<(&'static str, MethodRouter<AppState>)> {
    vec![
        (
            "/",
            get(routes::todos::list_todos)
                .post(routes::todos::create_todo)
                .delete(routes::todos::clear_todos),
        ),
        (
            "/:id",
            get(routes::todos::get_todo)
                .patch(routes::todos::update_todo)
                .delete(routes::todos::delete_todo),
        ),
        ("/users", post(routes::users::create_user)),
        ("/users/:id", get(routes::users::get_user)),
        ("/projects", post(routes::projects::create_project)),
        ("/tasks", post(routes::tasks::create_task)),
        ("/assign/:task_id", post(routes::assignments::assign_task)),
        ("/health", get(routes::health::health_check)),
    ]
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Error details (development only, echoes 500 causes)
/// 2. Logging (tower-http TraceLayer)
pub fn build_router(state: AppState) -> Router {
    let router = route_table()
        .into_iter()
        .fold(Router::new(), |router, (path, handler)| router.route(path, handler));

    router
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            attach_error_details,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
