/// Error detail middleware
///
/// In development, responses produced from `ApiError::InternalError` are
/// re-rendered with the underlying cause in a `cause` field. In production and
/// test modes the extension is dropped and the body is left untouched.

use crate::{app::AppState, error::ErrorCause};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

/// Echoes 500 causes into the body when the environment allows it
pub async fn attach_error_details(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let mut response = next.run(req).await;

    let Some(ErrorCause { mut body, cause }) = response.extensions_mut().remove::<ErrorCause>()
    else {
        return response;
    };

    if !state.config.api.environment.exposes_error_details() {
        return response;
    }

    body.cause = Some(cause);
    (response.status(), Json(body)).into_response()
}
