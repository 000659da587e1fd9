//! Request origin extraction for building self-referential resource URLs.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use std::convert::Infallible;

/// Header set by reverse proxies terminating TLS
pub const FORWARDED_PROTO_HEADER: &str = "x-forwarded-proto";

/// Scheme and host of the inbound request
///
/// The scheme comes from `X-Forwarded-Proto`, then the request URI, falling
/// back to `http`. The host comes from the `Host` header, then the URI
/// authority, falling back to `localhost`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub scheme: String,
    pub host: String,
}

impl RequestOrigin {
    /// Builds `{scheme}://{host}/{collection}/{id}`
    pub fn resource_url(&self, collection: &str, id: i32) -> String {
        format!("{}://{}/{}/{}", self.scheme, self.host, collection, id)
    }

    /// Builds `{scheme}://{host}/{id}` for resources mounted at the root
    pub fn root_url(&self, id: i32) -> String {
        format!("{}://{}/{}", self.scheme, self.host, id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestOrigin
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let scheme = parts
            .headers
            .get(FORWARDED_PROTO_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .filter(|v| !v.is_empty())
            .or_else(|| parts.uri.scheme_str().map(str::to_string))
            .unwrap_or_else(|| "http".to_string());

        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or_else(|| parts.uri.authority().map(|a| a.to_string()))
            .unwrap_or_else(|| "localhost".to_string());

        Ok(RequestOrigin { scheme, host })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn origin_of(request: Request<()>) -> RequestOrigin {
        let (mut parts, _) = request.into_parts();
        RequestOrigin::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_origin_from_host_header() {
        let origin = origin_of(
            Request::builder()
                .uri("/users")
                .header("host", "api.example.com:5000")
                .body(())
                .unwrap(),
        )
        .await;

        assert_eq!(origin.scheme, "http");
        assert_eq!(origin.host, "api.example.com:5000");
        assert_eq!(
            origin.resource_url("users", 1),
            "http://api.example.com:5000/users/1"
        );
    }

    #[tokio::test]
    async fn test_origin_prefers_forwarded_proto() {
        let origin = origin_of(
            Request::builder()
                .uri("/tasks")
                .header("host", "example.com")
                .header("x-forwarded-proto", "HTTPS, http")
                .body(())
                .unwrap(),
        )
        .await;

        assert_eq!(origin.resource_url("tasks", 7), "https://example.com/tasks/7");
        assert_eq!(origin.root_url(7), "https://example.com/7");
    }

    #[tokio::test]
    async fn test_origin_falls_back_to_uri_authority() {
        let origin = origin_of(
            Request::builder()
                .uri("https://internal:8443/projects")
                .body(())
                .unwrap(),
        )
        .await;

        assert_eq!(origin.scheme, "https");
        assert_eq!(origin.host, "internal:8443");
    }
}
