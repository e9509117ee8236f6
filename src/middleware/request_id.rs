use axum::{
    body::Body,
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::fmt::Display;
use uuid::Uuid;

/// HTTP header carrying the request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlates the log lines of one carousel request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Reuses a caller-supplied id when it is a valid UUID
    fn from_request(request: &Request) -> Self {
        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .map(RequestId)
            .unwrap_or_default()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stores a request ID in the request extensions and echoes it back
/// in the response headers.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    // Reuse the caller's id, otherwise generate a new one
    let request_id = RequestId::from_request(&request);

    // Store in request extensions for handlers to access
    request.extensions_mut().insert(request_id);

    let mut response = next.run(request).await;

    // Echo the id back to the caller
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Span for `TraceLayer`, tagged with the request ID when present
pub fn make_span_with_request_id(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
