//! Request correlation for the lead API.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id echoed in every envelope's `meta.request_id`.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Reuses a caller's non-blank `x-request-id` (a browser front end can tag a
/// search and its pitches with one id) or mints a `UUIDv4`. Handlers read it
/// as `Extension<RequestId>`; the response carries it back in the header.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}
