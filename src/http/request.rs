//! Request ID handling.
//!
//! # Responsibilities
//! - Assign a UUID v4 request ID as early as possible for tracing
//! - Preserve an inbound `x-request-id` when the caller supplies one
//! - Echo the ID on the response

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Middleware assigning (or propagating) the request ID.
pub async fn request_id_middleware(mut request: Request<Body>, next: Next) -> Response {
    let id = match request.headers().get(X_REQUEST_ID) {
        Some(existing) => existing.clone(),
        None => HeaderValue::from_str(&Uuid::new_v4().to_string())
            .expect("uuid is a valid header value"),
    };

    request.headers_mut().insert(X_REQUEST_ID, id.clone());

    let mut response = next.run(request).await;
    response.headers_mut().insert(X_REQUEST_ID, id);
    response
}
