// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Wraps each request in a span, logs the outcome, and stamps error bodies with the id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use http::header::CONTENT_LENGTH;
use tracing::Instrument;

use crate::errors::{AppError, ErrorResponse};
use crate::logging::AppLogger;

/// Header carrying the request id in both directions
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Create a tracing span for HTTP requests
#[must_use]
pub fn create_request_span(method: &str, path: &str, request_id: &str) -> tracing::Span {
    tracing::info_span!(
        "http_request",
        method = %method,
        path = %path,
        request_id = %request_id,
        status_code = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    )
}

/// Run the request inside a span and emit one access log line
///
/// The request id is read from `x-request-id`, which the request-id layer sets
/// before this middleware runs. Error responses built from an [`AppError`]
/// are re-rendered with that id in their envelope.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_owned();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned);

    let span = create_request_span(&method, &path, request_id.as_deref().unwrap_or("unknown"));
    let started = Instant::now();
    let response = next.run(request).instrument(span.clone()).await;

    let status = response.status().as_u16();
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    span.record("status_code", status);
    span.record("duration_ms", duration_ms);
    span.in_scope(|| AppLogger::log_api_request(&method, &path, status, duration_ms));

    match request_id {
        Some(request_id) => attach_request_id(response, &request_id),
        None => response,
    }
}

/// Rewrite an `AppError` body so its envelope carries `request_id`
fn attach_request_id(response: Response, request_id: &str) -> Response {
    let (mut parts, body) = response.into_parts();
    let Some(error) = parts.extensions.remove::<Arc<AppError>>() else {
        return Response::from_parts(parts, body);
    };
    let Ok(error) = Arc::try_unwrap(error) else {
        return Response::from_parts(parts, body);
    };

    let envelope = ErrorResponse::from(error.with_request_id(request_id));
    match serde_json::to_vec(&envelope) {
        Ok(bytes) => {
            parts.headers.remove(CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to re-render error body");
            Response::from_parts(parts, body)
        }
    }
}
