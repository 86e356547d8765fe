// ABOUTME: Axum response conversion for AppError
// ABOUTME: Renders the JSON error envelope with the status mapped from the error code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use super::{AppError, ErrorResponse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;

impl IntoResponse for AppError {
    /// The error itself rides along in the response extensions as
    /// `Arc<AppError>` so outer middleware can re-render the envelope
    /// with request-scoped context.
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(code = ?self.code, message = %self.message, "Request failed");
        } else {
            tracing::debug!(code = ?self.code, message = %self.message, "Request rejected");
        }

        let mut response = (status, Json(ErrorResponse::from(&self))).into_response();
        response.extensions_mut().insert(Arc::new(self));
        response
    }
}
