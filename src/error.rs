// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Non-auth API errors.
//!
//! The response body always carries the fixed message for its status
//! (`"BAD REQUEST"`, `"RESOURCE NOT FOUND"`, `"NOT PROCESSABLE"`). The
//! specific cause is kept in [`ApiError::detail`] and logged.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    /// Cause of the failure, for logs only.
    pub detail: String,
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, detail)
    }

    /// The message rendered to the caller.
    pub fn message(&self) -> &'static str {
        match self.status {
            StatusCode::BAD_REQUEST => "BAD REQUEST",
            StatusCode::NOT_FOUND => "RESOURCE NOT FOUND",
            StatusCode::UNPROCESSABLE_ENTITY => "NOT PROCESSABLE",
            other => other.canonical_reason().unwrap_or("ERROR"),
        }
    }
}

/// Well-formed JSON of the wrong shape is 422, anything else is 400.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => Self::unprocessable(e.body_text()),
            other => Self::bad_request(other.body_text()),
        }
    }
}

/// A non-numeric drink ID names no drink.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::not_found(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::info!(status = self.status.as_u16(), detail = %self.detail, "Request failed");
        let body = Json(ErrorBody {
            success: false,
            error: self.status.as_u16(),
            message: self.message(),
        });
        (self.status, body).into_response()
    }
}
