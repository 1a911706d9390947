// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and authorization errors.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Why a token's header could not be used to select a verification key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFault {
    /// The token header carries no `kid`.
    MissingKeyId,
    /// No key in the provider's key set has the token's `kid`.
    NoMatchingKey,
    /// The token could not be decoded or its signature did not verify.
    Unparseable,
}

impl fmt::Display for HeaderFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderFault::MissingKeyId => write!(f, "Authorization malformed."),
            HeaderFault::NoMatchingKey => write!(f, "Unable to find the appropriate key."),
            HeaderFault::Unparseable => write!(f, "Unable to parse authentication token."),
        }
    }
}

/// Which claim-level rule a token failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimsFault {
    /// `aud` or `iss` does not match the configured values.
    AudienceOrIssuer,
    /// The token has no `permissions` claim at all.
    PermissionsMissing,
}

impl fmt::Display for ClaimsFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimsFault::AudienceOrIssuer => {
                write!(f, "Incorrect claims. Please, check the audience and issuer.")
            }
            ClaimsFault::PermissionsMissing => write!(f, "Permissions not included in JWT."),
        }
    }
}

/// Authentication error type.
///
/// Every stage of the auth gate fails with one of these. Each variant maps
/// to a symbolic code, a human description (its `Display`) and an HTTP
/// status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No authorization header present
    #[error("Authorization header is expected.")]
    MissingHeader,
    /// Authorization header is not `Bearer <token>`
    #[error("Authorization header must be of the form 'Bearer <token>'.")]
    MalformedHeader,
    /// Token header is unusable for key selection or decoding
    #[error("{0}")]
    InvalidHeader(HeaderFault),
    /// Identity provider key set could not be fetched or parsed
    #[error("Unable to fetch signing keys: {0}")]
    KeySetUnavailable(String),
    /// Token has expired
    #[error("Token expired.")]
    TokenExpired,
    /// Token claims do not satisfy the configured policy
    #[error("{0}")]
    InvalidClaims(ClaimsFault),
    /// Token lacks the permission the operation requires
    #[error("Permission not found.")]
    Unauthorized,
    /// Flat rejection returned in place of a concealed verification failure
    #[error("Authentication required.")]
    Unauthenticated,
}

#[derive(Serialize)]
struct AuthErrorBody {
    success: bool,
    error: u16,
    code: &'static str,
    message: String,
}

impl AuthError {
    /// Get the symbolic error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "authorization_header_missing",
            AuthError::MalformedHeader | AuthError::InvalidHeader(_) => "invalid_header",
            AuthError::KeySetUnavailable(_) => "key_set_unavailable",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidClaims(_) => "invalid_claims",
            AuthError::Unauthorized => "unauthorized",
            AuthError::Unauthenticated => "unauthenticated",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingHeader
            | AuthError::MalformedHeader
            | AuthError::InvalidHeader(HeaderFault::MissingKeyId)
            | AuthError::TokenExpired
            | AuthError::InvalidClaims(ClaimsFault::AudienceOrIssuer)
            | AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::InvalidHeader(HeaderFault::NoMatchingKey | HeaderFault::Unparseable)
            | AuthError::InvalidClaims(ClaimsFault::PermissionsMissing) => StatusCode::BAD_REQUEST,
            AuthError::Unauthorized => StatusCode::FORBIDDEN,
            AuthError::KeySetUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            success: false,
            error: status.as_u16(),
            code: self.error_code(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn missing_header_returns_401() {
        let response = AuthError::MissingHeader.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 401);
        assert_eq!(body["code"], "authorization_header_missing");
    }

    #[tokio::test]
    async fn unauthorized_returns_403_with_description() {
        let response = AuthError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["code"], "unauthorized");
        assert_eq!(body["message"], "Permission not found.");
    }

    #[test]
    fn invalid_header_status_depends_on_fault() {
        assert_eq!(
            AuthError::InvalidHeader(HeaderFault::MissingKeyId).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::InvalidHeader(HeaderFault::NoMatchingKey).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::InvalidHeader(HeaderFault::Unparseable).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn invalid_claims_status_depends_on_fault() {
        let claims = AuthError::InvalidClaims(ClaimsFault::AudienceOrIssuer);
        assert_eq!(claims.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(claims.error_code(), "invalid_claims");

        let permissions = AuthError::InvalidClaims(ClaimsFault::PermissionsMissing);
        assert_eq!(permissions.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(permissions.to_string(), "Permissions not included in JWT.");
    }

    #[test]
    fn key_set_unavailable_is_service_unavailable() {
        let err = AuthError::KeySetUnavailable("connection refused".to_string());
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(err.to_string().contains("connection refused"));
    }
}
