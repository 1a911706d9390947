// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for verified claims.
//!
//! Use the `Auth` extractor as the first handler argument:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(claims): Auth) -> impl IntoResponse {
//!     // claims is the verified Claims
//! }
//! ```

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use super::{AuthError, AuthGate, Claims};

/// Extractor for verified claims.
///
/// Behind [`require_permission`](super::require_permission) this hands the
/// handler the claims the middleware already verified. On a route without
/// that middleware it authenticates the request itself, without any
/// permission check.
pub struct Auth(pub Claims);

impl<S> FromRequestParts<S> for Auth
where
    AuthGate: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // First check if middleware already verified the token
        if let Some(claims) = parts.extensions.get::<Claims>().cloned() {
            return Ok(Auth(claims));
        }

        let gate = AuthGate::from_ref(state);
        let claims = gate.authenticate(&parts.headers).await?;
        Ok(Auth(claims))
    }
}
