// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The auth gate: extract, verify, check, invoke.

use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;

use axum::http::HeaderMap;

use super::{header::bearer_token, permissions::check_permissions, AuthError, Claims, TokenVerifier};

/// What the gate tells a caller whose token failed before claims existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerificationFailurePolicy {
    /// Log the specific failure and answer with a flat
    /// [`AuthError::Unauthenticated`].
    #[default]
    Conceal,
    /// Return the specific failure. Development use only.
    Disclose,
}

impl FromStr for VerificationFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "conceal" => Ok(Self::Conceal),
            "disclose" => Ok(Self::Disclose),
            other => Err(format!("unknown auth failure policy '{other}'")),
        }
    }
}

/// Guard wrapped around protected operations.
#[derive(Clone)]
pub struct AuthGate {
    verifier: Arc<TokenVerifier>,
    policy: VerificationFailurePolicy,
}

impl AuthGate {
    pub fn new(verifier: Arc<TokenVerifier>) -> Self {
        Self {
            verifier,
            policy: VerificationFailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: VerificationFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    pub fn policy(&self) -> VerificationFailurePolicy {
        self.policy
    }

    /// Extract and verify the bearer token in `headers`.
    ///
    /// Failures are filtered through the gate's
    /// [`VerificationFailurePolicy`].
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let verified = match bearer_token(headers) {
            Ok(token) => self.verifier.verify(token).await,
            Err(e) => Err(e),
        };
        verified.map_err(|e| self.apply_policy(e))
    }

    /// Authenticate, then require `permission`.
    ///
    /// Permission failures (400/403) are returned as-is under every policy.
    pub async fn authorize(&self, headers: &HeaderMap, permission: &str) -> Result<Claims, AuthError> {
        let claims = self.authenticate(headers).await?;
        if let Err(e) = check_permissions(permission, &claims) {
            tracing::info!(
                subject = %claims.subject,
                permission,
                code = e.error_code(),
                "Permission check failed"
            );
            return Err(e);
        }
        Ok(claims)
    }

    /// Run `operation` with the verified claims if `headers` carry a token
    /// granting `permission`. The operation is not invoked otherwise.
    pub async fn guard<F, Fut, T, E>(
        &self,
        headers: &HeaderMap,
        permission: &str,
        operation: F,
    ) -> Result<T, E>
    where
        F: FnOnce(Claims) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<AuthError>,
    {
        let claims = self.authorize(headers, permission).await?;
        operation(claims).await
    }

    fn apply_policy(&self, err: AuthError) -> AuthError {
        tracing::warn!(
            code = err.error_code(),
            status = err.status_code().as_u16(),
            reason = %err,
            "Cannot verify bearer token"
        );
        match self.policy {
            VerificationFailurePolicy::Conceal => AuthError::Unauthenticated,
            VerificationFailurePolicy::Disclose => err,
        }
    }
}
