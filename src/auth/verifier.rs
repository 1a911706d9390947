// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Access token verification against the identity provider's JWKS.

use std::sync::Arc;

use jsonwebtoken::{decode, decode_header, errors::ErrorKind, Algorithm, Validation};

use super::error::{AuthError, ClaimsFault, HeaderFault};
use super::jwks::JwksCache;
use super::Claims;

/// No grace period: a token is rejected from its `exp` second on.
const EXPIRY_LEEWAY: u64 = 0;

/// The only signature algorithm accepted.
const ALGORITHM: Algorithm = Algorithm::RS256;

/// Verifies RS256 access tokens issued for one audience by one issuer.
pub struct TokenVerifier {
    keys: Arc<JwksCache>,
    issuer: String,
    audience: String,
}

impl TokenVerifier {
    /// # Arguments
    /// - `keys`: key cache for the issuer's JWKS
    /// - `issuer`: expected `iss`, e.g. `https://tenant.eu.auth0.com/`
    /// - `audience`: expected `aud`
    pub fn new(keys: Arc<JwksCache>, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            keys,
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn keys(&self) -> &JwksCache {
        &self.keys
    }

    /// Verify a raw credential and return its claims.
    ///
    /// The signature is checked before any claim is looked at; expiry,
    /// audience and issuer are only evaluated on a signature-valid token.
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header =
            decode_header(token).map_err(|_| AuthError::InvalidHeader(HeaderFault::Unparseable))?;
        let kid = header
            .kid
            .ok_or(AuthError::InvalidHeader(HeaderFault::MissingKeyId))?;

        let key = self.keys.key_for(&kid).await?;
        let decoding_key = key.decoding_key()?;

        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = EXPIRY_LEEWAY;
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => {
                    AuthError::InvalidClaims(ClaimsFault::AudienceOrIssuer)
                }
                ErrorKind::MissingRequiredClaim(claim) if matches!(claim.as_str(), "iss" | "aud") => {
                    AuthError::InvalidClaims(ClaimsFault::AudienceOrIssuer)
                }
                _ => {
                    tracing::debug!(kid = %kid, error = %e, "Token rejected");
                    AuthError::InvalidHeader(HeaderFault::Unparseable)
                }
            }
        })?;

        let claims = token_data.claims;
        tracing::debug!(
            subject = %claims.subject,
            kid = %kid,
            expires_at = ?claims.expiry(),
            "Token verified"
        );
        Ok(claims)
    }
}
