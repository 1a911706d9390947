// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Bearer token authentication and permission checks for the drinks API.
//!
//! ## Auth Flow
//!
//! 1. The frontend logs the user in with the identity provider (Auth0)
//! 2. Requests carry `Authorization: Bearer <access token>`
//! 3. For each protected route the server:
//!    - Extracts the bearer credential from the header
//!    - Looks up the token's `kid` in the provider's JWKS (cached with TTL)
//!    - Verifies the RS256 signature, then expiry, issuer and audience
//!    - Requires the route's permission in the `permissions` claim
//!
//! ## Security
//!
//! - Verification failures are concealed behind a flat 401 by default
//! - Permission failures keep their distinct 400/403 status
//! - Only RS256 is accepted
//! - Expiry is enforced without clock skew leeway

pub mod claims;
pub mod error;
pub mod extractor;
pub mod gate;
pub mod header;
pub mod jwks;
pub mod middleware;
pub mod permissions;
pub mod verifier;

#[cfg(test)]
pub mod testutil;

pub use claims::Claims;
pub use error::AuthError;
pub use extractor::Auth;
pub use gate::{AuthGate, VerificationFailurePolicy};
pub use jwks::{JwksCache, KeySetFetcher};
pub use middleware::{require_permission, RequirePermission};
pub use permissions::Permission;
pub use verifier::TokenVerifier;
