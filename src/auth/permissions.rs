// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Permissions for authorization.

use std::fmt;

use super::error::{AuthError, ClaimsFault};
use super::Claims;

/// Capabilities the drinks API checks for.
///
/// ## Permission Set
///
/// - `GetDrinksDetail` - Read full recipes
/// - `PostDrinks` - Create drinks
/// - `PatchDrinks` - Edit drinks
/// - `DeleteDrinks` - Remove drinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    GetDrinksDetail,
    PostDrinks,
    PatchDrinks,
    DeleteDrinks,
}

impl Permission {
    /// The permission string as granted by the identity provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::GetDrinksDetail => "get:drinks-detail",
            Permission::PostDrinks => "post:drinks",
            Permission::PatchDrinks => "patch:drinks",
            Permission::DeleteDrinks => "delete:drinks",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check that verified claims grant `required`.
///
/// Membership is exact. An empty `required` is only satisfied by a token
/// that explicitly grants `""`; it does not mean "any authenticated user".
pub fn check_permissions(required: &str, claims: &Claims) -> Result<(), AuthError> {
    let granted = claims
        .permissions
        .as_ref()
        .ok_or(AuthError::InvalidClaims(ClaimsFault::PermissionsMissing))?;

    if !granted.contains(required) {
        return Err(AuthError::Unauthorized);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::Audience;

    fn claims_with(permissions: Option<&[&str]>) -> Claims {
        Claims {
            issuer: "https://tenant.eu.auth0.com/".to_string(),
            subject: "auth0|barista".to_string(),
            audience: Audience::One("drinks".to_string()),
            issued_at: Some(1700000000),
            expires_at: 1700003600,
            authorized_party: None,
            scope: None,
            permissions: permissions.map(|p| p.iter().map(|s| s.to_string()).collect()),
        }
    }

    #[test]
    fn granted_permission_passes() {
        let claims = claims_with(Some(&["get:drinks-detail", "post:drinks"]));
        assert!(check_permissions("post:drinks", &claims).is_ok());
    }

    #[test]
    fn missing_permissions_claim_is_invalid_claims() {
        let claims = claims_with(None);
        assert_eq!(
            check_permissions("post:drinks", &claims),
            Err(AuthError::InvalidClaims(ClaimsFault::PermissionsMissing))
        );
    }

    #[test]
    fn absent_permission_is_unauthorized() {
        let claims = claims_with(Some(&["get:drinks-detail"]));
        assert_eq!(
            check_permissions("delete:drinks", &claims),
            Err(AuthError::Unauthorized)
        );

        let empty = claims_with(Some(&[]));
        assert_eq!(check_permissions("post:drinks", &empty), Err(AuthError::Unauthorized));
    }

    #[test]
    fn empty_requirement_is_not_a_wildcard() {
        let claims = claims_with(Some(&["get:drinks-detail"]));
        assert_eq!(check_permissions("", &claims), Err(AuthError::Unauthorized));

        let granted_empty = claims_with(Some(&[""]));
        assert!(check_permissions("", &granted_empty).is_ok());
    }

    #[test]
    fn membership_is_exact() {
        let claims = claims_with(Some(&["POST:drinks", "post:drinks "]));
        assert_eq!(check_permissions("post:drinks", &claims), Err(AuthError::Unauthorized));
    }

    #[test]
    fn permission_strings_match_route_policy() {
        assert_eq!(Permission::GetDrinksDetail.as_str(), "get:drinks-detail");
        assert_eq!(Permission::PostDrinks.as_str(), "post:drinks");
        assert_eq!(Permission::DeleteDrinks.as_str(), "delete:drinks");
        assert_eq!(Permission::PatchDrinks.to_string(), "patch:drinks");
    }
}
