// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Permission-gating middleware for Axum.
//!
//! Each protected route carries its required [`Permission`] as middleware
//! state. On success the verified [`Claims`](super::Claims) are placed in
//! the request extensions, where the [`Auth`](super::Auth) extractor picks
//! them up.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let route = post(create_drink).route_layer(axum::middleware::from_fn_with_state(
//!     RequirePermission::new(gate.clone(), Permission::PostDrinks),
//!     require_permission,
//! ));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{gate::AuthGate, permissions::Permission};

/// Middleware state: the gate plus the permission one route requires.
#[derive(Clone)]
pub struct RequirePermission {
    gate: AuthGate,
    permission: Permission,
}

impl RequirePermission {
    pub fn new(gate: AuthGate, permission: Permission) -> Self {
        Self { gate, permission }
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }
}

/// Authorization middleware function.
pub async fn require_permission(
    State(required): State<RequirePermission>,
    mut request: Request,
    next: Next,
) -> Response {
    match required
        .gate
        .authorize(request.headers(), required.permission.as_str())
        .await
    {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}
