// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Drinks Server - Café Menu API
//!
//! A drink menu service whose write and detail routes are gated by bearer
//! tokens issued by an Auth0 tenant.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Bearer token verification against the tenant JWKS, and permission checks
//! - `store` - In-memory drink store
//! - `config` - Environment configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
pub mod telemetry;
