// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, their defaults, and the
//! typed configuration loaded from them at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `AUTH0_DOMAIN` | Identity provider domain (token issuer) | `authtutorial.eu.auth0.com` |
//! | `API_AUDIENCE` | Expected JWT audience claim | `image` |
//! | `JWKS_URL` | Override for the JWKS endpoint | `https://{AUTH0_DOMAIN}/.well-known/jwks.json` |
//! | `JWKS_CACHE_TTL_SECS` | Key set cache TTL, `0` disables caching | `300` |
//! | `JWKS_REFRESH_COOLDOWN_SECS` | Minimum gap between refetches on unknown `kid` | `30` |
//! | `JWKS_FETCH_TIMEOUT_SECS` | HTTP timeout for the JWKS endpoint | `10` |
//! | `AUTH_FAILURE_POLICY` | `conceal` or `disclose` token failures | `conceal` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `SEED_SAMPLE_MENU` | Start with the sample drink | `false` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::auth::jwks::{DEFAULT_CACHE_TTL, DEFAULT_FETCH_TIMEOUT, DEFAULT_REFRESH_COOLDOWN};
use crate::auth::{KeySetFetcher, VerificationFailurePolicy};
use crate::telemetry::LogFormat;

pub const AUTH0_DOMAIN_ENV: &str = "AUTH0_DOMAIN";
pub const API_AUDIENCE_ENV: &str = "API_AUDIENCE";
pub const JWKS_URL_ENV: &str = "JWKS_URL";
pub const JWKS_CACHE_TTL_ENV: &str = "JWKS_CACHE_TTL_SECS";
pub const JWKS_REFRESH_COOLDOWN_ENV: &str = "JWKS_REFRESH_COOLDOWN_SECS";
pub const JWKS_FETCH_TIMEOUT_ENV: &str = "JWKS_FETCH_TIMEOUT_SECS";
pub const AUTH_FAILURE_POLICY_ENV: &str = "AUTH_FAILURE_POLICY";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const SEED_SAMPLE_MENU_ENV: &str = "SEED_SAMPLE_MENU";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_AUTH0_DOMAIN: &str = "authtutorial.eu.auth0.com";
pub const DEFAULT_API_AUDIENCE: &str = "image";
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Token verification settings.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub domain: String,
    pub audience: String,
    pub jwks_url: Url,
    pub cache_ttl: Duration,
    pub refresh_cooldown: Duration,
    pub fetch_timeout: Duration,
    pub failure_policy: VerificationFailurePolicy,
}

impl AuthSettings {
    /// Expected `iss` claim for the configured domain.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
    pub seed_sample_menu: bool,
    pub log_format: LogFormat,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub auth: AuthSettings,
    pub server: ServerSettings,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let domain = get(AUTH0_DOMAIN_ENV).unwrap_or_else(|| DEFAULT_AUTH0_DOMAIN.to_string());
        let audience = get(API_AUDIENCE_ENV).unwrap_or_else(|| DEFAULT_API_AUDIENCE.to_string());

        let jwks_url = match get(JWKS_URL_ENV) {
            Some(raw) => Url::parse(&raw).map_err(|e| invalid(JWKS_URL_ENV, &raw, e))?,
            None => KeySetFetcher::url_for_domain(&domain)
                .map_err(|e| invalid(AUTH0_DOMAIN_ENV, &domain, e))?,
        };

        let auth = AuthSettings {
            jwks_url,
            cache_ttl: seconds(&get, JWKS_CACHE_TTL_ENV)?.unwrap_or(DEFAULT_CACHE_TTL),
            refresh_cooldown: seconds(&get, JWKS_REFRESH_COOLDOWN_ENV)?
                .unwrap_or(DEFAULT_REFRESH_COOLDOWN),
            fetch_timeout: seconds(&get, JWKS_FETCH_TIMEOUT_ENV)?.unwrap_or(DEFAULT_FETCH_TIMEOUT),
            failure_policy: parsed(&get, AUTH_FAILURE_POLICY_ENV)?.unwrap_or_default(),
            domain,
            audience,
        };

        let server = ServerSettings {
            host: parsed(&get, HOST_ENV)?.unwrap_or(DEFAULT_HOST),
            port: parsed(&get, PORT_ENV)?.unwrap_or(DEFAULT_PORT),
            seed_sample_menu: parsed(&get, SEED_SAMPLE_MENU_ENV)?.unwrap_or(false),
            log_format: parsed(&get, LOG_FORMAT_ENV)?.unwrap_or_default(),
        };

        Ok(Self { auth, server })
    }
}

fn invalid(var: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parsed<T, G>(get: &G, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
    G: Fn(&str) -> Option<String>,
{
    get(var)
        .map(|raw| raw.trim().parse::<T>().map_err(|e| invalid(var, &raw, e)))
        .transpose()
}

fn seconds<G>(get: &G, var: &'static str) -> Result<Option<Duration>, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    Ok(parsed::<u64, _>(get, var)?.map(Duration::from_secs))
}
