// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWKS (JSON Web Key Set) fetching and caching.
//!
//! ## Behaviour
//!
//! - [`KeySetFetcher`] performs one HTTP GET against the provider's
//!   `/.well-known/jwks.json` per call.
//! - [`JwksCache`] keeps the last fetched key set for a configurable TTL.
//!   A TTL of zero disables caching entirely.
//! - A `kid` missing from a cached set triggers one refetch, so a key
//!   rotation at the provider is picked up without waiting for the TTL.
//!   Refetches are spaced by a cooldown.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use jsonwebtoken::DecodingKey;
use serde::Deserialize;
use tokio::sync::RwLock;
use url::Url;

use super::error::{AuthError, HeaderFault};

/// Default JWKS cache TTL (5 minutes).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Default minimum gap between forced refetches on an unknown `kid`.
pub const DEFAULT_REFRESH_COOLDOWN: Duration = Duration::from_secs(30);

/// Default HTTP timeout for the JWKS endpoint.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// A public key published by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDescriptor {
    pub key_id: String,
    pub key_type: String,
    pub usage: Option<String>,
    pub modulus: Option<String>,
    pub exponent: Option<String>,
}

impl KeyDescriptor {
    /// Build an RS256 decoding key from the descriptor's RSA components.
    pub fn decoding_key(&self) -> Result<DecodingKey, AuthError> {
        if self.key_type != "RSA" {
            tracing::debug!(kid = %self.key_id, kty = %self.key_type, "Unsupported key type");
            return Err(AuthError::InvalidHeader(HeaderFault::Unparseable));
        }

        let (Some(n), Some(e)) = (&self.modulus, &self.exponent) else {
            tracing::debug!(kid = %self.key_id, "RSA key is missing its modulus or exponent");
            return Err(AuthError::InvalidHeader(HeaderFault::Unparseable));
        };

        DecodingKey::from_rsa_components(n, e).map_err(|e| {
            tracing::debug!(kid = %self.key_id, error = %e, "Failed to build RSA key");
            AuthError::InvalidHeader(HeaderFault::Unparseable)
        })
    }
}

/// Wire shape of the JWKS document.
#[derive(Debug, Deserialize)]
struct JwksDocument {
    keys: Vec<JwkEntry>,
}

#[derive(Debug, Deserialize)]
struct JwkEntry {
    #[serde(default)]
    kid: Option<String>,
    kty: String,
    #[serde(default, rename = "use")]
    usage: Option<String>,
    #[serde(default)]
    n: Option<String>,
    #[serde(default)]
    e: Option<String>,
}

/// The provider's key set, indexed by key ID.
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    keys: HashMap<String, KeyDescriptor>,
}

impl KeySet {
    /// Parse a JWKS JSON document. Entries without a `kid` are skipped.
    pub fn from_json(bytes: &[u8]) -> Result<Self, AuthError> {
        let document: JwksDocument = serde_json::from_slice(bytes)
            .map_err(|e| AuthError::KeySetUnavailable(format!("invalid JWKS document: {e}")))?;
        Ok(Self::from_document(document))
    }

    fn from_document(document: JwksDocument) -> Self {
        let keys = document
            .keys
            .into_iter()
            .filter_map(|entry| {
                let key_id = entry.kid?;
                Some((
                    key_id.clone(),
                    KeyDescriptor {
                        key_id,
                        key_type: entry.kty,
                        usage: entry.usage,
                        modulus: entry.n,
                        exponent: entry.e,
                    },
                ))
            })
            .collect();
        Self { keys }
    }

    pub fn get(&self, kid: &str) -> Option<&KeyDescriptor> {
        self.keys.get(kid)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Fetches the identity provider's key set over HTTPS.
#[derive(Clone)]
pub struct KeySetFetcher {
    jwks_url: Url,
    client: reqwest::Client,
}

impl KeySetFetcher {
    /// Create a fetcher for the given JWKS URL.
    pub fn new(jwks_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(jwks_url, client))
    }

    /// Create a fetcher that uses an already configured HTTP client.
    pub fn with_client(jwks_url: Url, client: reqwest::Client) -> Self {
        Self { jwks_url, client }
    }

    /// Derive the JWKS URL for an issuer domain.
    pub fn url_for_domain(domain: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!("https://{domain}/.well-known/jwks.json"))
    }

    pub fn jwks_url(&self) -> &Url {
        &self.jwks_url
    }

    /// Fetch and parse the key set. One outbound request per call.
    pub async fn fetch(&self) -> Result<KeySet, AuthError> {
        let response = self
            .client
            .get(self.jwks_url.clone())
            .send()
            .await
            .map_err(|e| AuthError::KeySetUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::KeySetUnavailable(format!(
                "HTTP {} from JWKS endpoint",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AuthError::KeySetUnavailable(e.to_string()))?;

        let keys = KeySet::from_json(&body)?;
        tracing::debug!(url = %self.jwks_url, key_count = keys.len(), "Fetched JWKS");
        Ok(keys)
    }
}

/// JWKS cache entry.
struct CacheEntry {
    keys: Arc<KeySet>,
    fetched_at: Instant,
}

/// Outcome of the most recent refresh.
#[derive(Clone, Copy)]
struct FetchAttempt {
    at: Instant,
    succeeded: bool,
}

/// Time-bounded cache over a [`KeySetFetcher`] for a single issuer.
pub struct JwksCache {
    fetcher: KeySetFetcher,
    cache_ttl: Duration,
    refresh_cooldown: Duration,
    cache: RwLock<Option<CacheEntry>>,
    last_attempt: RwLock<Option<FetchAttempt>>,
}

impl JwksCache {
    pub fn new(fetcher: KeySetFetcher) -> Self {
        Self {
            fetcher,
            cache_ttl: DEFAULT_CACHE_TTL,
            refresh_cooldown: DEFAULT_REFRESH_COOLDOWN,
            cache: RwLock::new(None),
            last_attempt: RwLock::new(None),
        }
    }

    /// Set the cache TTL. Zero disables caching.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_refresh_cooldown(mut self, cooldown: Duration) -> Self {
        self.refresh_cooldown = cooldown;
        self
    }

    pub fn jwks_url(&self) -> &Url {
        self.fetcher.jwks_url()
    }

    /// Look up the key with the given ID.
    pub async fn key_for(&self, kid: &str) -> Result<KeyDescriptor, AuthError> {
        if self.cache_ttl.is_zero() {
            let keys = self.fetcher.fetch().await?;
            return keys.get(kid).cloned().ok_or(no_matching_key());
        }

        let (keys, fetched_at) = match self.cached().await {
            Some(entry) => entry,
            None => (self.refresh().await?, Instant::now()),
        };

        if let Some(key) = keys.get(kid) {
            return Ok(key.clone());
        }

        if fetched_at.elapsed() < self.refresh_cooldown {
            tracing::debug!(kid, "Unknown key id, JWKS refreshed too recently to refetch");
            return Err(no_matching_key());
        }

        tracing::info!(kid, "Unknown key id, refreshing JWKS");
        let keys = self.refresh().await?;
        keys.get(kid).cloned().ok_or(no_matching_key())
    }

    /// Force refresh the JWKS cache.
    pub async fn refresh(&self) -> Result<Arc<KeySet>, AuthError> {
        let fetched = self.fetcher.fetch().await;
        *self.last_attempt.write().await = Some(FetchAttempt {
            at: Instant::now(),
            succeeded: fetched.is_ok(),
        });

        let keys = Arc::new(fetched?);
        let mut cache = self.cache.write().await;
        *cache = Some(CacheEntry {
            keys: Arc::clone(&keys),
            fetched_at: Instant::now(),
        });
        Ok(keys)
    }

    /// Check if a key set is currently cached and within its TTL.
    pub async fn is_cached(&self) -> bool {
        self.cached().await.is_some()
    }

    /// Whether signing keys can be obtained.
    ///
    /// Answers from the cache, or from the last refresh while it is within
    /// the refresh cooldown. Only otherwise does it fetch.
    pub async fn check_available(&self) -> bool {
        if self.is_cached().await {
            return true;
        }

        let last_attempt = *self.last_attempt.read().await;
        if let Some(attempt) = last_attempt {
            if attempt.at.elapsed() < self.refresh_cooldown {
                return attempt.succeeded;
            }
        }

        match self.refresh().await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, jwks_url = %self.jwks_url(), "JWKS unavailable");
                false
            }
        }
    }

    async fn cached(&self) -> Option<(Arc<KeySet>, Instant)> {
        let cache = self.cache.read().await;
        cache
            .as_ref()
            .filter(|entry| entry.fetched_at.elapsed() < self.cache_ttl)
            .map(|entry| (Arc::clone(&entry.keys), entry.fetched_at))
    }
}

fn no_matching_key() -> AuthError {
    AuthError::InvalidHeader(HeaderFault::NoMatchingKey)
}
