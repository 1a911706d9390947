// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use drinks_server::{
    api::router,
    auth::{AuthGate, JwksCache, KeySetFetcher, TokenVerifier},
    config::Config,
    state::AppState,
    store::DrinkStore,
    telemetry::init_tracing,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing(config.server.log_format)?;

    let auth = &config.auth;
    let fetcher = KeySetFetcher::new(auth.jwks_url.clone(), auth.fetch_timeout)?;
    let keys = JwksCache::new(fetcher)
        .with_cache_ttl(auth.cache_ttl)
        .with_refresh_cooldown(auth.refresh_cooldown);
    let verifier = TokenVerifier::new(Arc::new(keys), auth.issuer(), auth.audience.clone());
    let gate = AuthGate::new(Arc::new(verifier)).with_policy(auth.failure_policy);

    tracing::info!(
        issuer = %gate.verifier().issuer(),
        audience = %gate.verifier().audience(),
        jwks_url = %gate.verifier().keys().jwks_url(),
        cache_ttl_secs = auth.cache_ttl.as_secs(),
        policy = ?gate.policy(),
        "Token verification configured"
    );

    let store = if config.server.seed_sample_menu {
        DrinkStore::with_sample_menu()
    } else {
        DrinkStore::new()
    };
    let app = router(AppState::new(store, gate));

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Drinks server listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Drinks server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
