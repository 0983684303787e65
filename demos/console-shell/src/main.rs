//! Minimal console shell over the session/authentication layer.
//!
//! Run with: cargo run -p console-shell-demo
//!
//! Points the transport at a locally running backend, restores any persisted
//! session, attempts a sign-in when none exists, and prints the navigable
//! screen set as the session moves through its lifecycle.

use anyhow::Result;
use auth_client_core::{BearerToken, traits::LoginCredentials};
use auth_client_routing::{RouteGate, RouteSet};
use auth_client_session::{SessionManager, storage::JsonFileStore};
use auth_client_transport::HttpAuthTransport;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const BASE_URL: &str = "http://localhost:5000/api";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let store_path = JsonFileStore::default_path("console-shell")
        .unwrap_or_else(|| std::env::temp_dir().join("console-shell-session.json"));
    tracing::info!(path = %store_path.display(), "session store");
    let store = JsonFileStore::new(store_path);

    let bearer = BearerToken::new();
    let transport = HttpAuthTransport::new(BASE_URL, bearer.clone())?;
    let manager = SessionManager::start(store, transport, bearer);

    let loading = RouteSet::for_session(&manager.snapshot());
    println!("screens while restoring: {:?}", loading.screens());

    manager.ready().await;
    let mut gate = RouteGate::new(manager.subscribe());
    println!("screens: {:?}", gate.current().screens());

    if manager.snapshot().is_authenticated() {
        let snapshot = manager.snapshot();
        let username = snapshot.profile().map_or("?", |p| p.username.as_str());
        println!("restored session for @{username}, signing out");
        manager.logout().await;
        if let Some(set) = gate.changed().await {
            println!("screens: {:?}", set.screens());
        }
        return Ok(());
    }

    println!("no persisted session, signing in");
    let outcome = manager
        .login(LoginCredentials {
            identifier: "demo@example.com".to_string(),
            secret: "demo-secret".to_string(),
        })
        .await;

    match outcome {
        Ok(()) => {
            if let Some(set) = gate.changed().await {
                println!("screens: {:?}", set.screens());
            }
            let snapshot = manager.snapshot();
            let username = snapshot.profile().map_or("?", |p| p.username.as_str());
            println!("signed in as @{username}");
        }
        Err(err) => println!("sign-in failed: {err}"),
    }

    Ok(())
}
