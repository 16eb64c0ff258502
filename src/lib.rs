//! # Newsdesk
//!
//! Session-gated news search portal.
//!
//! - Users register and log in with an email + password; credentials live in
//!   an in-memory store for the lifetime of the process
//! - Logged-in users get a dashboard and a `/news` keyword search
//! - Searches are proxied to a third-party news API and the raw articles are
//!   normalized (missing fields defaulted, timestamps made human-readable)
//!   before rendering
//!
//! The news API key is deployment configuration, never source: see
//! [`config::Config`].
use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod accounts;
pub mod config;
pub mod error;
pub mod news;
pub mod routes;
pub mod session;
pub mod state;
pub mod views;

use config::Config;
use routes::{
    dashboard_handler, index_handler, login_form_handler, login_handler, logout_handler,
    news_handler, register_form_handler, register_handler,
};
use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/login", get(login_form_handler).post(login_handler))
        .route("/register", get(register_form_handler).post(register_handler))
        .route("/dashboard", get(dashboard_handler))
        .route("/news", get(news_handler))
        .route("/logout", get(logout_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new(Config::load());

    info!("Starting server...");

    let app = router(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
