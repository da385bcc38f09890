//! maicivy development server
//!
//! Serves the backend endpoints the client layer talks to, with canned
//! content and in-memory visit tracking, so the client can run end to end
//! without the production backend.

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use maicivy_shared::{
    PATH_ANALYTICS_LETTERS, PATH_ANALYTICS_REALTIME, PATH_ANALYTICS_STATS, PATH_ANALYTICS_THEMES,
    PATH_CV, PATH_CV_THEMES, PATH_GITHUB_REPOS, PATH_GITHUB_STATUS, PATH_LETTERS_GENERATE,
    PATH_PROFILE_DETECT, PATH_REALTIME_WS, PATH_TIMELINE, PATH_VISITORS_CHECK,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod routes;
pub mod state;
pub mod ws;

pub use config::DevServerConfig;
pub use state::AppState;

/// Build the router
pub fn app(state: AppState) -> Router {
    // Credentialed requests need a mirrored origin rather than `*`
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        // Visits
        .route(PATH_VISITORS_CHECK, get(routes::visitors::check))
        // Analytics
        .route(PATH_ANALYTICS_STATS, get(routes::analytics::stats))
        .route(PATH_ANALYTICS_REALTIME, get(routes::analytics::realtime))
        .route(PATH_ANALYTICS_THEMES, get(routes::analytics::themes))
        .route(PATH_ANALYTICS_LETTERS, get(routes::analytics::letters))
        // CV
        .route(PATH_CV, get(routes::cv::cv))
        .route(PATH_CV_THEMES, get(routes::cv::themes))
        // Letters
        .route(PATH_LETTERS_GENERATE, post(routes::letters::generate))
        // GitHub
        .route(PATH_GITHUB_STATUS, get(routes::github::status))
        .route(PATH_GITHUB_REPOS, get(routes::github::repos))
        // Profile and timeline
        .route(PATH_PROFILE_DETECT, get(routes::profile::detect))
        .route(PATH_TIMELINE, get(routes::timeline::list))
        // WebSocket
        .route(PATH_REALTIME_WS, get(ws::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind `config.addr` and serve on a background task. Binding port 0 picks
/// a free port; the returned address is the one actually bound.
pub async fn spawn(config: DevServerConfig) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = TcpListener::bind(config.addr).await?;
    let addr = listener.local_addr()?;
    let app = app(AppState::new(config.heartbeat_interval));

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Dev server stopped: {}", e);
        }
    });
    Ok((addr, handle))
}
