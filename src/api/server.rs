//! HTTP server implementation for shoreguide
//!
//! This module sets up the Axum web server with all routes, middleware,
//! and graceful shutdown handling.

use axum::{
    extract::MatchedPath,
    http::{header, HeaderName, Method, Request},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use uuid::Uuid;

use crate::{
    api::{
        handlers,
        health::{build_info, health_check, health_monitor, ready_check},
        AppState,
    },
    error::{Error, Result},
};

/// Request ID generator
#[derive(Clone, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(id.parse().ok()?))
    }
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/healthz", get(health_check))
        .route("/readyz", get(ready_check))
        .route("/build", get(build_info));

    let catalog_routes = Router::new()
        .route("/api/attractions", get(handlers::list_attractions))
        .route("/api/attractions/:id", get(handlers::get_attraction))
        .route("/api/attractions/:id/nearby", get(handlers::nearby_attractions))
        .route("/api/attractions/:id/seo", get(handlers::attraction_seo))
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/categories/:category", get(handlers::category_page))
        .route("/api/tags", get(handlers::list_tags))
        .route("/api/tags/:tag", get(handlers::tag_page))
        .route("/api/types", get(handlers::list_types))
        .route("/api/types/:type", get(handlers::attractions_by_type))
        .route("/api/search", get(handlers::search))
        .route("/api/featured", get(handlers::featured))
        .route("/api/stats", get(handlers::stats))
        .route("/api/map/markers", get(handlers::map_markers))
        .route("/sitemap.xml", get(handlers::sitemap_xml));

    let request_timeout = state.config.server.request_timeout();

    Router::new()
        .merge(health_routes)
        .merge(catalog_routes)
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            MakeRequestUuid,
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path =
                        request.extensions().get::<MatchedPath>().map(MatchedPath::as_str);
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");

                    tracing::info_span!(
                        "http_request",
                        method = ?request.method(),
                        matched_path,
                        request_id,
                        latency = tracing::field::Empty,
                        status = tracing::field::Empty,
                    )
                })
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(tracing::Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
}

/// Start the health monitor and serve until a shutdown signal arrives
pub async fn create_server(state: AppState) -> Result<()> {
    let config = state.config.clone();
    let addr: SocketAddr = config
        .server
        .address()
        .parse()
        .map_err(|e| Error::config(format!("Invalid server address: {}", e)))?;

    let monitor = tokio::spawn(health_monitor(
        state.health.clone(),
        state.repository.clone(),
        config.catalog.health_check_interval(),
    ));

    let app = create_router(state);

    tracing::info!(
        address = %addr,
        environment = %config.server.environment,
        "Starting HTTP server"
    );

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!(address = %addr, "HTTP server listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::internal(format!("Server error: {}", e)));

    monitor.abort();
    served
}

/// Shutdown signal handler
///
/// Waits for CTRL+C or SIGTERM signals to gracefully shutdown the server.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received CTRL+C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
