// ABOUTME: HTTP server assembly: router, middleware stack, listener, and graceful shutdown
// ABOUTME: Merges the relay's route groups and serves them with axum until a shutdown signal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # HTTP Server
//!
//! Middleware order, outermost first: request ID assignment, tracing span,
//! request ID propagation to the response, CORS, and the whole-request timeout.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{body::Body, Router};
use http::{HeaderName, Request, Response};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, Span};

use crate::config::ServerConfig;
use crate::middleware::{
    create_request_span, record_response, setup_cors, MakeRequestUuid, REQUEST_ID_HEADER,
};
use crate::resources::ServerResources;
use crate::routes::{HealthRoutes, ModelRoutes, ServiceRoutes, WorkoutRoutes};

/// Slack added on top of the upstream timeouts for local work
const REQUEST_TIMEOUT_MARGIN_SECS: u64 = 5;

/// Whole-request budget: a registry fetch plus an inference call plus margin
#[must_use]
pub const fn request_timeout(config: &ServerConfig) -> Duration {
    Duration::from_secs(
        config
            .ollama
            .timeout_secs
            .saturating_add(config.registry.timeout_secs)
            .saturating_add(REQUEST_TIMEOUT_MARGIN_SECS),
    )
}

/// Build the application router with all routes and middleware
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let config = Arc::clone(&resources.config);
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(ServiceRoutes::routes(Arc::clone(&resources)))
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(ModelRoutes::routes(Arc::clone(&resources)))
        .merge(WorkoutRoutes::routes(resources))
        .layer(TimeoutLayer::new(request_timeout(&config)))
        .layer(setup_cors(&config.cors))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| create_request_span(request))
                .on_response(|response: &Response<Body>, latency: Duration, span: &Span| {
                    record_response(response, latency, span);
                }),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
}

/// Bind the configured address and serve until Ctrl-C or SIGTERM
///
/// In-flight requests complete before this returns.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let bind_address = resources.config.bind_address();
    let listener = TcpListener::bind(&bind_address).await?;
    info!(
        "HTTP server listening on {} (request timeout {}s, Ctrl+C/SIGTERM to stop)",
        listener.local_addr()?,
        request_timeout(&resources.config).as_secs()
    );

    serve(listener, resources, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves
///
/// # Errors
///
/// Returns an error if the server fails.
pub async fn serve<F>(
    listener: TcpListener,
    resources: Arc<ServerResources>,
    shutdown: F,
) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
