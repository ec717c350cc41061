//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, rate limiting)
//! - Bind server to listener
//! - Graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::Request,
    middleware,
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{AllowlistConfig, ServiceConfig};
use crate::db::{PgExecutor, SchemaExecutor};
use crate::http::handlers;
use crate::http::request::request_id_middleware;
use crate::observability::metrics;
use crate::security::rate_limit::{rate_limit_middleware, RateLimiter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub allowlist: AllowlistConfig,
    pub executor: Arc<dyn SchemaExecutor>,
}

/// HTTP server for the provisioning service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration, talking to
    /// real Postgres targets.
    pub fn new(config: ServiceConfig) -> Self {
        let executor = Arc::new(PgExecutor::new(Duration::from_secs(
            config.timeouts.connect_secs,
        )));
        Self::with_executor(config, executor)
    }

    /// Create a server with an injected executor (used by tests).
    pub fn with_executor(config: ServiceConfig, executor: Arc<dyn SchemaExecutor>) -> Self {
        let limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));
        let state = AppState {
            allowlist: config.allowlist.clone(),
            executor,
        };
        let router = Self::build_router(&config, state, limiter);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(
        config: &ServiceConfig,
        state: AppState,
        limiter: Arc<RateLimiter>,
    ) -> Router {
        // Only the provisioning operations are rate limited; health stays
        // reachable for probes.
        let limited = Router::new()
            .route("/connect", post(handlers::connect))
            .route("/generate", post(handlers::generate))
            .route_layer(middleware::from_fn_with_state(
                limiter,
                rate_limit_middleware,
            ));

        let api = limited.route("/health", get(handlers::health));

        Router::new()
            .route("/", get(handlers::index))
            .nest("/api", api)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(middleware::from_fn(metrics_middleware))
                    .layer(middleware::from_fn(request_id_middleware))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    )))
                    .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes)),
            )
    }

    /// Run the server, accepting connections on the given listener until
    /// Ctrl+C or the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Request counter middleware.
async fn metrics_middleware(request: Request<Body>, next: axum::middleware::Next) -> Response {
    let endpoint = request.uri().path().to_string();
    let response = next.run(request).await;
    metrics::record_request(&endpoint, response.status().as_u16());
    response
}

/// Wait for Ctrl+C or a programmatic shutdown trigger.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if result.is_ok() {
                tracing::info!("Shutdown signal received");
            }
        }
        _ = shutdown.recv() => {
            tracing::info!("Shutdown triggered");
        }
    }
}
