//! Objexis API Gateway
//!
//! The main entry point for the design agent API.
//! Handles:
//! - Request routing for the agent, knowledge and health endpoints
//! - Body limits, timeouts and panic recovery
//! - Observability (logging, metrics, request ids)

mod handlers;
mod middleware;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware::map_response,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use objexis_common::{
    config::{AppConfig, ObservabilityConfig},
    errors::AppError,
    metrics::{self, LATENCY_BUCKETS, METRICS_PREFIX},
    DesignAgent,
};
use std::any::Any;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{signal, sync::Notify};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub agent: Arc<DesignAgent>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()
        .map_err(AppError::from)
        .context("Failed to load configuration")?;

    init_tracing(&config.observability);

    info!(
        service = %config.observability.service_name,
        "Starting Objexis API Gateway v{}",
        objexis_common::VERSION
    );

    let config = Arc::new(config);

    // Initialize metrics
    metrics::register_metrics();
    if config.metrics_enabled() {
        install_metrics_exporter(config.observability.metrics_port)?;
    }

    let agent = DesignAgent::builtin();
    info!(entries = agent.knowledge().len(), "Design agent ready");

    // Create app state
    let state = AppState {
        config: config.clone(),
        agent: Arc::new(agent),
    };

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr = config.bind_addr().context("Invalid server address")?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    let shutdown = Arc::new(Notify::new());
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown(shutdown.clone()))
        .into_future();
    let grace = config.shutdown_timeout();

    tokio::select! {
        result = server => result.context("Server error")?,
        _ = async {
            shutdown.notified().await;
            tokio::time::sleep(grace).await;
        } => {
            warn!(timeout_secs = grace.as_secs(), "Graceful shutdown timed out, dropping open connections");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber; RUST_LOG overrides the configured level
fn init_tracing(observability: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&observability.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if observability.json_logging {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Start the Prometheus scrape endpoint
fn install_metrics_exporter(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .set_buckets_for_metric(
            Matcher::Full(format!("{}_request_duration_seconds", METRICS_PREFIX)),
            LATENCY_BUCKETS,
        )?
        .install()
        .context("Failed to install Prometheus exporter")?;

    info!("Metrics exporter listening on {}", addr);
    Ok(())
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    let timeout =
        TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, state.config.request_timeout());
    let body_limit = DefaultBodyLimit::max(state.config.server.max_body_bytes);

    // API routes
    let api_routes = Router::new()
        .route(
            "/agent",
            post(handlers::agent::converse).get(handlers::agent::intro),
        )
        .route("/knowledge", get(handlers::knowledge::list_entries));

    // Compose the app
    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        .nest("/api", api_routes)
        .layer(body_limit)
        .layer(timeout)
        .layer(map_response(middleware::error_body::json_error_bodies))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(propagate_id)
        .layer(request_id)
        .with_state(state)
}

/// Map a handler panic to the generic unavailable response
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    metrics::record_agent_failure("PANIC");
    AppError::internal(format!("handler panicked: {}", detail)).into_response()
}

async fn wait_for_shutdown(notify: Arc<Notify>) {
    shutdown_signal().await;
    notify.notify_one();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
