//! # Server Setup
//!
//! Tracing initialization, store wiring, route registration, and HTTP server startup.

// region: --- Imports
use crate::handlers;
use crate::middleware::{log_requests, stamp_req, RequestStamp};
use crate::services::FormService;
use axum::{
    extract::FromRef,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use lib_core::{open_store, AppError, Config, SubmissionStore};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub forms: FormService,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn SubmissionStore>) -> Self {
        let forms = FormService::new(store, config.default_page_limit, config.max_page_limit);
        Self { forms, config }
    }
}

impl FromRef<AppState> for FormService {
    fn from_ref(state: &AppState) -> Self {
        state.forms.clone()
    }
}
// endregion: --- AppState

// region: --- Server Setup
/// Install the global tracing subscriber.
///
/// `LOG_LEVEL` accepts a level (`debug`) or a full filter directive
/// (`lib_web=debug,sqlx=warn`). Unparsable values fall back to `info`.
pub fn init_tracing() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let filter = EnvFilter::try_new(log_level.to_lowercase()).unwrap_or_else(|e| {
        eprintln!("Invalid LOG_LEVEL {:?} ({}), using info", log_level, e);
        EnvFilter::new("info")
    });

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .try_init();
}

/// Open the configured store and serve HTTP until the process is stopped.
///
/// # Errors
///
/// Fails if the store cannot be opened or the bind address is unavailable.
pub async fn start_server(config: Config) -> anyhow::Result<()> {
    info!(" INQUIRY INTAKE BACKEND STARTING");
    info!("Store URL: {}", config.database_url);

    let store = open_store(&config.database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open store {}: {}", config.database_url, e))?;
    info!("[STORE] Using {} backend", store.backend());

    let bind_address = config.bind_address.clone();
    let app = create_router(AppState::new(config, store));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!(" SERVER READY: http://{}", bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the application router with all routes and layers.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    info!("[ROUTE SETUP] Registering HTTP routes...");
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))
        .route("/api/submit-form", post(handlers::forms::submit_form))
        .route("/api/forms", get(handlers::forms::list_forms))
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            AppError::NotFound("Route not found".to_string())
        })
        .with_state(state)
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        request_id = %RequestStamp::id_of(request),
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::error!(
                            error = ?error,
                            latency_ms = latency.as_millis(),
                            "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                            error,
                            latency.as_millis()
                        );
                    },
                ),
        )
        .layer(axum::middleware::from_fn(log_requests))
        // Outermost of the three so the stamp is visible to logging and the trace span.
        .layer(axum::middleware::from_fn(stamp_req))
        .layer(cors)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("[CORS] Ignoring invalid origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

fn log_server_info() {
    info!(" FORMS:");
    info!("   • POST /api/submit-form");
    info!("   • GET  /api/forms?page=1&limit=10");
    info!(" HEALTH:");
    info!("   • GET  /");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
