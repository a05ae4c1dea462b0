use api_client::{MicroburbsClient, PropertySource};
use analytics::{AnalyticsEngine, EngineOptions};
use axum::{
    routing::{get, post},
    Router,
};
use configuration::Config;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod requests;

pub const SERVICE_NAME: &str = "Microburbs Proxy Server";

/// The shared application state that all handlers can access.
pub struct AppState {
    pub source: Arc<dyn PropertySource>,
    pub engine: AnalyticsEngine,
    pub config: Config,
}

impl AppState {
    pub fn new(source: Arc<dyn PropertySource>, config: Config) -> Self {
        let engine = AnalyticsEngine::new(EngineOptions {
            top_picks: config.analysis.top_picks,
            outlier_selection: config.analysis.outlier_selection,
        });
        Self {
            source,
            engine,
            config,
        }
    }
}

/// Builds the application routes over the given state.
pub fn router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/suburb/properties", get(handlers::get_suburb_properties))
        .route("/api/suburb/analytics", get(handlers::get_suburb_analytics))
        .route("/api/analytics", post(handlers::post_analytics))
        .route("/api/finance/mortgage", post(handlers::post_mortgage))
        .route("/api/finance/roi", post(handlers::post_roi))
        .route("/api/finance/cash-flow", post(handlers::post_cash_flow))
        .route("/api/finance/affordability", post(handlers::post_affordability))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
/// Tracing is initialised by the caller.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let addr = config.server.socket_addr()?;
    let client = MicroburbsClient::new(&config.upstream)?;
    tracing::info!(upstream = client.url(), "Proxying listings API.");

    let app = router(Arc::new(AppState::new(Arc::new(client), config)));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server started and listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
    }
}
