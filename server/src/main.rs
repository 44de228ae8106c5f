use std::sync::Arc;

use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use folio_server::config::Config;
use folio_server::metadata::{select_resolver, MetadataResolver};
use folio_server::models::ResumeConfig;
use folio_server::state::AppState;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; FolioLinkBot/1.0)";

#[tokio::main]
async fn main() {
    // Initialize tracing: JSON in production, human-readable in dev.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("folio_server=info,tower_http=info"));

    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("🚀 Folio Server starting...");

    let config = Config::from_env().expect("Failed to load configuration");
    info!(mode = %config.mode, "📝 Configuration loaded");

    let http_client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to build HTTP client");

    let resolver = select_resolver(&config, http_client);

    let resume = config.resume_config_path.as_ref().map(|path| {
        let resume = ResumeConfig::load(path).expect("Failed to load resume configuration");
        info!("📄 Resume configuration loaded from {}", path.display());
        Arc::new(resume)
    });

    // Warm the cache in the background so startup is not held up by lookups.
    if let Some(resume) = &resume {
        let links = resume.outbound_links();
        let resolver = Arc::clone(&resolver);
        tokio::spawn(async move {
            resolver.preload(&links).await;
            info!(count = links.len(), "✅ Resume links preloaded");
        });
    }

    // CORS: permissive in dev, restrictive in production.
    let cors = if config.is_production() {
        tracing::warn!(
            "🔒 CORS: restrictive (production mode). \
             Cross-origin requests will be denied."
        );
        CorsLayer::new()
    } else {
        info!("🔓 CORS: permissive (dev mode)");
        CorsLayer::permissive()
    };

    let app_state = AppState {
        resolver,
        mode: config.mode,
        resume,
    };

    // Prometheus metrics layer
    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let app = folio_server::router(app_state)
        .route(
            "/metrics",
            get(move || async move { metric_handle.render() }),
        )
        .layer(prometheus_layer)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = config.server_addr();
    info!("🎧 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
