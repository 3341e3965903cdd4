// src/main.rs

use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use survey_backend::catalog::Catalog;
use survey_backend::config::Config;
use survey_backend::routes;
use survey_backend::state::AppState;
use survey_backend::store::SqliteSubmissionStore;
use survey_backend::survey::SessionRegistry;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "survey.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let catalog = match load_catalog(&config) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("Failed to load survey content: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Survey content loaded: {:?} (default '{}')",
        catalog.languages(),
        catalog.default_language()
    );

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&config.database_url)
        .await
        .expect("Failed to open the response database");

    tracing::info!("Database connected...");

    // Run Migrations Automatically
    tracing::info!("Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations applied successfully.");

    if config.admin_key.is_none() {
        tracing::warn!("ADMIN_KEY is not set; admin routes will reject every request");
    }

    // Create AppState
    let state = AppState {
        store: Arc::new(SqliteSubmissionStore::new(pool)),
        catalog: Arc::new(catalog),
        sessions: SessionRegistry::new(Duration::from_secs(config.session_ttl_secs)),
        config: config.clone(),
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listening address");

    // Start the server
    axum::serve(listener, app).await.expect("Server error");
}

fn load_catalog(config: &Config) -> Result<Catalog, Box<dyn std::error::Error>> {
    let mut catalog = Catalog::builtin();

    if let Some(path) = &config.content_path {
        let count = catalog.load_file(path)?;
        tracing::info!("Loaded {} languages from {}", count, path);
    }

    catalog.set_default_language(&config.default_language)?;

    Ok(catalog)
}
