//! Trivia API Server
//!
//! REST backend for a trivia-question database: categories, paginated
//! question listings, substring search, create/delete, and a randomized
//! quiz endpoint that avoids repeats.
//!
//! Uses SQLite (embedded) so the server has no external dependencies.

mod error;
mod extractors;
mod handlers;
mod pagination;
mod storage;

use anyhow::{Context, Result};
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use storage::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Trivia API Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = load_config().await.context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, db={}",
        config.bind_address, config.database_path
    );

    let db = Arc::new(
        Database::new(&config.database_path)
            .await
            .context("Failed to initialize database")?,
    );

    let state = AppState { db };

    info!("Building HTTP router...");
    let app = app(state);

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // REST API routes
        .merge(api_routes())
        // Unknown paths get the enveloped 404
        .fallback(handlers::not_found)
        // Layers
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    // Each MethodRouter falls back to the enveloped 405 for unsupported verbs.
    Router::new()
        .route(
            "/categories",
            get(handlers::categories::list).fallback(handlers::method_not_allowed),
        )
        .route(
            "/categories/:id/questions",
            get(handlers::categories::questions).fallback(handlers::method_not_allowed),
        )
        .route(
            "/questions",
            get(handlers::questions::list)
                .post(handlers::questions::create)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/questions/search",
            post(handlers::questions::search).fallback(handlers::method_not_allowed),
        )
        .route(
            "/questions/:id",
            delete(handlers::questions::delete).fallback(handlers::method_not_allowed),
        )
        .route(
            "/quizzes",
            post(handlers::quizzes::play).fallback(handlers::method_not_allowed),
        )
}

#[derive(Debug, Clone)]
struct Config {
    bind_address: String,
    database_path: String,
}

async fn load_config() -> Result<Config> {
    let data_dir = std::env::var("DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./data"));

    tokio::fs::create_dir_all(&data_dir)
        .await
        .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

    let database_path = std::env::var("DATABASE_PATH")
        .unwrap_or_else(|_| data_dir.join("trivia.db").to_string_lossy().to_string());

    let bind_address = std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:5000".to_string());

    Ok(Config {
        bind_address,
        database_path,
    })
}
