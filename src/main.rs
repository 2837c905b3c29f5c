use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use local_library::infrastructure::AppState;
use local_library::views::{TemplateRenderer, ViewRenderer};
use local_library::{config, db, seed, server};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "local_library=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize database
    let db = match db::init_db(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let views: Arc<dyn ViewRenderer> = match &config.views_dir {
        Some(dir) => {
            tracing::info!("Loading templates from {}", dir.display());
            Arc::new(TemplateRenderer::from_dir(dir))
        }
        None => match TemplateRenderer::embedded() {
            Ok(renderer) => Arc::new(renderer),
            Err(e) => {
                tracing::error!("Failed to load templates: {}", e);
                std::process::exit(1);
            }
        },
    };

    let state = AppState::new(db.clone(), views).with_error_details(config.is_development());

    if config.seed_demo {
        tracing::info!("Seeding demo data...");
        if let Err(e) = seed::seed_demo_data(&state).await {
            tracing::error!("Failed to seed data: {}", e);
        }
    }

    let app = server::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Local library listening on http://{} ({})",
        addr,
        config.environment
    );

    if let Err(e) = server::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }

    if let Err(e) = db.close().await {
        tracing::error!("Failed to close database: {}", e);
    }
    tracing::info!("Server stopped");
}
