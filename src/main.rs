use dotenvy::dotenv;
use std::{path::Path, sync::Arc};
use studentboard::{
    api::{self, AppState},
    config::{database, server::ServerConfig, templates},
    core::template,
    errors::Result,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Server settings
    let config = ServerConfig::from_env()
        .inspect_err(|e| error!("Failed to load server configuration: {}", e))?;

    // 4. Database and schema
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed subjects and templates
    if Path::new(&config.templates_path).exists() {
        let seed = templates::load_seed_file(&config.templates_path)?;
        template::seed_templates(&db, &seed)
            .await
            .inspect_err(|e| error!("Failed to seed templates: {}", e))?;
    } else {
        warn!(
            "Template seed file '{}' not found; skipping seeding",
            config.templates_path
        );
    }

    // 6. Serve
    let bind = config.bind;
    let app = api::router(Arc::new(AppState { db, config }));
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Listening on {}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
