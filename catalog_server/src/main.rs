//! Film catalog server: connects to PostgreSQL, creates the tables, optionally
//! seeds demo data, and serves the REST API with its OpenAPI document.
//!
//! Run from repo root: `cargo run -p catalog-server`

use film_catalog::{app, apply_migrations, connect, ensure_database_exists, seed_demo, AppState, Catalog, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("film_catalog=info,catalog_server=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    ensure_database_exists(&settings.database_url).await?;
    let pool = connect(&settings).await?;
    tracing::info!("connected to database");

    apply_migrations(&pool, &settings.schema).await?;
    let catalog = Catalog::new(pool.clone(), settings.schema.clone());
    if settings.seed_demo {
        seed_demo(&catalog).await?;
    }

    let listener = TcpListener::bind(settings.bind_addr).await?;
    let addr = listener.local_addr()?;
    tracing::info!("listening on http://{}", addr);
    tracing::info!("API docs at http://{}{}", addr, film_catalog::openapi::DOCS_PATH);
    axum::serve(listener, app(AppState::new(catalog)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
