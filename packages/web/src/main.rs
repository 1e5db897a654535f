use anyhow::Context;
use tokio::net::TcpListener;
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::EnvFilter;

use todo_store::{MemoryStore, PgStore};
use todo_web::settings::Database;
use todo_web::{create_app, AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,todo_web=debug")),
        )
        .init();

    let settings = Settings::new().context("Failed to load settings")?;
    let session_options = settings.session_options()?;

    let router = match settings.database()? {
        Database::Memory => {
            tracing::warn!("Using the in-memory store, data is lost on restart");
            create_app(
                AppState::new(MemoryStore::new()),
                tower_sessions::MemoryStore::default(),
                session_options,
            )
        }
        Database::Postgres(url) => {
            let store = PgStore::connect(&url)
                .await
                .context("Failed to connect to database")?;
            store.migrate().await.context("Failed to run migrations")?;

            let session_store = PostgresStore::new(store.pool().clone());
            session_store
                .migrate()
                .await
                .context("Failed to create session table")?;

            create_app(AppState::new(store), session_store, session_options)
        }
    };

    let addr = settings.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
