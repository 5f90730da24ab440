use anyhow::Context;
use std::sync::Arc;
use tracing::info;

use crate::auth::{hash_password, Role};
use crate::config::AppConfig;
use crate::database::models::NewUser;
use crate::database::{DatabaseManager, MemoryStore, PgStore, Store, UserRepository};
use crate::routes;
use crate::state::AppState;

pub async fn handle(in_memory: bool, admin_password: Option<String>) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    info!("Starting eLearning API in {:?} mode", config.environment);

    let store: Arc<dyn Store> = if in_memory {
        info!("Using in-memory store; data is lost on exit");
        let store = MemoryStore::new();
        if let Some(password) = admin_password {
            seed_admin(&store, &password).await?;
        }
        Arc::new(store)
    } else {
        let pool = DatabaseManager::connect(&config.database)
            .await
            .context("connecting to database")?;
        DatabaseManager::migrate(&pool).await?;
        Arc::new(PgStore::new(pool))
    };

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Listening on http://{}", bind_addr);

    let app = routes::app(AppState::new(config, store));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn seed_admin(store: &MemoryStore, password: &str) -> anyhow::Result<()> {
    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!("hashing failed: {}", e))?;
    let admin = store
        .create_user(NewUser {
            name: "admin".to_string(),
            email: "admin@localhost".to_string(),
            password_hash,
            role: Role::Admin,
        })
        .await?;
    info!("Seeded admin account (user {})", admin.user_id);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
