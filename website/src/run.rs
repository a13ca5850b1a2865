use axum::extract::FromRef;
use moka::sync::Cache;
use snafu::ResultExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

use crate::Result;
use crate::config::Config;
use crate::error::ServerSnafu;
use crate::services::auth::{IdentityProvider, SupabaseAuth};
use crate::web::build_router;
use db::{DbMapper, create_db_mapper};
use tenancy::actor::Actor;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<DbMapper>,
    pub auth: Arc<dyn IdentityProvider>,
    pub auth_cache: Cache<String, Actor>,
}

pub fn create_auth_cache() -> Cache<String, Actor> {
    Cache::builder()
        .time_to_live(Duration::from_secs(5 * 60))
        .max_capacity(1000)
        .build()
}

pub async fn run(config: Config) -> Result<()> {
    let port = config.server.port;
    let db = create_db_mapper(&config.database_url)?;
    let auth = SupabaseAuth::new(&config.supabase)?;

    let state = AppState {
        config: Arc::new(config),
        db: Arc::new(db),
        auth: Arc::new(auth),
        auth_cache: create_auth_cache(),
    };

    let routes_all = build_router(state);

    // Setup the server
    let ip = "127.0.0.1";
    let addr = format!("{}:{}", ip, port);
    info!("HTTP Server running on {}", addr);

    let listener = TcpListener::bind(addr).await.context(ServerSnafu)?;
    axum::serve(listener, routes_all.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context(ServerSnafu)?;

    info!("HTTP Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
pub fn create_test_state(auth: Arc<dyn IdentityProvider>) -> AppState {
    use crate::config::create_test_config;
    use db::create_test_db_mapper;

    AppState {
        config: Arc::new(create_test_config()),
        db: Arc::new(create_test_db_mapper()),
        auth,
        auth_cache: create_auth_cache(),
    }
}
