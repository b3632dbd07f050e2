use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use common::env::ensure_env;
use configs::{AppConfig, AuthConfig};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, ServerState};
use service::auth::TokenService;
use service::commons::{
    repo::seaorm::{SeaOrmCommonsRepository, SeaOrmUserCommonsRepository},
    CommonsService,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire SeaORM repositories and the token verifier into handler state.
pub fn build_state(db: DatabaseConnection, auth: &AuthConfig) -> ServerState {
    let commons = Arc::new(SeaOrmCommonsRepository { db: db.clone() });
    let memberships = Arc::new(SeaOrmUserCommonsRepository { db });
    ServerState {
        commons: Arc::new(CommonsService::new(commons, memberships)),
        tokens: Arc::new(TokenService::new(&auth.jwt_secret, auth.token_ttl_secs)),
    }
}

/// Connect, migrate, build the app and serve until `shutdown` resolves
pub async fn run_with_config<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    ensure_env(cfg.server.frontend_dir.as_deref()).await?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None).await?;
        info!("database migrations applied");
    }

    let state = build_state(db, &cfg.auth);
    let app: Router = routes::build_router(state, build_cors(), cfg.server.frontend_dir.as_deref());

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "commons api listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("server stopped");
    Ok(())
}
