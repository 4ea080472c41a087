//! Server setup and initialization

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use chat_common::{AppConfig, AppError, JwtService};
use chat_core::SnowflakeGenerator;
use chat_db::{
    create_pool, run_migrations, PgChannelRepository, PgMemberRepository, PgMessageRepository,
    PgProfileRepository, PgServerRepository,
};
use chat_service::services::{ServiceContextBuilder, UploadStore};
use chat_service::EventHub;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, upload_files};
use crate::state::AppState;

/// Build the complete application: routes, static uploads and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let storage = &state.config().storage;
    let router = create_router().merge(upload_files(&storage.upload_dir, &storage.public_url));
    let router = apply_middleware(router, state.config())?;
    Ok(router.with_state(state))
}

/// Connect to Postgres and wire every dependency into an [`AppState`]
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = chat_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(format!("migrations failed: {e}")))?;
        info!("Database migrations applied");
    }

    let jwt_service = Arc::new(JwtService::new(
        &config.auth.jwt_secret,
        config.auth.issuer.clone(),
    ));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.machine_id));

    let service_context = ServiceContextBuilder::new()
        .pool(pool.clone())
        .profile_repo(Arc::new(PgProfileRepository::new(pool.clone())))
        .server_repo(Arc::new(PgServerRepository::new(pool.clone())))
        .member_repo(Arc::new(PgMemberRepository::new(pool.clone())))
        .channel_repo(Arc::new(PgChannelRepository::new(pool.clone())))
        .message_repo(Arc::new(PgMessageRepository::new(pool)))
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .event_hub(EventHub::new(config.socket.topic_capacity))
        .upload_store(UploadStore::from(&config.storage))
        .socket_url(config.socket.messages_url.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Serve `app` on an already bound listener until the process stops
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Bind `addr` and serve `app`
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{addr}");
    serve(listener, app).await
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let state = create_app_state(config).await?;
    let app = create_app(state)?;
    run_server(app, &addr).await
}
