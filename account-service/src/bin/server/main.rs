use std::sync::Arc;

use account_service::config::Config;
use account_service::config::DatabaseConfig;
use account_service::domain::user::ports::UserRepository;
use account_service::domain::user::service::AuthenticationService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryUserRepository;
use account_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    let storage = match config.database {
        Some(_) => "postgresql",
        None => "memory",
    };
    tracing::info!(
        http_port = config.server.http_port,
        storage,
        "Configuration loaded"
    );

    match &config.database {
        Some(database) => {
            let repository = connect_postgres(database).await?;
            serve(&config, repository).await
        }
        None => {
            tracing::warn!("No database configured, users are kept in memory");
            serve(&config, InMemoryUserRepository::new()).await
        }
    }
}

async fn connect_postgres(
    database: &DatabaseConfig,
) -> Result<PostgresUserRepository, anyhow::Error> {
    let pg_pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .connect(&database.url)
        .await?;
    tracing::info!(
        max_connections = database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    Ok(PostgresUserRepository::new(pg_pool))
}

async fn serve<UR: UserRepository>(config: &Config, repository: UR) -> Result<(), anyhow::Error> {
    let password_hasher = Arc::new(auth::PasswordHasher::new());
    let auth_service = Arc::new(AuthenticationService::new(
        Arc::new(repository),
        password_hasher,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(auth_service)).await?;
    tracing::info!("Server exited successfully");

    Ok(())
}
