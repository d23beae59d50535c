use std::sync::Arc;

use auth::Authenticator;
use conduit_service::config::Config;
use conduit_service::domain::article::service::ArticleService;
use conduit_service::domain::comment::service::CommentService;
use conduit_service::domain::user::profiles::ProfileLookup;
use conduit_service::domain::user::service::UserService;
use conduit_service::inbound::http::auth::gate::AuthGate;
use conduit_service::inbound::http::router::create_router;
use conduit_service::inbound::http::router::AppState;
use conduit_service::outbound::repositories::PostgresArticleRepository;
use conduit_service::outbound::repositories::PostgresCommentRepository;
use conduit_service::outbound::repositories::PostgresFavoriteRepository;
use conduit_service::outbound::repositories::PostgresFollowRepository;
use conduit_service::outbound::repositories::PostgresTagRepository;
use conduit_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "conduit_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "conduit-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let token_ttl = config.jwt.token_ttl().ok_or_else(|| {
        anyhow::anyhow!(
            "jwt.expiration_hours must be a positive number of hours, got {}",
            config.jwt.expiration_hours
        )
    })?;

    tracing::info!(
        http_port = config.server.http_port,
        request_timeout_secs = config.server.request_timeout_secs,
        token_expiration_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::with_token_ttl(
        config.jwt.secret.as_bytes(),
        token_ttl,
    ));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let follow_repository = Arc::new(PostgresFollowRepository::new(pg_pool.clone()));
    let article_repository = Arc::new(PostgresArticleRepository::new(pg_pool.clone()));
    let tag_repository = Arc::new(PostgresTagRepository::new(pg_pool.clone()));
    let favorite_repository = Arc::new(PostgresFavoriteRepository::new(pg_pool.clone()));
    let comment_repository = Arc::new(PostgresCommentRepository::new(pg_pool));

    let profiles = ProfileLookup::new(
        Arc::clone(&user_repository),
        Arc::clone(&follow_repository),
    );

    let state = AppState {
        user_service: Arc::new(UserService::new(
            Arc::clone(&user_repository),
            Arc::clone(&follow_repository),
            Arc::clone(&authenticator),
        )),
        article_service: Arc::new(ArticleService::new(
            Arc::clone(&article_repository),
            tag_repository,
            favorite_repository,
            profiles.clone(),
        )),
        comment_service: Arc::new(CommentService::new(
            comment_repository,
            article_repository,
            profiles,
        )),
    };

    let gate = Arc::new(AuthGate::new(authenticator, user_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(state, gate, config.server.request_timeout());

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
