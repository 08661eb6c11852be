//! Lingua Practice HTTP server.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lingua_practice::adapters::ai::{GeminiConfig, GeminiProvider};
use lingua_practice::adapters::auth::{
    SupabaseIdentityConfig, SupabaseIdentityProvider, SupabaseJwtConfig, SupabaseSessionValidator,
};
use lingua_practice::adapters::http::{build_router, AppState, RouterOptions};
use lingua_practice::adapters::memory::{InMemoryDialogueRepository, InMemoryStatsRepository};
use lingua_practice::adapters::postgres::{PostgresDialogueRepository, PostgresStatsRepository};
use lingua_practice::config::{AiConfig, AppConfig, AuthConfig, DatabaseConfig, ServerConfig};
use lingua_practice::ports::{DialogueRepository, PracticeStatsRepository};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        model = %config.ai.gemini_model,
        "Starting lingua-practice"
    );

    let (dialogues, stats) = repositories(config.database.as_ref()).await?;
    let state = AppState::new(
        Arc::new(gemini_provider(&config.ai)?),
        dialogues,
        stats,
        Arc::new(session_validator(&config.auth)),
        Arc::new(SupabaseIdentityProvider::new(SupabaseIdentityConfig::new(
            &config.auth.supabase_url,
            &config.auth.supabase_anon_key,
        ))?),
    );

    let app = build_router(
        state,
        RouterOptions {
            request_timeout: config.server.request_timeout(),
            body_limit: config.server.body_limit_bytes(),
            cors_origins: config.server.cors_origins_list(),
        },
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if server.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

async fn repositories(
    database: Option<&DatabaseConfig>,
) -> Result<(Arc<dyn DialogueRepository>, Arc<dyn PracticeStatsRepository>), BoxError> {
    let Some(database) = database else {
        tracing::warn!("No database configured; dialogues and stats are kept in memory");
        return Ok((
            Arc::new(InMemoryDialogueRepository::new()),
            Arc::new(InMemoryStatsRepository::new()),
        ));
    };

    tracing::info!(url = %database.redacted_url(), "Connecting to PostgreSQL");
    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .connect(&database.url)
        .await?;

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok((
        Arc::new(PostgresDialogueRepository::new(pool.clone())),
        Arc::new(PostgresStatsRepository::new(pool)),
    ))
}

fn gemini_provider(ai: &AiConfig) -> Result<GeminiProvider, BoxError> {
    let api_key = ai.gemini_api_key.clone().unwrap_or_default();
    let provider = GeminiProvider::new(
        GeminiConfig::new(api_key)
            .with_model(&ai.gemini_model)
            .with_base_url(&ai.gemini_base_url)
            .with_timeout(ai.timeout()),
    )?;
    Ok(provider)
}

fn session_validator(auth: &AuthConfig) -> SupabaseSessionValidator {
    let mut jwt = SupabaseJwtConfig::new(&auth.supabase_jwt_secret).with_leeway(auth.jwt_leeway_secs);
    if auth.verify_issuer {
        jwt = jwt.with_issuer(auth.issuer());
    }
    SupabaseSessionValidator::new(jwt)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
