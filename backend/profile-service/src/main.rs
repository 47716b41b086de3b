use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use crypto_core::JwtKeys;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use profile_service::config::{Config, StoreBackend};
use profile_service::db::{EdgeRepository, MemoryStore, PostgresStore, UserRepository};
use profile_service::{routes, validators, AppState};

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        env = %config.app.env,
        backend = ?config.store.backend,
        "Starting profile-service"
    );

    let (users, edges) = build_store(&config).await?;

    let jwt_keys = Arc::new(
        JwtKeys::from_secret(&config.jwt.secret, config.jwt.access_token_ttl)
            .context("Failed to initialise JWT keys")?,
    );

    let state = web::Data::new(AppState::new(users, edges, jwt_keys.clone()));
    let keys_data = web::Data::from(jwt_keys);
    let cors_origin = config.cors.allowed_origin.clone();
    if cors_origin.is_none() && config.is_production() {
        warn!("CORS_ALLOWED_ORIGIN not set in production; allowing any origin");
    }
    let bind_address = format!("{}:{}", config.app.host, config.app.port);

    info!("HTTP server listening on {}", bind_address);

    HttpServer::new(move || {
        let cors = match &cors_origin {
            Some(origin) => Cors::default().allowed_origin(origin),
            None => Cors::permissive(),
        }
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

        App::new()
            .app_data(state.clone())
            .app_data(keys_data.clone())
            .app_data(validators::json_config())
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(routes::configure_routes)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("HTTP server terminated with an error")?;

    info!("profile-service stopped");
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_target(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn build_store(
    config: &Config,
) -> Result<(Arc<dyn UserRepository>, Arc<dyn EdgeRepository>)> {
    match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory store; data is lost on restart");
            let store = Arc::new(MemoryStore::new());
            let users: Arc<dyn UserRepository> = store.clone();
            let edges: Arc<dyn EdgeRepository> = store;
            Ok((users, edges))
        }
        StoreBackend::Postgres => {
            let url = config
                .database
                .url
                .as_deref()
                .context("DATABASE_URL not set")?;

            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .min_connections(config.database.min_connections)
                .connect(url)
                .await
                .context("Failed to connect to PostgreSQL")?;
            info!("Database pool created");

            if config.database.run_migrations {
                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .context("Failed to run database migrations")?;
                info!("Database migrations applied");
            }

            let store = Arc::new(PostgresStore::new(pool));
            let users: Arc<dyn UserRepository> = store.clone();
            let edges: Arc<dyn EdgeRepository> = store;
            Ok((users, edges))
        }
    }
}
