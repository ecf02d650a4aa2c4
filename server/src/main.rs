//! EventMaker HTTP server.
//!
//! Wires Postgres storage, magic link auth and the HTTP router together,
//! then serves until Ctrl+C or SIGTERM.

use eventmaker_auth::providers::{ConsoleEmailProvider, EmailProvider, SmtpEmailProvider};
use eventmaker_auth::stores::{PostgresSessionStore, PostgresTokenStore, PostgresUserRepository};
use eventmaker_auth::{AuthProviders, AuthService};
use eventmaker_core::EventService;
use eventmaker_core::environment::SystemClock;
use eventmaker_postgres::{PostgresEventRepository, PostgresStoreHealth, run_migrations};
use eventmaker_server::{AppState, Config, ReadinessChecker, build_router, metrics_router};
use metrics_exporter_prometheus::PrometheusBuilder;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventmaker=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting EventMaker HTTP Server");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        environment = %config.server.environment,
        database_url_provided = config.database.url_provided,
        auth_secret_provided = config.auth.secret_provided,
        smtp = config.email.is_some(),
        "Configuration loaded"
    );
    if !config.auth.secret_provided {
        warn!("AUTH_SECRET not set; using an ephemeral secret, sessions end at restart");
    }
    if config.auth.expose_magic_links_for_testing {
        warn!("Magic links are exposed in API responses; never enable this in production");
    }

    // Metrics
    let prometheus = PrometheusBuilder::new().install_recorder()?;
    eventmaker_server::metrics::register_metrics();

    // Database pool, connected on first use
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(config.database.connect_timeout))
        .idle_timeout(Duration::from_secs(config.database.idle_timeout))
        .connect_lazy(&config.database.url)?;

    if let Err(e) = run_migrations(&pool).await {
        error!(error = %e, "Could not apply migrations; the readiness check will report the database");
    }

    // Auth
    let email: Arc<dyn EmailProvider> = match config.email.clone() {
        Some(smtp) => {
            info!(host = %smtp.host, port = smtp.port, "Sending magic links over SMTP");
            Arc::new(SmtpEmailProvider::new(smtp)?)
        }
        None => {
            info!("EMAIL_SERVER_HOST not set; magic links will be logged to the console");
            Arc::new(ConsoleEmailProvider::new(config.server.app_name.clone()))
        }
    };
    let auth = Arc::new(AuthService::new(
        config.magic_link_config(),
        config.auth.secret.clone(),
        AuthProviders {
            email,
            tokens: Arc::new(PostgresTokenStore::new(pool.clone())),
            sessions: Arc::new(PostgresSessionStore::new(pool.clone())),
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
        },
        Arc::new(SystemClock),
    ));

    // Events
    let events = Arc::new(
        EventService::new(
            Arc::new(PostgresEventRepository::from_pool(pool.clone())),
            Arc::new(SystemClock),
        )
        .with_policy(config.event_policy()),
    );

    // Readiness, once now and optionally on an interval
    let readiness = Arc::new(ReadinessChecker::new(
        Arc::new(PostgresStoreHealth::from_pool(pool.clone())),
        config.environment_complete(),
    ));
    readiness.check().await;
    let periodic = config
        .readiness_interval()
        .map(|every| readiness.clone().spawn_periodic(every));

    let state = AppState::new(events, auth, readiness);
    let app = build_router(state).merge(metrics_router(prometheus));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server ready at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(task) = periodic {
        task.abort();
    }

    let timeout = Duration::from_secs(config.server.shutdown_timeout);
    if tokio::time::timeout(timeout, pool.close()).await.is_err() {
        warn!(?timeout, "Timed out closing database pool");
    }

    info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
