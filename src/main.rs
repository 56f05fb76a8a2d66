use anyhow::Context;
use darzi_api::{
    app,
    auth::{otp::LogOtpSender, AuthConfig, AuthService},
    config, db, AppServices, AppState,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = config::load_config().context("failed to load configuration")?;
    config::init_tracing(app_config.log_level(), app_config.log_json);

    info!(
        environment = %app_config.environment,
        "Starting darzi-api"
    );

    let db_pool = Arc::new(
        db::establish_connection_from_app_config(&app_config)
            .await
            .context("failed to connect to database")?,
    );

    if app_config.auto_migrate {
        db::run_migrations(&db_pool)
            .await
            .context("failed to run migrations")?;
    }

    let auth_service = Arc::new(AuthService::new(AuthConfig::new(
        app_config.jwt_secret.clone(),
        Duration::from_secs(app_config.jwt_expiration as u64),
        Duration::from_secs(app_config.refresh_token_expiration as u64),
    )));

    let services = AppServices::new(
        db_pool.clone(),
        auth_service.clone(),
        Arc::new(LogOtpSender),
        app_config.otp_ttl_minutes,
    );

    let state = AppState {
        db: db_pool,
        config: app_config.clone(),
        services,
    };

    let router = app(state, auth_service);

    let addr = format!("{}:{}", app_config.host, app_config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Shutdown complete");
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

    info!("Shutdown signal received");
}
