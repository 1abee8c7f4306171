// Lagentry website API - Local Development Server

use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use lagentry_app::{build_router, email_service_from_env, with_middleware};
use lagentry_chat::{spawn_retention_sweeper, ChatState};
use lagentry_common::config::Config;
use lagentry_signups::SignupsState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .pretty()
        .init();

    info!("Starting Lagentry website API local development server");

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!("Configuration loaded successfully");

    let email_service = email_service_from_env().await.map_err(|e| {
        error!("Failed to create email service: {}", e);
        e
    })?;

    info!(provider = email_service.service_name(), "Email service ready");

    let chat = ChatState::in_memory(&config, email_service.clone());
    let sweeper = spawn_retention_sweeper(chat.store().clone(), chat.retention);
    let signups = SignupsState::new(email_service);

    let app = with_middleware(build_router(chat, signups), &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("Server starting on http://{}", addr);
    info!("Health check available at http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(sweeper) = sweeper {
        sweeper.abort();
    }

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
