//! Lagentry website API - AWS Lambda Runtime

use lambda_http::{run, Error};
use tracing::info;

use lagentry_app::{create_app, email_service_from_env};
use lagentry_common::Config;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .without_time()
        .init();

    info!("Initializing Lagentry website API Lambda");

    let config = Config::from_env()
        .map_err(|e| Error::from(format!("Configuration error: {}", e)))?;

    let email_service = email_service_from_env()
        .await
        .map_err(|e| Error::from(format!("Email service initialization error: {}", e)))?;

    info!(provider = email_service.service_name(), "Email service ready");

    // No background sweeper here: idle chats are purged when the admin list is read
    let app = create_app(&config, email_service);

    info!("Lagentry website API Lambda ready to serve requests");

    run(app).await
}
