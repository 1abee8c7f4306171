//! Lagentry Email Service
//!
//! Provides the transactional emails sent by the website API:
//! - SMTP delivery (the default provider for the marketing site)
//! - AWS SES integration, with LocalStack support
//! - Mock email service for testing and development
//! - A background [`Notifier`] so request handlers never wait on delivery

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod aws_ses;
pub mod content;
pub mod mock;
pub mod notifier;
pub mod smtp;

pub use content::{ChatAlert, DemoBooking, Notification, SignupContact, TemplateKind};
pub use notifier::{Notifier, NotifyOutcome};

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Email configuration error: {0}")]
    Configuration(String),

    #[error("Email validation error: {0}")]
    Validation(String),

    #[error("SMTP error: {0}")]
    Smtp(String),

    #[error("AWS SES error: {0}")]
    AwsSes(String),
}

/// Email message to be sent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub from: String,
    pub from_name: Option<String>,
    pub reply_to: Option<String>,
    pub bcc: Option<String>,
    pub subject: String,
    pub body_text: String,
    pub body_html: Option<String>,
    pub metadata: HashMap<String, String>,
}

impl EmailMessage {
    /// Create a new email message
    pub fn new(to: String, from: String, subject: String, body_text: String) -> Self {
        Self {
            to,
            from,
            from_name: None,
            reply_to: None,
            bcc: None,
            subject,
            body_text,
            body_html: None,
            metadata: HashMap::new(),
        }
    }

    /// Add HTML body content
    pub fn with_html(mut self, body_html: String) -> Self {
        self.body_html = Some(body_html);
        self
    }

    /// Set the display name shown next to the from address
    pub fn with_from_name(mut self, from_name: String) -> Self {
        self.from_name = Some(from_name);
        self
    }

    /// Add reply-to address
    pub fn with_reply_to(mut self, reply_to: String) -> Self {
        self.reply_to = Some(reply_to);
        self
    }

    /// Add a blind-copy recipient
    pub fn with_bcc(mut self, bcc: String) -> Self {
        self.bcc = Some(bcc);
        self
    }

    /// Add metadata for tracking
    pub fn with_metadata(mut self, key: String, value: String) -> Self {
        self.metadata.insert(key, value);
        self
    }

    /// Basic sanity check shared by the real providers
    pub fn validate_addresses(&self) -> Result<(), EmailError> {
        let addresses = [Some(&self.to), Some(&self.from), self.reply_to.as_ref(), self.bcc.as_ref()];
        if addresses.iter().flatten().all(|a| a.contains('@')) {
            Ok(())
        } else {
            Err(EmailError::Validation(
                "Invalid email address format".to_string(),
            ))
        }
    }
}

/// Email delivery receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailReceipt {
    pub message_id: String,
    pub sent_at: DateTime<Utc>,
    pub provider: String,
    pub metadata: HashMap<String, String>,
}

/// Who outgoing mail is from, and where internal copies go
#[derive(Debug, Clone)]
pub struct EmailIdentity {
    /// Envelope and header from address
    pub from_address: String,
    /// Display name for the from header
    pub from_name: String,
    /// Company inbox: BCC on visitor mail, recipient of internal notifications
    pub company_email: String,
    /// Link to the admin chat panel used in chat notifications
    pub admin_chat_url: String,
}

impl Default for EmailIdentity {
    fn default() -> Self {
        Self {
            from_address: "info@lagentry.com".to_string(),
            from_name: "Zoya – Founder, Lagentry".to_string(),
            company_email: "info@lagentry.com".to_string(),
            admin_chat_url: "https://aganret.com/admin/chats".to_string(),
        }
    }
}

/// SMTP relay settings
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    /// Require STARTTLS on non-465 ports
    pub use_tls: bool,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            use_tls: false,
            username: None,
            password: None,
        }
    }
}

/// Email service configuration
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Email service provider (smtp, ses, mock)
    pub provider: String,
    /// Enable email sending (can disable for testing)
    pub enabled: bool,
    /// SMTP relay settings
    pub smtp: SmtpSettings,
    /// AWS region for SES
    pub aws_region: Option<String>,
    /// AWS endpoint URL (for LocalStack)
    pub aws_endpoint_url: Option<String>,
    /// Sender identity and internal recipients
    pub identity: EmailIdentity,
}

impl EmailConfig {
    /// Create email config from environment variables
    pub fn from_env() -> Result<Self, EmailError> {
        dotenvy::dotenv().ok();

        let provider = env_non_empty("EMAIL_PROVIDER").unwrap_or_else(|| "smtp".to_string());

        let enabled = env_non_empty("EMAIL_ENABLED")
            .map(|v| v.parse().unwrap_or(true))
            .unwrap_or(true);

        let port = match env_non_empty("EMAIL_PORT") {
            Some(raw) => raw.parse().map_err(|_| {
                EmailError::Configuration(format!("EMAIL_PORT must be a port number, got {}", raw))
            })?,
            None => 587,
        };

        let from_env_user = env_non_empty("EMAIL_USER").or_else(|| env_non_empty("EMAIL_FROM"));
        let password = env_non_empty("EMAIL_PASSWORD").or_else(|| env_non_empty("EMAIL_PASS"));

        let smtp = SmtpSettings {
            host: env_non_empty("EMAIL_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
            port,
            use_tls: env_non_empty("EMAIL_USE_TLS").as_deref() == Some("true"),
            username: from_env_user.clone(),
            password,
        };

        let defaults = EmailIdentity::default();
        let admin_chat_url = env_non_empty("FRONTEND_URL")
            .map(|url| format!("{}/admin/chats", url.trim_end_matches('/')))
            .unwrap_or(defaults.admin_chat_url);

        let identity = EmailIdentity {
            from_address: env_non_empty("EMAIL_FROM")
                .or(from_env_user)
                .unwrap_or(defaults.from_address),
            from_name: env_non_empty("EMAIL_FROM_NAME").unwrap_or(defaults.from_name),
            company_email: env_non_empty("COMPANY_EMAIL").unwrap_or(defaults.company_email),
            admin_chat_url,
        };

        Ok(Self {
            provider,
            enabled,
            smtp,
            aws_region: env_non_empty("AWS_REGION"),
            aws_endpoint_url: env_non_empty("AWS_ENDPOINT_URL"),
            identity,
        })
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Email service trait for different implementations
#[async_trait::async_trait]
pub trait EmailService: Send + Sync {
    /// Send an email message
    async fn send_email(&self, message: EmailMessage) -> Result<EmailReceipt, EmailError>;

    /// Sender identity used to address transactional mail
    fn identity(&self) -> &EmailIdentity;

    /// Short provider name for logs
    fn service_name(&self) -> &'static str;

    /// Render and send one of the website's transactional emails
    async fn send_notification(
        &self,
        notification: &Notification,
    ) -> Result<EmailReceipt, EmailError> {
        let message = content::render(notification, self.identity());
        self.send_email(message).await
    }
}

/// Email service factory
pub struct EmailServiceFactory;

impl EmailServiceFactory {
    /// Create email service based on configuration
    pub async fn create(config: EmailConfig) -> Result<Box<dyn EmailService>, EmailError> {
        if !config.enabled {
            tracing::info!("Email service disabled, emails will not be sent");
            return Ok(Box::new(mock::MockEmailService::new_disabled()));
        }

        match config.provider.as_str() {
            "smtp" => {
                if config.smtp.username.is_none() || config.smtp.password.is_none() {
                    tracing::error!("Email credentials not configured. Emails will not be sent.");
                    return Ok(Box::new(mock::MockEmailService::new_disabled()));
                }
                tracing::info!(host = %config.smtp.host, port = config.smtp.port, "Creating SMTP email service");
                Ok(Box::new(smtp::SmtpEmailService::new(config)?))
            }
            "ses" | "aws-ses" => {
                tracing::info!("Creating AWS SES email service");
                let ses_service = aws_ses::SesEmailService::new(config).await?;
                Ok(Box::new(ses_service))
            }
            "mock" => {
                tracing::info!("Creating mock email service");
                Ok(Box::new(mock::MockEmailService::with_identity(
                    config.identity,
                )))
            }
            provider => Err(EmailError::Configuration(format!(
                "Unknown email provider: {}. Supported providers: smtp, ses, mock",
                provider
            ))),
        }
    }
}
