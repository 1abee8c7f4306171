//! SMTP Email Service Implementation
//!
//! Delivers mail through an authenticated SMTP relay. Port 465 uses
//! implicit TLS; other ports use STARTTLS when `use_tls` is set or the
//! port is 587, and plain SMTP otherwise.

use chrono::Utc;
use lettre::message::{header::ContentType, Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::{EmailConfig, EmailError, EmailIdentity, EmailMessage, EmailReceipt, EmailService};

/// SMTP email service implementation
pub struct SmtpEmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    config: EmailConfig,
}

impl SmtpEmailService {
    /// Build the SMTP transport; no connection is opened until the first send
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let smtp = &config.smtp;
        let (username, password) = match (&smtp.username, &smtp.password) {
            (Some(user), Some(pass)) => (user.clone(), pass.clone()),
            _ => {
                return Err(EmailError::Configuration(
                    "SMTP username and password are required".to_string(),
                ))
            }
        };

        let builder = if smtp.port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)
                .map_err(|e| EmailError::Configuration(format!("Invalid SMTP relay: {}", e)))?
        } else if smtp.use_tls || smtp.port == 587 {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)
                .map_err(|e| EmailError::Configuration(format!("Invalid SMTP relay: {}", e)))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp.host)
        };

        let transport = builder
            .port(smtp.port)
            .credentials(Credentials::new(username, password))
            .build();

        Ok(Self { transport, config })
    }
}

fn parse_address(raw: &str) -> Result<Address, EmailError> {
    raw.trim()
        .parse()
        .map_err(|e| EmailError::Validation(format!("Invalid email address {:?}: {}", raw, e)))
}

/// Convert email message to a MIME message
fn build_mime_message(message: &EmailMessage) -> Result<Message, EmailError> {
    let from = Mailbox::new(message.from_name.clone(), parse_address(&message.from)?);

    let mut builder = Message::builder()
        .from(from)
        .to(Mailbox::new(None, parse_address(&message.to)?))
        .subject(message.subject.clone())
        .message_id(None);

    if let Some(reply_to) = &message.reply_to {
        builder = builder.reply_to(Mailbox::new(None, parse_address(reply_to)?));
    }
    if let Some(bcc) = &message.bcc {
        builder = builder.bcc(Mailbox::new(None, parse_address(bcc)?));
    }

    let built = match &message.body_html {
        Some(html) => builder.multipart(MultiPart::alternative_plain_html(
            message.body_text.clone(),
            html.clone(),
        )),
        None => builder
            .header(ContentType::TEXT_PLAIN)
            .body(message.body_text.clone()),
    };

    built.map_err(|e| EmailError::Validation(format!("Failed to build email: {}", e)))
}

#[async_trait::async_trait]
impl EmailService for SmtpEmailService {
    async fn send_email(&self, message: EmailMessage) -> Result<EmailReceipt, EmailError> {
        tracing::info!("Sending email via SMTP to: {}", message.to);

        let mime = build_mime_message(&message)?;
        let message_id = mime
            .headers()
            .get_raw("Message-ID")
            .map(str::to_string)
            .unwrap_or_default();

        self.transport
            .send(mime)
            .await
            .map_err(|e| EmailError::Smtp(format!("Failed to send email: {}", e)))?;

        tracing::info!("Email sent successfully via SMTP, message ID: {}", message_id);

        Ok(EmailReceipt {
            message_id,
            sent_at: Utc::now(),
            provider: "smtp".to_string(),
            metadata: message.metadata,
        })
    }

    fn identity(&self) -> &EmailIdentity {
        &self.config.identity
    }

    fn service_name(&self) -> &'static str {
        "smtp"
    }
}
