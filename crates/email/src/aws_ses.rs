//! AWS SES Email Service Implementation
//!
//! Provides email delivery through AWS Simple Email Service (SES)
//! with support for LocalStack testing environment.

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_ses::config::SharedCredentialsProvider;
use aws_sdk_ses::types::{Body, Content, Destination, Message};
use aws_sdk_ses::Client as SesClient;
use chrono::Utc;

use crate::{EmailConfig, EmailError, EmailIdentity, EmailMessage, EmailReceipt, EmailService};

/// AWS SES email service implementation
pub struct SesEmailService {
    client: SesClient,
    config: EmailConfig,
}

impl SesEmailService {
    /// Create a new SES email service
    pub async fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let region = config
            .aws_region
            .clone()
            .unwrap_or_else(|| "us-east-1".to_string());

        let aws_config = match config.aws_endpoint_url.as_ref() {
            Some(endpoint_url) => {
                tracing::info!("Using custom AWS endpoint: {}", endpoint_url);

                // For LocalStack, use dummy credentials
                let credentials = Credentials::new(
                    "test-access-key",
                    "test-secret-key",
                    None,
                    None,
                    "localstack-email-provider",
                );

                aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(region))
                    .endpoint_url(endpoint_url)
                    .credentials_provider(SharedCredentialsProvider::new(credentials))
                    .load()
                    .await
            }
            None => {
                aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(region))
                    .load()
                    .await
            }
        };

        let client = SesClient::new(&aws_config);

        // Connectivity check only; LocalStack may not have SES fully configured yet
        if let Err(e) = client.get_send_quota().send().await {
            tracing::warn!(
                "Failed to connect to SES (may be expected in LocalStack): {}",
                e
            );
        } else {
            tracing::info!("Successfully connected to AWS SES");
        }

        Ok(Self { client, config })
    }

    /// Convert email message to SES format
    fn build_ses_message(&self, message: &EmailMessage) -> Result<Message, EmailError> {
        let subject = Content::builder()
            .data(&message.subject)
            .charset("UTF-8")
            .build()
            .map_err(|e| EmailError::AwsSes(format!("Failed to build subject: {}", e)))?;

        let text_content = Content::builder()
            .data(&message.body_text)
            .charset("UTF-8")
            .build()
            .map_err(|e| EmailError::AwsSes(format!("Failed to build text content: {}", e)))?;

        let mut body_builder = Body::builder().text(text_content);

        if let Some(html_body) = &message.body_html {
            let html_content = Content::builder()
                .data(html_body)
                .charset("UTF-8")
                .build()
                .map_err(|e| EmailError::AwsSes(format!("Failed to build HTML content: {}", e)))?;

            body_builder = body_builder.html(html_content);
        }

        Ok(Message::builder()
            .subject(subject)
            .body(body_builder.build())
            .build())
    }

    /// Build destination with the primary and blind-copy recipients
    fn build_destination(&self, message: &EmailMessage) -> Destination {
        let mut builder = Destination::builder().to_addresses(&message.to);
        if let Some(bcc) = &message.bcc {
            builder = builder.bcc_addresses(bcc);
        }
        builder.build()
    }
}

/// SES source header. Non-ASCII display names would need MIME encoded-words,
/// so those fall back to the bare address.
fn source_address(message: &EmailMessage) -> String {
    match &message.from_name {
        Some(name) if name.is_ascii() && !name.contains('"') => {
            format!("\"{}\" <{}>", name, message.from)
        }
        _ => message.from.clone(),
    }
}

#[async_trait::async_trait]
impl EmailService for SesEmailService {
    async fn send_email(&self, message: EmailMessage) -> Result<EmailReceipt, EmailError> {
        tracing::info!("Sending email via AWS SES to: {}", message.to);

        message.validate_addresses()?;

        let ses_message = self.build_ses_message(&message)?;
        let destination = self.build_destination(&message);

        let mut send_builder = self
            .client
            .send_email()
            .source(source_address(&message))
            .destination(destination)
            .message(ses_message);

        if let Some(reply_to) = &message.reply_to {
            send_builder = send_builder.reply_to_addresses(reply_to);
        }

        let result = send_builder
            .send()
            .await
            .map_err(|e| EmailError::AwsSes(format!("Failed to send email: {}", e)))?;

        let message_id = result.message_id().to_string();

        tracing::info!(
            "Email sent successfully via SES, message ID: {}",
            message_id
        );

        Ok(EmailReceipt {
            message_id,
            sent_at: Utc::now(),
            provider: "aws-ses".to_string(),
            metadata: message.metadata,
        })
    }

    fn identity(&self) -> &EmailIdentity {
        &self.config.identity
    }

    fn service_name(&self) -> &'static str {
        "aws-ses"
    }
}
