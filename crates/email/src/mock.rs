//! Mock Email Service Implementation
//!
//! Provides in-memory email capture for testing without external dependencies.
//! Captured mail can be looked up by recipient or by template kind.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{EmailError, EmailIdentity, EmailMessage, EmailReceipt, EmailService, TemplateKind};

/// Email captured by the mock service
#[derive(Debug, Clone)]
pub struct CapturedEmail {
    pub message: EmailMessage,
    pub receipt: EmailReceipt,
    pub captured_at: DateTime<Utc>,
}

impl CapturedEmail {
    /// Template the email was rendered from, if it came from one
    pub fn template_kind(&self) -> Option<&str> {
        self.message.metadata.get("email_type").map(String::as_str)
    }
}

/// Mock email service for testing
#[derive(Debug, Clone)]
pub struct MockEmailService {
    emails: Arc<Mutex<Vec<CapturedEmail>>>,
    email_by_recipient: Arc<Mutex<HashMap<String, Vec<CapturedEmail>>>>,
    identity: EmailIdentity,
    enabled: bool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockEmailService {
    /// Create a new mock email service
    pub fn new() -> Self {
        Self::with_identity(EmailIdentity::default())
    }

    /// Create a mock that addresses mail from the given identity
    pub fn with_identity(identity: EmailIdentity) -> Self {
        Self {
            emails: Arc::new(Mutex::new(Vec::new())),
            email_by_recipient: Arc::new(Mutex::new(HashMap::new())),
            identity,
            enabled: true,
        }
    }

    /// Create a disabled mock email service.
    ///
    /// Stands in for a provider that has no credentials: every send fails
    /// with a configuration error and nothing is captured.
    pub fn new_disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    /// Get all captured emails
    pub fn get_all_emails(&self) -> Vec<CapturedEmail> {
        lock(&self.emails).clone()
    }

    /// Get emails sent to a specific recipient (To or BCC)
    pub fn get_emails_for_recipient(&self, email: &str) -> Vec<CapturedEmail> {
        lock(&self.email_by_recipient)
            .get(email)
            .cloned()
            .unwrap_or_default()
    }

    /// Get all captured emails rendered from a template
    pub fn get_emails_of_kind(&self, kind: TemplateKind) -> Vec<CapturedEmail> {
        lock(&self.emails)
            .iter()
            .filter(|e| e.template_kind() == Some(kind.as_str()))
            .cloned()
            .collect()
    }

    /// Get count of emails sent
    pub fn email_count(&self) -> usize {
        lock(&self.emails).len()
    }

    /// Clear all captured emails
    pub fn clear(&self) {
        lock(&self.emails).clear();
        lock(&self.email_by_recipient).clear();
    }

    /// Check if email sending is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EmailService for MockEmailService {
    async fn send_email(&self, message: EmailMessage) -> Result<EmailReceipt, EmailError> {
        if !self.enabled {
            tracing::warn!(to = %message.to, "Email transporter not configured, skipping send");
            return Err(EmailError::Configuration(
                "Email not configured".to_string(),
            ));
        }

        tracing::info!("Mock email service capturing email to: {}", message.to);

        let receipt = EmailReceipt {
            message_id: format!("mock-{}", Uuid::new_v4()),
            sent_at: Utc::now(),
            provider: "mock".to_string(),
            metadata: message.metadata.clone(),
        };

        let captured = CapturedEmail {
            message: message.clone(),
            receipt: receipt.clone(),
            captured_at: Utc::now(),
        };

        // Store email in global list
        lock(&self.emails).push(captured.clone());

        // Store email by recipient for easy lookup
        let mut by_recipient = lock(&self.email_by_recipient);
        if let Some(bcc) = &message.bcc {
            by_recipient
                .entry(bcc.clone())
                .or_default()
                .push(captured.clone());
        }
        by_recipient.entry(message.to).or_default().push(captured);

        tracing::info!(
            "Email captured successfully, message ID: {}",
            receipt.message_id
        );

        Ok(receipt)
    }

    fn identity(&self) -> &EmailIdentity {
        &self.identity
    }

    fn service_name(&self) -> &'static str {
        if self.enabled {
            "mock"
        } else {
            "mock-disabled"
        }
    }
}
