//! Fire-and-forget notification dispatch
//!
//! Request handlers hand a [`Notification`] to the [`Notifier`] and return
//! immediately. Delivery runs on a spawned task; its outcome is logged and
//! never reaches the HTTP caller.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::{EmailService, Notification, TemplateKind};

/// Result of one delivery attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyOutcome {
    pub kind: TemplateKind,
    pub success: bool,
    pub message_id: Option<String>,
    pub error: Option<String>,
}

/// Background email dispatcher shared through application state
#[derive(Clone)]
pub struct Notifier {
    service: Arc<dyn EmailService>,
}

impl Notifier {
    pub fn new(service: Arc<dyn EmailService>) -> Self {
        Self { service }
    }

    /// Queue a notification on the runtime and return without waiting.
    ///
    /// The handle is only useful to tests; callers normally drop it.
    pub fn notify(&self, notification: Notification) -> JoinHandle<NotifyOutcome> {
        let this = self.clone();
        tokio::spawn(async move { this.deliver(notification).await })
    }

    /// Send a notification and report the outcome
    pub async fn deliver(&self, notification: Notification) -> NotifyOutcome {
        let kind = notification.kind();

        match self.service.send_notification(&notification).await {
            Ok(receipt) => {
                tracing::info!(
                    email_type = %kind,
                    provider = self.service.service_name(),
                    message_id = %receipt.message_id,
                    "Notification email sent"
                );
                NotifyOutcome {
                    kind,
                    success: true,
                    message_id: Some(receipt.message_id),
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!(
                    email_type = %kind,
                    provider = self.service.service_name(),
                    error = %e,
                    "Failed to send notification email"
                );
                NotifyOutcome {
                    kind,
                    success: false,
                    message_id: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
