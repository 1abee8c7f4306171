//! Idle-conversation retention

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use lagentry_common::Config;
use tokio::task::JoinHandle;

use super::{ConversationStore, StoreResult};

/// Upper bound on configurable retention (ten years)
const MAX_IDLE_HOURS: u64 = 24 * 365 * 10;

/// How long idle conversations are kept and how often to check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// `None` keeps conversations forever
    pub max_idle: Option<chrono::Duration>,
    pub sweep_interval: Duration,
}

impl RetentionPolicy {
    pub fn new(max_idle_hours: u64, sweep_interval_secs: u64) -> Self {
        let max_idle = match max_idle_hours {
            0 => None,
            hours => Some(chrono::Duration::hours(hours.min(MAX_IDLE_HOURS) as i64)),
        };

        Self {
            max_idle,
            sweep_interval: Duration::from_secs(sweep_interval_secs.max(1)),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.chat_retention_hours, config.chat_sweep_interval_secs)
    }

    /// Retention disabled
    pub fn keep_forever() -> Self {
        Self::new(0, Config::default().chat_sweep_interval_secs)
    }

    pub fn is_enabled(&self) -> bool {
        self.max_idle.is_some()
    }

    /// Conversations last updated before this instant are expired
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.max_idle
            .and_then(|max_idle| now.checked_sub_signed(max_idle))
    }

    /// Purge expired conversations once. Returns how many were removed.
    pub async fn sweep_once(&self, store: &dyn ConversationStore) -> StoreResult<usize> {
        let Some(cutoff) = self.cutoff(Utc::now()) else {
            return Ok(0);
        };

        let removed = store.purge_idle(cutoff).await?;
        if removed > 0 {
            tracing::info!(removed, cutoff = %cutoff, "Purged idle conversations");
        }
        Ok(removed)
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Periodically purge idle conversations in the background.
///
/// Returns `None` when retention is disabled.
#[mutants::skip] // Runs forever; covered by sweep_once tests
pub fn spawn_retention_sweeper(
    store: Arc<dyn ConversationStore>,
    policy: RetentionPolicy,
) -> Option<JoinHandle<()>> {
    if !policy.is_enabled() {
        tracing::info!("Chat retention disabled; conversations are kept until restart");
        return None;
    }

    tracing::info!(
        interval_secs = policy.sweep_interval.as_secs(),
        "Starting chat retention sweeper"
    );

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(policy.sweep_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = policy.sweep_once(store.as_ref()).await {
                tracing::error!(error = %e, "Chat retention sweep failed");
            }
        }
    }))
}
