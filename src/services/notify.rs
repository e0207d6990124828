use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    ReliabilityMilestone,
    CollaborationUpdate,
}

/// Fire-and-forget notification delivery. Implementations must swallow their
/// own failures: a notification that cannot be delivered is logged and
/// dropped, never surfaced to the caller of the primary operation.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, user_id: &str, kind: NotificationKind, payload: serde_json::Value);
}

/// Posts notifications to a webhook endpoint.
pub struct WebhookNotifier {
    url: String,
    client: Client,
}

impl WebhookNotifier {
    pub fn new(url: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { url, client }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, user_id: &str, kind: NotificationKind, payload: serde_json::Value) {
        let body = serde_json::json!({
            "userId": user_id,
            "kind": kind,
            "payload": payload,
        });

        match self.client.post(&self.url).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("Delivered {:?} notification to {}", kind, user_id);
            }
            Ok(response) => {
                tracing::warn!(
                    "Notification webhook returned {} for user {}",
                    response.status(),
                    user_id
                );
            }
            Err(e) => {
                tracing::warn!("Failed to deliver notification to {}: {}", user_id, e);
            }
        }
    }
}

/// Logs notifications instead of delivering them. Default when no webhook is
/// configured.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, user_id: &str, kind: NotificationKind, payload: serde_json::Value) {
        tracing::info!("Notification for {}: {:?} {}", user_id, kind, payload);
    }
}
