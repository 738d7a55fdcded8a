//! ntfy.sh push notifier.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::error::DomainError;
use crate::domain::ports::notifier::Notifier;

pub struct NtfyNotifier {
    topic: Option<String>,
    client: reqwest::Client,
}

impl NtfyNotifier {
    pub fn new(topic: Option<String>) -> Self {
        Self {
            topic: topic.filter(|t| !t.is_empty()),
            client: reqwest::Client::new(),
        }
    }

    /// A notifier that never sends anything; used in tests.
    pub fn disabled() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl Notifier for NtfyNotifier {
    async fn notify(&self, title: &str, message: &str) -> Result<(), DomainError> {
        let Some(topic) = &self.topic else {
            warn!("NTFY_TOPIC not set, skipping notification");
            return Ok(());
        };

        let url = format!("https://ntfy.sh/{topic}");
        let resp = self
            .client
            .post(&url)
            .header("Title", title)
            .header("Priority", "high")
            .body(message.to_string())
            .send()
            .await
            .map_err(|e| DomainError::Feed(format!("ntfy send failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(DomainError::Feed(format!(
                "ntfy returned {}",
                resp.status()
            )));
        }
        info!(topic, title, "notification sent");
        Ok(())
    }
}
