//! GitHub contents-API publisher for the snapshot/decision archive repo.
//!
//! Create-or-update: an existing file's SHA is looked up first and passed
//! back with the PUT, which is how the contents API expresses "overwrite".

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::error::DomainError;
use crate::domain::ports::publisher::ArchivePublisher;

#[derive(Clone)]
pub struct GithubCredentials {
    pub user: String,
    pub token: String,
    pub repo: String,
}

pub struct GithubPublisher {
    credentials: Option<GithubCredentials>,
    branch: String,
    client: reqwest::Client,
}

impl GithubPublisher {
    pub fn new(credentials: Option<GithubCredentials>) -> Self {
        Self {
            credentials,
            branch: "main".to_string(),
            client: reqwest::Client::builder()
                .user_agent("fxpulse")
                .build()
                .unwrap_or_default(),
        }
    }

    /// A publisher that never uploads; used in tests.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    async fn existing_sha(
        &self,
        creds: &GithubCredentials,
        url: &str,
    ) -> Result<Option<String>, DomainError> {
        #[derive(Deserialize)]
        struct ContentsMeta {
            sha: String,
        }

        let resp = self
            .client
            .get(url)
            .bearer_auth(&creds.token)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| DomainError::Feed(format!("GitHub lookup failed: {e}")))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(DomainError::Feed(format!(
                "GitHub lookup returned {}",
                resp.status()
            )));
        }
        let meta: ContentsMeta = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(e.to_string()))?;
        Ok(Some(meta.sha))
    }
}

#[async_trait]
impl ArchivePublisher for GithubPublisher {
    async fn publish(&self, path: &str, content: &str) -> Result<(), DomainError> {
        let Some(creds) = &self.credentials else {
            warn!("GitHub credentials not set, skipping upload");
            return Ok(());
        };

        let url = format!(
            "https://api.github.com/repos/{}/{}/contents/{path}",
            creds.user, creds.repo
        );

        let mut payload = serde_json::json!({
            "message": format!("Update {path}"),
            "content": base64::engine::general_purpose::STANDARD.encode(content),
            "branch": self.branch,
        });
        if let Some(sha) = self.existing_sha(creds, &url).await? {
            payload["sha"] = serde_json::Value::String(sha);
        }

        let resp = self
            .client
            .put(&url)
            .bearer_auth(&creds.token)
            .header("Accept", "application/vnd.github+json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| DomainError::Feed(format!("GitHub upload failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(DomainError::Feed(format!(
                "GitHub upload returned {}",
                resp.status()
            )));
        }
        info!(path, "archived to GitHub");
        Ok(())
    }
}
