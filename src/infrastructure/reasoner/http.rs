//! HTTP provider for an external reasoning engine.
//!
//! The engine is expected to expose two JSON endpoints:
//! `POST /reason  {"command": "..."}      -> {"reply": "..."}`
//! `POST /predict {"features": {...}}     -> {"signal": "...", "confidence": 0.x, "meta": {...}}`

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::domain::error::DomainError;
use crate::domain::ports::reasoner::{Prediction, Reasoner};
use crate::domain::values::confidence::Confidence;
use crate::domain::values::signal::Signal;

pub struct HttpReasoner {
    base_url: String,
    client: reqwest::Client,
}

impl HttpReasoner {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReasonResponse {
    reply: String,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    signal: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    meta: Option<serde_json::Value>,
}

#[async_trait]
impl Reasoner for HttpReasoner {
    fn name(&self) -> &str {
        "sherloock"
    }

    async fn reason(&self, command: &str) -> Result<String, DomainError> {
        let url = format!("{}/reason", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "command": command }))
            .send()
            .await
            .map_err(|e| DomainError::Reasoner(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DomainError::Reasoner(format!(
                "reasoner returned {}",
                resp.status()
            )));
        }

        let body: ReasonResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(e.to_string()))?;
        Ok(body.reply)
    }

    async fn predict(&self, features: &BTreeMap<String, f64>) -> Result<Prediction, DomainError> {
        let url = format!("{}/predict", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "features": features }))
            .send()
            .await
            .map_err(|e| DomainError::Reasoner(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DomainError::Reasoner(format!(
                "reasoner returned {}",
                resp.status()
            )));
        }

        let body: PredictResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(e.to_string()))?;

        // tolerate partial replies: an unknown signal reads as HOLD
        let signal = body
            .signal
            .as_deref()
            .and_then(|s| s.parse::<Signal>().ok())
            .unwrap_or(Signal::Hold);

        Ok(Prediction {
            signal,
            confidence: Confidence::clamped(body.confidence.unwrap_or(0.0)),
            meta: body.meta.unwrap_or_else(|| serde_json::json!({})),
        })
    }
}
