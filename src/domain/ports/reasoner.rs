//! Port for the external reasoning engine.
//!
//! The engine is addressed through a small text protocol: the decision core
//! sends command strings such as `forecast [1.05, 1.06] with_limit 1.04`
//! and interprets the tagged reply. A structured `predict` call scores a
//! flat feature map into a signal with confidence; its internals live
//! outside this repository.

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::domain::error::DomainError;
use crate::domain::values::confidence::Confidence;
use crate::domain::values::signal::Signal;

/// Structured scoring output.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub signal: Signal,
    pub confidence: Confidence,
    pub meta: serde_json::Value,
}

impl Prediction {
    /// Neutral prediction used when the reasoner fails; the confidence gate
    /// will turn it into `HOLD:low_conf` rather than aborting the run.
    pub fn hold_with_error(err: &DomainError) -> Self {
        Self {
            signal: Signal::Hold,
            confidence: Confidence::default(),
            meta: serde_json::json!({ "error": err.to_string() }),
        }
    }

    /// Impulse-wave size hint for take-profit placement, when provided.
    pub fn wave_size(&self) -> Option<f64> {
        self.meta.get("wave1_size").and_then(|v| v.as_f64())
    }
}

#[async_trait]
pub trait Reasoner: Send + Sync {
    /// Provider name for logs and decision records.
    fn name(&self) -> &str;

    /// Send one command string, return the raw reply.
    async fn reason(&self, command: &str) -> Result<String, DomainError>;

    /// Score a flattened feature map into a signal.
    async fn predict(&self, features: &BTreeMap<String, f64>) -> Result<Prediction, DomainError>;
}
