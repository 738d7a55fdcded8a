//! Built-in rule reasoner, the default when no external engine is
//! configured. It speaks the same text protocol so the decision core does
//! not care which provider answered.

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::domain::error::DomainError;
use crate::domain::ports::reasoner::{Prediction, Reasoner};
use crate::domain::values::confidence::Confidence;
use crate::domain::values::signal::Signal;

pub struct RuleReasoner;

impl RuleReasoner {
    /// Linear extrapolation of the sample: last value plus the average step.
    fn project(values: &[f64]) -> f64 {
        match values {
            [] => 0.0,
            [only] => *only,
            [first, .., last] => {
                let step = (last - first) / (values.len() - 1) as f64;
                last + step
            }
        }
    }

    fn handle_forecast(&self, body: &str) -> Result<String, DomainError> {
        let (values_part, limit_part) = body.split_once(" with_limit ").ok_or_else(|| {
            DomainError::Reasoner(format!("forecast command missing with_limit: {body}"))
        })?;
        let values: Vec<f64> = serde_json::from_str(values_part.trim())
            .map_err(|e| DomainError::Reasoner(format!("bad forecast values: {e}")))?;
        let limit: f64 = limit_part
            .trim()
            .parse()
            .map_err(|_| DomainError::Reasoner(format!("bad forecast limit: {limit_part}")))?;

        let projected = Self::project(&values);
        if projected >= limit {
            Ok(format!("[FORECAST] projected={projected:.5} limit={limit:.5}"))
        } else {
            Ok(format!("[RANGE] projected={projected:.5} below limit={limit:.5}"))
        }
    }
}

#[async_trait]
impl Reasoner for RuleReasoner {
    fn name(&self) -> &str {
        "rule"
    }

    async fn reason(&self, command: &str) -> Result<String, DomainError> {
        if let Some(body) = command.strip_prefix("forecast ") {
            return self.handle_forecast(body);
        }
        if command.starts_with("solve ") {
            return Ok("[LOGIC] constraints satisfiable".to_string());
        }
        Err(DomainError::Reasoner(format!("unknown command: {command}")))
    }

    async fn predict(&self, features: &BTreeMap<String, f64>) -> Result<Prediction, DomainError> {
        let rsi = features.get("rsi").copied().unwrap_or(50.0);
        let sentiment = features.get("sentiment").copied().unwrap_or(0.0);

        let (signal, confidence) = if rsi < 30.0 && sentiment < 0.3 {
            // deeper oversold reads as higher conviction
            (Signal::Buy, 0.7 + (30.0 - rsi) / 50.0)
        } else if rsi > 70.0 && sentiment > 0.8 {
            (Signal::Sell, 0.7 + (rsi - 70.0) / 50.0)
        } else {
            (Signal::Hold, 0.0)
        };

        Ok(Prediction {
            signal,
            confidence: Confidence::clamped(confidence),
            meta: serde_json::json!({ "provider": "rule" }),
        })
    }
}
