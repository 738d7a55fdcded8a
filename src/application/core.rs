//! Decision core: translates the day's factors into a reasoner command,
//! interprets the reply and runs the execution gates.
//!
//! The gates run in a fixed order — confidence, volatility, signal — so a
//! blocked trade always reports the first gate that stopped it.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::reasoner::{Prediction, Reasoner};
use crate::domain::values::risk::{self, RiskLevels};
use crate::domain::values::signal::{Signal, Verdict};

/// RSI below this is oversold.
pub const RSI_OVERSOLD: f64 = 30.0;
/// RSI above this is overbought.
pub const RSI_OVERBOUGHT: f64 = 70.0;
/// Sentiment below this reads as panic.
pub const SENTIMENT_PANIC: f64 = 0.3;
/// Sentiment above this reads as euphoria.
pub const SENTIMENT_EUPHORIA: f64 = 0.8;
/// Minimum reasoner confidence to execute.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.75;

/// The day's factors, flattened for the core.
#[derive(Debug, Clone)]
pub struct FactorInput {
    pub rsi: f64,
    pub sentiment: f64,
    pub recent_prices: Vec<f64>,
    pub nearest_support: f64,
    pub price: f64,
    pub atr: f64,
    pub atr_ma: f64,
}

/// What the core concluded, ready to be wrapped into a decision record.
#[derive(Debug, Clone)]
pub struct CoreOutcome {
    pub signal: Signal,
    pub verdict: Verdict,
    pub confidence: f64,
    pub context: String,
    pub command: Option<String>,
    pub reply: Option<String>,
    pub risk: Option<RiskLevels>,
}

#[derive(Clone)]
pub struct DecisionCore {
    reasoner: Arc<dyn Reasoner>,
    confidence_threshold: f64,
}

impl DecisionCore {
    pub fn new(reasoner: Arc<dyn Reasoner>, confidence_threshold: f64) -> Self {
        Self {
            reasoner,
            confidence_threshold,
        }
    }

    /// Map factors to a reasoner command. `None` means the market is in
    /// range and there is nothing to ask.
    pub fn translate(input: &FactorInput) -> Option<(String, String)> {
        if input.rsi < RSI_OVERSOLD && input.sentiment < SENTIMENT_PANIC {
            let prices = serde_json::to_string(&input.recent_prices).unwrap_or_else(|_| "[]".into());
            let command = format!("forecast {prices} with_limit {:.5}", input.nearest_support);
            let context = format!(
                "Oversold (RSI {:.1}) with panic sentiment ({:.2}). Optimizing entry.",
                input.rsi, input.sentiment
            );
            return Some((command, context));
        }
        if input.rsi > RSI_OVERBOUGHT && input.sentiment > SENTIMENT_EUPHORIA {
            let command = "solve parallel euphoria where x > 10".to_string();
            let context = format!(
                "Euphoria (RSI {:.1}, sentiment {:.2}). Verifying logical constraints.",
                input.rsi, input.sentiment
            );
            return Some((command, context));
        }
        None
    }

    /// Translate a tagged reasoner reply into a signal.
    pub fn interpret(reply: &str) -> Signal {
        if reply.contains("[FORECAST") {
            Signal::Buy
        } else if reply.contains("[LOGIC") {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }

    pub async fn decide(&self, input: &FactorInput) -> CoreOutcome {
        let Some((command, context)) = Self::translate(input) else {
            return CoreOutcome {
                signal: Signal::Hold,
                verdict: Verdict::Hold,
                confidence: 0.0,
                context: "Market in range. No signal.".to_string(),
                command: None,
                reply: None,
                risk: None,
            };
        };

        debug!(command = %command, "querying reasoner");
        let (signal, reply) = match self.reasoner.reason(&command).await {
            Ok(reply) => (Self::interpret(&reply), Some(reply)),
            Err(e) => {
                warn!(error = %e, "reasoner call failed, treating as HOLD");
                (Signal::Hold, None)
            }
        };

        let mut features = BTreeMap::new();
        features.insert("rsi".to_string(), input.rsi);
        features.insert("sentiment".to_string(), input.sentiment);
        features.insert("price_now".to_string(), input.price);
        features.insert("atr_now".to_string(), input.atr);
        features.insert("atr_ma".to_string(), input.atr_ma);
        features.insert("nearest_support".to_string(), input.nearest_support);

        let prediction = match self.reasoner.predict(&features).await {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "reasoner predict failed");
                Prediction::hold_with_error(&e)
            }
        };

        let context = match &reply {
            Some(r) => format!("{context} | {}: {r}", self.reasoner.name()),
            None => format!("{context} | {} unavailable", self.reasoner.name()),
        };

        self.gate(signal, prediction, input, context, Some(command), reply)
    }

    fn gate(
        &self,
        signal: Signal,
        prediction: Prediction,
        input: &FactorInput,
        context: String,
        command: Option<String>,
        reply: Option<String>,
    ) -> CoreOutcome {
        let confidence = prediction.confidence.value();
        let mut outcome = CoreOutcome {
            signal,
            verdict: Verdict::Hold,
            confidence,
            context,
            command,
            reply,
            risk: None,
        };

        if !prediction.confidence.meets(self.confidence_threshold) {
            outcome.verdict = Verdict::HoldLowConfidence;
            return outcome;
        }
        if input.atr <= input.atr_ma {
            outcome.verdict = Verdict::HoldLowAtr;
            return outcome;
        }
        let Some(verdict) = Verdict::exec(signal) else {
            return outcome;
        };

        outcome.verdict = verdict;
        outcome.risk = risk::levels(input.price, input.atr, prediction.wave_size(), signal);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(rsi: f64, sentiment: f64) -> FactorInput {
        FactorInput {
            rsi,
            sentiment,
            recent_prices: vec![1.05, 1.06],
            nearest_support: 1.0,
            price: 1.06,
            atr: 0.01,
            atr_ma: 0.005,
        }
    }

    #[test]
    fn oversold_panic_builds_forecast_command() {
        let (command, context) = DecisionCore::translate(&input(25.0, 0.1)).unwrap();
        assert!(command.starts_with("forecast [1.05,1.06] with_limit 1.00000"));
        assert!(context.contains("Oversold"));
    }

    #[test]
    fn euphoria_builds_solve_command() {
        let (command, _) = DecisionCore::translate(&input(75.0, 0.9)).unwrap();
        assert!(command.starts_with("solve"));
    }

    #[test]
    fn ranging_market_has_no_command() {
        assert!(DecisionCore::translate(&input(50.0, 0.5)).is_none());
        // both factors must agree
        assert!(DecisionCore::translate(&input(25.0, 0.9)).is_none());
        assert!(DecisionCore::translate(&input(75.0, 0.1)).is_none());
    }

    #[test]
    fn interpret_tagged_replies() {
        assert_eq!(DecisionCore::interpret("[FORECAST] projected=1.08"), Signal::Buy);
        assert_eq!(DecisionCore::interpret("[LOGIC] sat"), Signal::Sell);
        assert_eq!(DecisionCore::interpret("no idea"), Signal::Hold);
    }
}
