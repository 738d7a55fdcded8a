use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::values::fibonacci::FiboContext;
use crate::domain::values::opportunity::RelatedOpportunity;
use crate::domain::values::risk::RiskLevels;
use crate::domain::values::signal::{Signal, Verdict};

/// The day's call and everything needed to audit it: the reasoner exchange,
/// the gate outcome and the risk levels when a trade would be taken.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub id: String,
    pub date: NaiveDate,
    pub symbol: String,
    pub signal: Signal,
    pub verdict: Verdict,
    pub confidence: f64,
    /// Human-readable rationale (phase, thresholds hit, reasoner notes).
    pub context: String,
    /// Command string sent to the reasoner, when the rule cascade fired.
    pub command: Option<String>,
    pub reasoner_reply: Option<String>,
    pub risk: Option<RiskLevels>,
    pub fibo: FiboContext,
    /// Closes handed to the reasoner as forecast input.
    pub sample_values: Vec<f64>,
    pub opportunities: Vec<RelatedOpportunity>,
    pub created_at: DateTime<Utc>,
}

impl DecisionRecord {
    /// Consolidated message for the notifier.
    pub fn summary(&self) -> String {
        let mut msg = format!(
            "Context: {} ({:.2}% of annual range)\nPrice: {:.4} | High: {:.4} | Low: {:.4}\nDecision: {}",
            self.fibo.phase,
            self.fibo.position_ratio * 100.0,
            self.fibo.current_price,
            self.fibo.high,
            self.fibo.low,
            self.verdict,
        );
        if let Some(risk) = &self.risk {
            msg.push_str(&format!(
                "\nSL {:.4} / TP {:.4}",
                risk.stop_loss, risk.take_profit
            ));
        }
        if !self.opportunities.is_empty() {
            msg.push_str("\nOpportunities:");
            for opp in &self.opportunities {
                msg.push_str(&format!("\n- {}", opp.summary()));
            }
        }
        msg
    }
}
