use serde::{Deserialize, Serialize};
use std::fmt;

/// Momentum direction of a related asset whose RSI crossed a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Momentum {
    Bullish,
    Bearish,
}

impl fmt::Display for Momentum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Momentum::Bullish => write!(f, "bullish"),
            Momentum::Bearish => write!(f, "bearish"),
        }
    }
}

/// A related-asset momentum reading worth flagging alongside the decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedOpportunity {
    pub symbol: String,
    /// How the asset relates to the primary pair (e.g. "inverse USD proxy").
    pub relation: String,
    pub rsi: f64,
    pub momentum: Momentum,
}

impl RelatedOpportunity {
    pub fn summary(&self) -> String {
        format!("{} ({}) RSI {:.2} -> {}", self.symbol, self.relation, self.rsi, self.momentum)
    }
}
