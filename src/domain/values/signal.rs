use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw trading signal emitted by the reasoner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Hold => write!(f, "HOLD"),
        }
    }
}

impl FromStr for Signal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BUY" => Ok(Signal::Buy),
            "SELL" => Ok(Signal::Sell),
            "HOLD" => Ok(Signal::Hold),
            _ => Err(format!("Unknown signal: {s}")),
        }
    }
}

/// Final call after the decision gates have run.
///
/// `Hold*` variants record which gate stopped an otherwise directional
/// signal, so decision records stay auditable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    ExecBuy,
    ExecSell,
    Hold,
    HoldLowConfidence,
    HoldLowAtr,
}

impl Verdict {
    pub fn exec(signal: Signal) -> Option<Verdict> {
        match signal {
            Signal::Buy => Some(Verdict::ExecBuy),
            Signal::Sell => Some(Verdict::ExecSell),
            Signal::Hold => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::ExecBuy => write!(f, "EXEC_BUY"),
            Verdict::ExecSell => write!(f, "EXEC_SELL"),
            Verdict::Hold => write!(f, "HOLD"),
            Verdict::HoldLowConfidence => write!(f, "HOLD:low_conf"),
            Verdict::HoldLowAtr => write!(f, "HOLD:low_atr"),
        }
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EXEC_BUY" => Ok(Verdict::ExecBuy),
            "EXEC_SELL" => Ok(Verdict::ExecSell),
            "HOLD" => Ok(Verdict::Hold),
            "HOLD:low_conf" => Ok(Verdict::HoldLowConfidence),
            "HOLD:low_atr" => Ok(Verdict::HoldLowAtr),
            _ => Err(format!("Unknown verdict: {s}")),
        }
    }
}
