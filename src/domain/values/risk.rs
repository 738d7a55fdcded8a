//! Stop-loss / take-profit placement for executable signals.

use serde::{Deserialize, Serialize};

use crate::domain::values::signal::Signal;

/// Stop distance in ATR multiples.
pub const STOP_ATR_MULT: f64 = 2.0;
/// Golden-ratio extension applied to the impulse-wave size.
pub const TAKE_PROFIT_EXT: f64 = 1.618;
/// Fallback impulse size when the reasoner supplies none.
pub const DEFAULT_WAVE_ATR_MULT: f64 = 10.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RiskLevels {
    pub stop_loss: f64,
    pub take_profit: f64,
}

pub fn stop_loss(entry: f64, atr: f64, signal: Signal) -> Option<f64> {
    match signal {
        Signal::Buy => Some(entry - STOP_ATR_MULT * atr),
        Signal::Sell => Some(entry + STOP_ATR_MULT * atr),
        Signal::Hold => None,
    }
}

pub fn take_profit(entry: f64, wave_size: f64, signal: Signal) -> Option<f64> {
    match signal {
        Signal::Buy => Some(entry + TAKE_PROFIT_EXT * wave_size),
        Signal::Sell => Some(entry - TAKE_PROFIT_EXT * wave_size),
        Signal::Hold => None,
    }
}

/// Both levels for a directional signal; `None` for HOLD.
pub fn levels(entry: f64, atr: f64, wave_size: Option<f64>, signal: Signal) -> Option<RiskLevels> {
    let wave = wave_size.unwrap_or(atr * DEFAULT_WAVE_ATR_MULT);
    Some(RiskLevels {
        stop_loss: stop_loss(entry, atr, signal)?,
        take_profit: take_profit(entry, wave, signal)?,
    })
}
