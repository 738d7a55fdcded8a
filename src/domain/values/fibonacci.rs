//! Fibonacci retracement context over the trailing year of closes.
//!
//! Levels are measured down from the 252-bar high, so "0.0%" sits at the
//! high and "100%" at the low. The position ratio locates the current
//! price inside the annual range and maps to a coarse market phase.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::entities::candle::CandleSeries;
use crate::domain::error::DomainError;

/// Trading days in the lookback window.
pub const LOOKBACK_BARS: usize = 252;

const RETRACEMENTS: [(&str, f64); 7] = [
    ("0.0%", 0.0),
    ("23.6%", 0.236),
    ("38.2%", 0.382),
    ("50.0%", 0.5),
    ("61.8%", 0.618),
    ("78.6%", 0.786),
    ("100%", 1.0),
];

/// Where the price sits inside its annual range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketPhase {
    Ceiling,
    Mid,
    Accumulation,
    Floor,
}

impl MarketPhase {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 0.85 {
            MarketPhase::Ceiling
        } else if ratio > 0.5 {
            MarketPhase::Mid
        } else if ratio > 0.2 {
            MarketPhase::Accumulation
        } else {
            MarketPhase::Floor
        }
    }
}

impl fmt::Display for MarketPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketPhase::Ceiling => write!(f, "ceiling zone"),
            MarketPhase::Mid => write!(f, "mid-range"),
            MarketPhase::Accumulation => write!(f, "accumulation"),
            MarketPhase::Floor => write!(f, "floor"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiboLevel {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiboContext {
    pub levels: Vec<FiboLevel>,
    pub nearest_level: String,
    pub nearest_value: f64,
    /// Nearest level at or below the current price (the low when price has
    /// broken under every level).
    pub nearest_support: f64,
    pub position_ratio: f64,
    pub current_price: f64,
    pub high: f64,
    pub low: f64,
    pub phase: MarketPhase,
}

impl FiboContext {
    pub fn from_series(series: &CandleSeries) -> Result<Self, DomainError> {
        let closes = series.recent_closes(LOOKBACK_BARS);
        let current = *closes.last().ok_or_else(|| {
            DomainError::InvalidInput(format!("empty series for {}", series.symbol))
        })?;

        let high = closes.iter().copied().fold(f64::MIN, f64::max);
        let low = closes.iter().copied().fold(f64::MAX, f64::min);
        // unit fallback keeps a flat series from dividing by zero
        let diff = if high == low { 1.0 } else { high - low };

        let levels: Vec<FiboLevel> = RETRACEMENTS
            .iter()
            .map(|(label, r)| FiboLevel {
                label: (*label).to_string(),
                value: high - r * diff,
            })
            .collect();

        let nearest = levels
            .iter()
            .min_by(|a, b| {
                let da = (a.value - current).abs();
                let db = (b.value - current).abs();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .cloned()
            .ok_or_else(|| DomainError::InvalidInput("no retracement levels".into()))?;

        let nearest_support = levels
            .iter()
            .filter(|l| l.value <= current)
            .map(|l| l.value)
            .fold(f64::MIN, f64::max);
        let nearest_support = if nearest_support == f64::MIN {
            low
        } else {
            nearest_support
        };

        let ratio = (current - low) / diff;

        Ok(Self {
            levels,
            nearest_level: nearest.label,
            nearest_value: nearest.value,
            nearest_support,
            position_ratio: ratio,
            current_price: current,
            high,
            low,
            phase: MarketPhase::from_ratio(ratio),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::candle::Candle;
    use chrono::{Duration, TimeZone, Utc};

    fn series(closes: &[f64]) -> CandleSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let candles = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Candle {
                timestamp: start + Duration::days(i as i64),
                open: c,
                high: c,
                low: c,
                close: c,
                volume: None,
            })
            .collect();
        CandleSeries::new("EURUSD=X", candles)
    }

    #[test]
    fn levels_span_the_annual_range() {
        let closes: Vec<f64> = (0..=100).map(|i| 1.0 + i as f64 * 0.01).collect();
        let ctx = FiboContext::from_series(&series(&closes)).unwrap();
        assert_eq!(ctx.high, 2.0);
        assert_eq!(ctx.low, 1.0);
        assert_eq!(ctx.levels[0].value, 2.0); // 0.0%
        assert_eq!(ctx.levels[6].value, 1.0); // 100%
        assert!((ctx.levels[3].value - 1.5).abs() < 1e-12); // 50.0%
    }

    #[test]
    fn price_at_top_of_range() {
        let closes: Vec<f64> = (0..=100).map(|i| 1.0 + i as f64 * 0.01).collect();
        let ctx = FiboContext::from_series(&series(&closes)).unwrap();
        assert!((ctx.position_ratio - 1.0).abs() < 1e-12);
        assert_eq!(ctx.phase, MarketPhase::Ceiling);
        assert_eq!(ctx.nearest_level, "0.0%");
        assert_eq!(ctx.nearest_support, 2.0);
    }

    #[test]
    fn price_at_bottom_of_range() {
        let mut closes: Vec<f64> = (0..=100).map(|i| 2.0 - i as f64 * 0.01).collect();
        closes.push(1.0);
        let ctx = FiboContext::from_series(&series(&closes)).unwrap();
        assert!(ctx.position_ratio < 0.01);
        assert_eq!(ctx.phase, MarketPhase::Floor);
        assert_eq!(ctx.nearest_support, 1.0);
    }

    #[test]
    fn flat_series_does_not_divide_by_zero() {
        let ctx = FiboContext::from_series(&series(&vec![1.1; 300])).unwrap();
        assert_eq!(ctx.position_ratio, 0.0);
        assert_eq!(ctx.phase, MarketPhase::Floor);
        assert_eq!(ctx.current_price, 1.1);
    }

    #[test]
    fn phase_boundaries() {
        assert_eq!(MarketPhase::from_ratio(0.86), MarketPhase::Ceiling);
        assert_eq!(MarketPhase::from_ratio(0.85), MarketPhase::Mid);
        assert_eq!(MarketPhase::from_ratio(0.51), MarketPhase::Mid);
        assert_eq!(MarketPhase::from_ratio(0.5), MarketPhase::Accumulation);
        assert_eq!(MarketPhase::from_ratio(0.2), MarketPhase::Floor);
    }

    #[test]
    fn lookback_is_capped_at_252_bars() {
        // older spike outside the window must be ignored
        let mut closes = vec![9.0; 50];
        closes.extend(std::iter::repeat(1.0).take(252));
        let ctx = FiboContext::from_series(&series(&closes)).unwrap();
        assert_eq!(ctx.high, 1.0);
    }
}
