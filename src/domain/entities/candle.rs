use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single daily OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
}

/// An ordered run of candles for one symbol, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandleSeries {
    pub symbol: String,
    pub candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(symbol: impl Into<String>, candles: Vec<Candle>) -> Self {
        Self {
            symbol: symbol.into(),
            candles,
        }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// Last `n` closes, oldest first. Shorter series return everything.
    pub fn recent_closes(&self, n: usize) -> Vec<f64> {
        let start = self.candles.len().saturating_sub(n);
        self.candles[start..].iter().map(|c| c.close).collect()
    }

    /// A new series truncated to the first `n` candles (used when walking
    /// history bar by bar).
    pub fn up_to(&self, n: usize) -> CandleSeries {
        let end = n.min(self.candles.len());
        CandleSeries {
            symbol: self.symbol.clone(),
            candles: self.candles[..end].to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn candle(close: f64) -> Candle {
        Candle {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: None,
        }
    }

    #[test]
    fn recent_closes_handles_short_series() {
        let series = CandleSeries::new("EURUSD=X", vec![candle(1.0), candle(2.0)]);
        assert_eq!(series.recent_closes(5), vec![1.0, 2.0]);
        assert_eq!(series.recent_closes(1), vec![2.0]);
    }

    #[test]
    fn up_to_truncates() {
        let series = CandleSeries::new("EURUSD=X", vec![candle(1.0), candle(2.0), candle(3.0)]);
        assert_eq!(series.up_to(2).closes(), vec![1.0, 2.0]);
        assert_eq!(series.up_to(10).len(), 3);
    }
}
