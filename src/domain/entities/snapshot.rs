use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::candle::Candle;
use crate::domain::indicators::IndicatorSet;
use crate::domain::values::fibonacci::FiboContext;

/// Reference quote captured alongside the snapshot (dollar index, yields...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroQuote {
    pub symbol: String,
    pub relation: String,
    pub price: f64,
}

/// One day's market picture for a symbol: last bar, indicators, Fibonacci
/// context and auxiliary signals. Persisted once per date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: String,
    pub symbol: String,
    pub date: NaiveDate,
    pub taken_at: DateTime<Utc>,
    pub last_candle: Candle,
    pub indicators: IndicatorSet,
    pub fibo: FiboContext,
    /// Headline sentiment in [-1, 1]; 0.0 when no source is configured.
    pub sentiment: f64,
    /// Search-trend interest in [0, 100] when a source is configured.
    pub search_interest: Option<f64>,
    pub macros: Vec<MacroQuote>,
}

impl Snapshot {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: String,
        last_candle: Candle,
        indicators: IndicatorSet,
        fibo: FiboContext,
        sentiment: f64,
        search_interest: Option<f64>,
        macros: Vec<MacroQuote>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            symbol,
            date: now.date_naive(),
            taken_at: now,
            last_candle,
            indicators,
            fibo,
            sentiment,
            search_interest,
            macros,
        }
    }

    /// Trimmed one-line summary pushed to the notifier.
    pub fn summary(&self) -> String {
        format!(
            "{} {:.4} | RSI {:.1} | fibo {} ({})",
            self.symbol,
            self.fibo.current_price,
            self.indicators.rsi_14,
            self.fibo.nearest_level,
            self.fibo.phase,
        )
    }
}
