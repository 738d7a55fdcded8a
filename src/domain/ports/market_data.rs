use async_trait::async_trait;

use crate::domain::entities::candle::CandleSeries;
use crate::domain::error::DomainError;

/// Source of daily OHLCV history.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Fetch up to `days` calendar days of daily candles, oldest first.
    async fn fetch_series(&self, symbol: &str, days: u32) -> Result<CandleSeries, DomainError>;
}
