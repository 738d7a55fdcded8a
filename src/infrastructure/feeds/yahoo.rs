//! Daily candle history from the Yahoo Finance v8 chart API (no auth).

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::candle::{Candle, CandleSeries};
use crate::domain::error::DomainError;
use crate::domain::ports::market_data::MarketData;

pub struct YahooMarketData {
    client: reqwest::Client,
}

impl YahooMarketData {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(
                    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                     AppleWebKit/537.36 (KHTML, like Gecko) \
                     Chrome/120.0.0.0 Safari/537.36",
                )
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for YahooMarketData {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, serde::Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, serde::Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, serde::Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, serde::Deserialize)]
struct ChartIndicators {
    quote: Vec<QuoteArrays>,
}

#[derive(Debug, serde::Deserialize)]
struct QuoteArrays {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[async_trait]
impl MarketData for YahooMarketData {
    async fn fetch_series(&self, symbol: &str, days: u32) -> Result<CandleSeries, DomainError> {
        let now = Utc::now();
        let period1 = (now - Duration::days(days as i64)).timestamp();
        let period2 = now.timestamp();
        let url = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{symbol}\
             ?period1={period1}&period2={period2}&interval=1d"
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::Feed(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DomainError::Feed(format!(
                "Yahoo API returned {} for {symbol}",
                resp.status()
            )));
        }

        let data: ChartResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(e.to_string()))?;

        if let Some(err) = data.chart.error {
            return Err(DomainError::Feed(format!("Yahoo error: {err}")));
        }

        let result = data
            .chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .ok_or_else(|| DomainError::Parse(format!("no chart result for {symbol}")))?;

        let timestamps = result
            .timestamp
            .ok_or_else(|| DomainError::Parse(format!("no timestamps for {symbol}")))?;
        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::Parse(format!("no quote arrays for {symbol}")))?;

        let candles = build_candles(&timestamps, &quote);
        if candles.is_empty() {
            return Err(DomainError::Feed(format!("empty candle series for {symbol}")));
        }

        Ok(CandleSeries::new(symbol, candles))
    }
}

/// Zip the parallel quote arrays into candles, dropping bars with missing
/// OHLC values (Yahoo pads holidays with nulls).
fn build_candles(timestamps: &[i64], quote: &QuoteArrays) -> Vec<Candle> {
    let at = |v: &[Option<f64>], i: usize| v.get(i).copied().flatten();

    timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let open = at(&quote.open, i)?;
            let high = at(&quote.high, i)?;
            let low = at(&quote.low, i)?;
            let close = at(&quote.close, i)?;
            let timestamp = DateTime::<Utc>::from_timestamp(ts, 0)?;
            Some(Candle {
                timestamp,
                open,
                high,
                low,
                close,
                volume: at(&quote.volume, i),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_candles_skips_null_bars() {
        let quote = QuoteArrays {
            open: vec![Some(1.0), None, Some(1.2)],
            high: vec![Some(1.1), Some(1.1), Some(1.3)],
            low: vec![Some(0.9), Some(0.9), Some(1.1)],
            close: vec![Some(1.05), Some(1.1), Some(1.25)],
            volume: vec![Some(100.0), None, None],
        };
        let candles = build_candles(&[1_700_000_000, 1_700_086_400, 1_700_172_800], &quote);
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].close, 1.05);
        assert_eq!(candles[1].close, 1.25);
        assert_eq!(candles[1].volume, None);
    }

    #[test]
    fn build_candles_tolerates_short_arrays() {
        let quote = QuoteArrays {
            open: vec![Some(1.0)],
            high: vec![Some(1.1)],
            low: vec![Some(0.9)],
            close: vec![],
            volume: vec![],
        };
        assert!(build_candles(&[1_700_000_000], &quote).is_empty());
    }
}
