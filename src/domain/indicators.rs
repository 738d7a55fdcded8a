//! Technical indicators over candle series.
//!
//! All functions return a shorter vector than their input: the first value
//! corresponds to the first bar with enough history, and an empty vector
//! means the series is too short for the requested period.

use serde::{Deserialize, Serialize};

use crate::domain::entities::candle::{Candle, CandleSeries};
use crate::domain::error::DomainError;

pub const RSI_PERIOD: usize = 14;
pub const ATR_PERIOD: usize = 14;
pub const EMA_PERIOD: usize = 20;
pub const ATR_MA_PERIOD: usize = 20;
pub const RECENT_PRICES: usize = 5;

/// Simple moving average.
pub fn sma(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period {
        return vec![];
    }
    let mut out = Vec::with_capacity(data.len() - period + 1);
    for i in period - 1..data.len() {
        let sum: f64 = data[i + 1 - period..=i].iter().sum();
        out.push(sum / period as f64);
    }
    out
}

/// Exponential moving average, seeded with the SMA of the first period.
pub fn ema(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period {
        return vec![];
    }
    let multiplier = 2.0 / (period as f64 + 1.0);
    let seed: f64 = data[..period].iter().sum::<f64>() / period as f64;

    let mut out = Vec::with_capacity(data.len() - period + 1);
    out.push(seed);
    for value in &data[period..] {
        let prev = out[out.len() - 1];
        out.push((value - prev) * multiplier + prev);
    }
    out
}

/// Wilder-smoothed relative strength index.
pub fn rsi(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period + 1 {
        return vec![];
    }

    let mut gains = Vec::with_capacity(data.len() - 1);
    let mut losses = Vec::with_capacity(data.len() - 1);
    for pair in data.windows(2) {
        let change = pair[1] - pair[0];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let mut avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period as f64;

    let to_rsi = |gain: f64, loss: f64| {
        if loss == 0.0 {
            return 100.0;
        }
        let rs = gain / loss;
        100.0 - (100.0 / (1.0 + rs))
    };

    let mut out = Vec::with_capacity(gains.len() - period + 1);
    out.push(to_rsi(avg_gain, avg_loss));
    for i in period..gains.len() {
        avg_gain = (avg_gain * (period - 1) as f64 + gains[i]) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + losses[i]) / period as f64;
        out.push(to_rsi(avg_gain, avg_loss));
    }
    out
}

/// Average true range, Wilder-smoothed.
pub fn atr(candles: &[Candle], period: usize) -> Vec<f64> {
    if period == 0 || candles.len() < period + 1 {
        return vec![];
    }

    let mut true_ranges = Vec::with_capacity(candles.len() - 1);
    for pair in candles.windows(2) {
        let high_low = pair[1].high - pair[1].low;
        let high_close = (pair[1].high - pair[0].close).abs();
        let low_close = (pair[1].low - pair[0].close).abs();
        true_ranges.push(high_low.max(high_close).max(low_close));
    }

    let mut value = true_ranges[..period].iter().sum::<f64>() / period as f64;
    let mut out = Vec::with_capacity(true_ranges.len() - period + 1);
    out.push(value);
    for tr in &true_ranges[period..] {
        value = (value * (period - 1) as f64 + tr) / period as f64;
        out.push(value);
    }
    out
}

/// Last-bar indicator values carried in the daily snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub rsi_14: f64,
    pub atr_14: f64,
    pub ema_20: f64,
    /// 20-bar SMA of the ATR series, the quiet-market gate reference.
    pub atr_ma_20: f64,
    pub recent_prices: Vec<f64>,
}

impl IndicatorSet {
    pub fn from_series(series: &CandleSeries) -> Result<Self, DomainError> {
        let closes = series.closes();

        let rsi_series = rsi(&closes, RSI_PERIOD);
        let atr_series = atr(&series.candles, ATR_PERIOD);
        let ema_series = ema(&closes, EMA_PERIOD);
        let atr_ma_series = sma(&atr_series, ATR_MA_PERIOD);

        let last = |name: &str, v: &[f64]| {
            v.last().copied().ok_or_else(|| {
                DomainError::InvalidInput(format!(
                    "series for {} too short to compute {name} ({} bars)",
                    series.symbol,
                    series.len()
                ))
            })
        };

        Ok(Self {
            rsi_14: last("RSI_14", &rsi_series)?,
            atr_14: last("ATR_14", &atr_series)?,
            ema_20: last("EMA_20", &ema_series)?,
            atr_ma_20: last("ATR_MA_20", &atr_ma_series)?,
            recent_prices: series.recent_closes(RECENT_PRICES),
        })
    }
}
