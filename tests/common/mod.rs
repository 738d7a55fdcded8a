//! Shared test helpers: synthetic candle series, fake ports and a fully
//! wired in-memory facade.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};

use fxpulse::application::core::DEFAULT_CONFIDENCE_THRESHOLD;
use fxpulse::config::FxConfig;
use fxpulse::domain::entities::candle::{Candle, CandleSeries};
use fxpulse::domain::error::DomainError;
use fxpulse::domain::ports::market_data::MarketData;
use fxpulse::domain::ports::notifier::Notifier;
use fxpulse::domain::ports::publisher::ArchivePublisher;
use fxpulse::domain::ports::reasoner::{Prediction, Reasoner};
use fxpulse::domain::ports::signals::SentimentSource;
use fxpulse::domain::values::confidence::Confidence;
use fxpulse::domain::values::signal::Signal;
use fxpulse::infrastructure::notify::ntfy::NtfyNotifier;
use fxpulse::infrastructure::publish::github::GithubPublisher;
use fxpulse::infrastructure::reasoner::rule::RuleReasoner;
use fxpulse::infrastructure::signals::noop::NoopSignals;
use fxpulse::{FxPulse, Providers};

/// Candles with a configurable bar range so ATR can be shaped per test.
pub fn candles_with_ranges(closes: &[f64], ranges: &[f64]) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let half = ranges.get(i).copied().unwrap_or(0.005) / 2.0;
            Candle {
                timestamp: start + Duration::days(i as i64),
                open: close,
                high: close + half,
                low: close - half,
                close,
                volume: Some(1000.0),
            }
        })
        .collect()
}

pub fn series(symbol: &str, closes: &[f64]) -> CandleSeries {
    let ranges = vec![0.01; closes.len()];
    CandleSeries::new(symbol, candles_with_ranges(closes, &ranges))
}

/// Steady decline, drives RSI toward zero.
pub fn declining_closes(n: usize) -> Vec<f64> {
    (0..n).map(|i| 1.30 - i as f64 * 0.001).collect()
}

/// Steady climb, drives RSI toward 100.
pub fn rising_closes(n: usize) -> Vec<f64> {
    (0..n).map(|i| 1.00 + i as f64 * 0.001).collect()
}

/// Oscillating closes, keeps RSI mid-range.
pub fn choppy_closes(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 1.10 + if i % 2 == 0 { 0.002 } else { -0.002 })
        .collect()
}

/// A declining series whose last bars widen, so ATR_14 rises above its
/// 20-bar average and the volatility gate passes.
pub fn declining_expanding_series(symbol: &str, n: usize) -> CandleSeries {
    let closes = declining_closes(n);
    let mut ranges = vec![0.01; n];
    for r in ranges.iter_mut().skip(n.saturating_sub(5)) {
        *r = 0.06;
    }
    CandleSeries::new(symbol, candles_with_ranges(&closes, &ranges))
}

/// A declining series whose last bars narrow, so ATR_14 falls clearly below
/// its 20-bar average and the volatility gate blocks.
pub fn declining_contracting_series(symbol: &str, n: usize) -> CandleSeries {
    let closes = declining_closes(n);
    let mut ranges = vec![0.01; n];
    for r in ranges.iter_mut().skip(n.saturating_sub(5)) {
        *r = 0.002;
    }
    CandleSeries::new(symbol, candles_with_ranges(&closes, &ranges))
}

pub struct FakeMarketData {
    series: HashMap<String, CandleSeries>,
}

impl FakeMarketData {
    pub fn new() -> Self {
        Self {
            series: HashMap::new(),
        }
    }

    pub fn with(mut self, series: CandleSeries) -> Self {
        self.series.insert(series.symbol.clone(), series);
        self
    }
}

#[async_trait]
impl MarketData for FakeMarketData {
    async fn fetch_series(&self, symbol: &str, _days: u32) -> Result<CandleSeries, DomainError> {
        self.series
            .get(symbol)
            .cloned()
            .ok_or_else(|| DomainError::Feed(format!("no fixture for {symbol}")))
    }
}

/// Reasoner with canned outputs. `reply: None` simulates an outage.
pub struct ScriptedReasoner {
    pub reply: Option<String>,
    pub prediction: Prediction,
}

impl ScriptedReasoner {
    pub fn confident(reply: &str, signal: Signal, confidence: f64) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prediction: Prediction {
                signal,
                confidence: Confidence::clamped(confidence),
                meta: serde_json::json!({}),
            },
        }
    }
}

#[async_trait]
impl Reasoner for ScriptedReasoner {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn reason(&self, _command: &str) -> Result<String, DomainError> {
        self.reply
            .clone()
            .ok_or_else(|| DomainError::Reasoner("scripted outage".into()))
    }

    async fn predict(
        &self,
        _features: &std::collections::BTreeMap<String, f64>,
    ) -> Result<Prediction, DomainError> {
        Ok(self.prediction.clone())
    }
}

/// Sentiment pinned to a fixed score.
pub struct FixedSentiment(pub f64);

#[async_trait]
impl SentimentSource for FixedSentiment {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn score(&self, _symbol: &str) -> Result<f64, DomainError> {
        Ok(self.0)
    }
}

/// Notifier simulating an unreachable ntfy endpoint.
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify(&self, _title: &str, _message: &str) -> Result<(), DomainError> {
        Err(DomainError::Feed("ntfy returned 500".into()))
    }
}

/// Publisher simulating a rejected archive upload.
pub struct FailingPublisher;

#[async_trait]
impl ArchivePublisher for FailingPublisher {
    async fn publish(&self, _path: &str, _content: &str) -> Result<(), DomainError> {
        Err(DomainError::Feed("GitHub upload returned 502".into()))
    }
}

/// Providers wired with quiet defaults: rule reasoner, neutral signals,
/// disabled notifier/publisher, empty config.
pub fn providers(market: Arc<dyn MarketData>) -> Providers {
    Providers {
        market,
        reasoner: Arc::new(RuleReasoner),
        sentiment: Arc::new(NoopSignals),
        trends: Arc::new(NoopSignals),
        notifier: Arc::new(NtfyNotifier::disabled()),
        publisher: Arc::new(GithubPublisher::disabled()),
        config: FxConfig::default(),
        confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
    }
}

pub fn setup(p: Providers) -> FxPulse {
    FxPulse::with_providers(":memory:", p).unwrap()
}
