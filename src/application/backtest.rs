//! Backtest: replay the decision core over stored history, bar by bar.
//!
//! Historical sentiment is unavailable, so every bar runs with a neutral
//! score; only the RSI leg of the rule cascade can fire.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::application::core::{DecisionCore, FactorInput};
use crate::domain::error::DomainError;
use crate::domain::indicators::{atr, rsi, sma, ATR_MA_PERIOD, ATR_PERIOD, RECENT_PRICES, RSI_PERIOD};
use crate::domain::ports::market_data::MarketData;
use crate::domain::values::fibonacci::FiboContext;
use crate::domain::values::signal::{Signal, Verdict};

/// Bars skipped before decisions start, so every indicator has history.
const WARMUP_BARS: usize = 60;

#[derive(Debug, Clone, Serialize)]
pub struct DayDecision {
    pub date: NaiveDate,
    pub price: f64,
    pub rsi: f64,
    pub signal: Signal,
    pub verdict: Verdict,
    pub confidence: f64,
}

#[derive(Debug, Serialize)]
pub struct BacktestReport {
    pub symbol: String,
    pub bars: usize,
    pub decided: usize,
    /// Decisions per verdict label.
    pub counts: BTreeMap<String, usize>,
    pub decisions: Vec<DayDecision>,
}

pub struct BacktestUseCase {
    market: Arc<dyn MarketData>,
    core: DecisionCore,
}

impl BacktestUseCase {
    pub fn new(market: Arc<dyn MarketData>, core: DecisionCore) -> Self {
        Self { market, core }
    }

    pub async fn execute(&self, symbol: &str, days: u32) -> Result<BacktestReport, DomainError> {
        let series = self.market.fetch_series(symbol, days).await?;
        if series.len() <= WARMUP_BARS {
            return Err(DomainError::InvalidInput(format!(
                "backtest needs more than {WARMUP_BARS} bars, got {}",
                series.len()
            )));
        }

        let closes = series.closes();
        let rsi_series = rsi(&closes, RSI_PERIOD);
        let atr_series = atr(&series.candles, ATR_PERIOD);
        let atr_ma_series = sma(&atr_series, ATR_MA_PERIOD);

        let mut decisions = Vec::new();
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();

        for i in WARMUP_BARS..series.len() {
            // indicator vectors are shorter than the close series; align
            // them back onto bar indices
            let rsi_now = rsi_series[i - RSI_PERIOD];
            let atr_now = atr_series[i - ATR_PERIOD];
            let atr_ma = atr_ma_series[i - ATR_PERIOD - (ATR_MA_PERIOD - 1)];

            let window = series.up_to(i + 1);
            let fibo = FiboContext::from_series(&window)?;

            let input = FactorInput {
                rsi: rsi_now,
                sentiment: 0.0,
                recent_prices: window.recent_closes(RECENT_PRICES),
                nearest_support: fibo.nearest_support,
                price: closes[i],
                atr: atr_now,
                atr_ma,
            };
            let outcome = self.core.decide(&input).await;

            *counts.entry(outcome.verdict.to_string()).or_insert(0) += 1;
            decisions.push(DayDecision {
                date: series.candles[i].timestamp.date_naive(),
                price: closes[i],
                rsi: rsi_now,
                signal: outcome.signal,
                verdict: outcome.verdict,
                confidence: outcome.confidence,
            });
        }

        info!(symbol, decided = decisions.len(), "backtest complete");
        Ok(BacktestReport {
            symbol: symbol.to_string(),
            bars: series.len(),
            decided: decisions.len(),
            counts,
            decisions,
        })
    }
}
