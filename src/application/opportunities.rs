//! Related-asset momentum scan.
//!
//! Walks the configured related assets and flags any whose RSI has pushed
//! past the momentum thresholds. Per-asset fetch failures are logged and
//! skipped so one bad ticker never kills the scan.

use std::sync::Arc;

use tracing::warn;

use crate::config::FxConfig;
use crate::domain::error::DomainError;
use crate::domain::indicators::{rsi, RSI_PERIOD};
use crate::domain::ports::market_data::MarketData;
use crate::domain::values::opportunity::{Momentum, RelatedOpportunity};

#[derive(Clone)]
pub struct OpportunityScanUseCase {
    market: Arc<dyn MarketData>,
    config: FxConfig,
}

impl OpportunityScanUseCase {
    pub fn new(market: Arc<dyn MarketData>, config: FxConfig) -> Self {
        Self { market, config }
    }

    pub async fn execute(&self) -> Result<Vec<RelatedOpportunity>, DomainError> {
        let params = &self.config.indicators;
        let mut opportunities = Vec::new();

        for asset in &self.config.related_assets {
            let series = match self
                .market
                .fetch_series(&asset.symbol, params.lookback_period_days)
                .await
            {
                Ok(series) => series,
                Err(e) => {
                    warn!(symbol = %asset.symbol, error = %e, "related asset fetch failed, skipping");
                    continue;
                }
            };

            let rsi_series = rsi(&series.closes(), RSI_PERIOD);
            let Some(&rsi_value) = rsi_series.last() else {
                warn!(symbol = %asset.symbol, bars = series.len(), "not enough history for RSI, skipping");
                continue;
            };

            let momentum = if rsi_value >= params.momentum_threshold_high {
                Momentum::Bullish
            } else if rsi_value <= params.momentum_threshold_low {
                Momentum::Bearish
            } else {
                continue;
            };

            opportunities.push(RelatedOpportunity {
                symbol: asset.symbol.clone(),
                relation: asset.relation.clone(),
                rsi: (rsi_value * 100.0).round() / 100.0,
                momentum,
            });
        }

        Ok(opportunities)
    }
}
