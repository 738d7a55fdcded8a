//! Daily snapshot collection: fetch candles, compute indicators and
//! Fibonacci context, gather auxiliary signals, persist and fan out.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::FxConfig;
use crate::domain::entities::snapshot::{MacroQuote, Snapshot};
use crate::domain::error::DomainError;
use crate::domain::indicators::IndicatorSet;
use crate::domain::ports::market_data::MarketData;
use crate::domain::ports::notifier::Notifier;
use crate::domain::ports::publisher::ArchivePublisher;
use crate::domain::ports::signals::{SentimentSource, TrendsSource};
use crate::domain::ports::snapshot_repository::SnapshotRepository;
use crate::domain::values::fibonacci::FiboContext;

/// Calendar days of history behind the snapshot indicators (~3 years).
const HISTORY_DAYS: u32 = 1095;
/// Days fetched per macro reference quote.
const MACRO_QUOTE_DAYS: u32 = 10;

pub struct CollectUseCase {
    market: Arc<dyn MarketData>,
    sentiment: Arc<dyn SentimentSource>,
    trends: Arc<dyn TrendsSource>,
    snapshots: Arc<dyn SnapshotRepository>,
    notifier: Arc<dyn Notifier>,
    publisher: Arc<dyn ArchivePublisher>,
    config: FxConfig,
}

impl CollectUseCase {
    pub fn new(
        market: Arc<dyn MarketData>,
        sentiment: Arc<dyn SentimentSource>,
        trends: Arc<dyn TrendsSource>,
        snapshots: Arc<dyn SnapshotRepository>,
        notifier: Arc<dyn Notifier>,
        publisher: Arc<dyn ArchivePublisher>,
        config: FxConfig,
    ) -> Self {
        Self {
            market,
            sentiment,
            trends,
            snapshots,
            notifier,
            publisher,
            config,
        }
    }

    pub async fn execute(&self, symbol: &str) -> Result<Snapshot, DomainError> {
        match self.run(symbol).await {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => {
                error!(symbol, error = %e, "collection failed");
                if let Err(notify_err) = self
                    .notifier
                    .notify("fxpulse collector ERROR", &e.to_string())
                    .await
                {
                    warn!(error = %notify_err, "failure alert could not be sent");
                }
                Err(e)
            }
        }
    }

    async fn run(&self, symbol: &str) -> Result<Snapshot, DomainError> {
        info!(symbol, "collecting snapshot");
        let series = self.market.fetch_series(symbol, HISTORY_DAYS).await?;
        let last_candle = *series
            .last()
            .ok_or_else(|| DomainError::Feed(format!("no candles returned for {symbol}")))?;

        let indicators = IndicatorSet::from_series(&series)?;
        let fibo = FiboContext::from_series(&series)?;

        let sentiment = match self.sentiment.score(symbol).await {
            Ok(score) => score,
            Err(e) => {
                warn!(source = self.sentiment.name(), error = %e, "sentiment unavailable, defaulting to neutral");
                0.0
            }
        };

        let search_interest = match self.trends.interest(symbol).await {
            Ok(interest) => interest,
            Err(e) => {
                warn!(error = %e, "search-trend interest unavailable");
                None
            }
        };

        let macros = self.macro_quotes().await;

        let snapshot = Snapshot::new(
            symbol.to_string(),
            last_candle,
            indicators,
            fibo,
            sentiment,
            search_interest,
            macros,
        );

        self.snapshots.upsert(&snapshot)?;
        info!(date = %snapshot.date, "snapshot stored");

        // archive and notification are best-effort: the snapshot is
        // already stored, a dead endpoint must not fail the run
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| DomainError::Parse(e.to_string()))?;
        if let Err(e) = self
            .publisher
            .publish(&format!("snapshots/{}.json", snapshot.date), &json)
            .await
        {
            warn!(error = %e, "archive upload failed, continuing");
        }

        if let Err(e) = self
            .notifier
            .notify(
                &format!("fxpulse snapshot {}", snapshot.date),
                &snapshot.summary(),
            )
            .await
        {
            warn!(error = %e, "summary notification failed, continuing");
        }

        Ok(snapshot)
    }

    async fn macro_quotes(&self) -> Vec<MacroQuote> {
        let mut quotes = Vec::new();
        for asset in &self.config.macro_symbols {
            match self.market.fetch_series(&asset.symbol, MACRO_QUOTE_DAYS).await {
                Ok(series) => {
                    if let Some(candle) = series.last() {
                        quotes.push(MacroQuote {
                            symbol: asset.symbol.clone(),
                            relation: asset.relation.clone(),
                            price: candle.close,
                        });
                    }
                }
                Err(e) => {
                    warn!(symbol = %asset.symbol, error = %e, "macro quote fetch failed, skipping");
                }
            }
        }
        quotes
    }
}
