//! Daily decision: build the factor picture, run the decision core and
//! record the call.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::application::core::{DecisionCore, FactorInput};
use crate::application::opportunities::OpportunityScanUseCase;
use crate::domain::entities::decision::DecisionRecord;
use crate::domain::error::DomainError;
use crate::domain::indicators::IndicatorSet;
use crate::domain::ports::decision_repository::DecisionRepository;
use crate::domain::ports::market_data::MarketData;
use crate::domain::ports::notifier::Notifier;
use crate::domain::ports::publisher::ArchivePublisher;
use crate::domain::ports::signals::SentimentSource;
use crate::domain::values::fibonacci::FiboContext;

/// Calendar days of history behind the decision (~1 year).
const HISTORY_DAYS: u32 = 365;

pub struct DecideUseCase {
    market: Arc<dyn MarketData>,
    sentiment: Arc<dyn SentimentSource>,
    core: DecisionCore,
    scanner: OpportunityScanUseCase,
    decisions: Arc<dyn DecisionRepository>,
    notifier: Arc<dyn Notifier>,
    publisher: Arc<dyn ArchivePublisher>,
}

impl DecideUseCase {
    pub fn new(
        market: Arc<dyn MarketData>,
        sentiment: Arc<dyn SentimentSource>,
        core: DecisionCore,
        scanner: OpportunityScanUseCase,
        decisions: Arc<dyn DecisionRepository>,
        notifier: Arc<dyn Notifier>,
        publisher: Arc<dyn ArchivePublisher>,
    ) -> Self {
        Self {
            market,
            sentiment,
            core,
            scanner,
            decisions,
            notifier,
            publisher,
        }
    }

    pub async fn execute(&self, symbol: &str) -> Result<DecisionRecord, DomainError> {
        match self.run(symbol).await {
            Ok(record) => Ok(record),
            Err(e) => {
                error!(symbol, error = %e, "decision run failed");
                if let Err(notify_err) = self
                    .notifier
                    .notify("fxpulse decision ERROR", &e.to_string())
                    .await
                {
                    warn!(error = %notify_err, "failure alert could not be sent");
                }
                Err(e)
            }
        }
    }

    async fn run(&self, symbol: &str) -> Result<DecisionRecord, DomainError> {
        info!(symbol, "running daily decision");
        let series = self.market.fetch_series(symbol, HISTORY_DAYS).await?;
        let indicators = IndicatorSet::from_series(&series)?;
        let fibo = FiboContext::from_series(&series)?;

        let sentiment = match self.sentiment.score(symbol).await {
            Ok(score) => score,
            Err(e) => {
                warn!(error = %e, "sentiment unavailable, defaulting to neutral");
                0.0
            }
        };

        let input = FactorInput {
            rsi: indicators.rsi_14,
            sentiment,
            recent_prices: indicators.recent_prices.clone(),
            nearest_support: fibo.nearest_support,
            price: fibo.current_price,
            atr: indicators.atr_14,
            atr_ma: indicators.atr_ma_20,
        };
        let outcome = self.core.decide(&input).await;
        info!(verdict = %outcome.verdict, confidence = outcome.confidence, "core decided");

        let opportunities = match self.scanner.execute().await {
            Ok(opps) => opps,
            Err(e) => {
                warn!(error = %e, "opportunity scan failed");
                Vec::new()
            }
        };

        let record = DecisionRecord {
            id: uuid::Uuid::new_v4().to_string(),
            date: Utc::now().date_naive(),
            symbol: symbol.to_string(),
            signal: outcome.signal,
            verdict: outcome.verdict,
            confidence: outcome.confidence,
            context: outcome.context,
            command: outcome.command,
            reasoner_reply: outcome.reply,
            risk: outcome.risk,
            fibo,
            sample_values: indicators.recent_prices,
            opportunities,
            created_at: Utc::now(),
        };

        self.decisions.upsert(&record)?;

        // archive and notification are best-effort: the record is already
        // stored, a dead endpoint must not fail the run
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| DomainError::Parse(e.to_string()))?;
        if let Err(e) = self
            .publisher
            .publish(&format!("decisions/{}.json", record.date), &json)
            .await
        {
            warn!(error = %e, "archive upload failed, continuing");
        }

        if let Err(e) = self
            .notifier
            .notify(&format!("fxpulse decision {}", record.date), &record.summary())
            .await
        {
            warn!(error = %e, "summary notification failed, continuing");
        }

        Ok(record)
    }
}
