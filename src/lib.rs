pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;

use crate::application::backtest::{BacktestReport, BacktestUseCase};
use crate::application::collect::CollectUseCase;
use crate::application::core::{DecisionCore, DEFAULT_CONFIDENCE_THRESHOLD};
use crate::application::decide::DecideUseCase;
use crate::application::opportunities::OpportunityScanUseCase;
use crate::application::query::QueryUseCase;
use crate::config::FxConfig;
use crate::domain::entities::decision::DecisionRecord;
use crate::domain::entities::snapshot::Snapshot;
use crate::domain::error::DomainError;
use crate::domain::ports::decision_repository::DecisionRepository;
use crate::domain::ports::market_data::MarketData;
use crate::domain::ports::notifier::Notifier;
use crate::domain::ports::publisher::ArchivePublisher;
use crate::domain::ports::reasoner::Reasoner;
use crate::domain::ports::signals::{SentimentSource, TrendsSource};
use crate::domain::ports::snapshot_repository::{DateFilter, SnapshotRepository};
use crate::domain::values::opportunity::RelatedOpportunity;
use crate::infrastructure::feeds::yahoo::YahooMarketData;
use crate::infrastructure::notify::ntfy::NtfyNotifier;
use crate::infrastructure::publish::github::{GithubCredentials, GithubPublisher};
use crate::infrastructure::reasoner::http::HttpReasoner;
use crate::infrastructure::reasoner::rule::RuleReasoner;
use crate::infrastructure::signals::noop::NoopSignals;
use crate::infrastructure::signals::serpapi::SerpApiSignals;
use crate::infrastructure::sqlite::decision_repo::SqliteDecisionRepo;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::snapshot_repo::SqliteSnapshotRepo;

/// Everything the facade needs besides the database.
pub struct Providers {
    pub market: Arc<dyn MarketData>,
    pub reasoner: Arc<dyn Reasoner>,
    pub sentiment: Arc<dyn SentimentSource>,
    pub trends: Arc<dyn TrendsSource>,
    pub notifier: Arc<dyn Notifier>,
    pub publisher: Arc<dyn ArchivePublisher>,
    pub config: FxConfig,
    pub confidence_threshold: f64,
}

impl Providers {
    /// Build providers from the environment, falling back to the built-in
    /// rule reasoner and neutral signal sources when nothing is configured.
    pub fn from_env() -> Self {
        let reasoner: Arc<dyn Reasoner> = match (
            std::env::var("FXPULSE_REASONER").as_deref(),
            std::env::var("FXPULSE_REASONER_URL"),
        ) {
            (Ok("http"), Ok(url)) => Arc::new(HttpReasoner::new(url)),
            _ => Arc::new(RuleReasoner),
        };

        let (sentiment, trends): (Arc<dyn SentimentSource>, Arc<dyn TrendsSource>) =
            match std::env::var("SERPAPI_KEY") {
                Ok(key) if !key.is_empty() => (
                    Arc::new(SerpApiSignals::new(key.clone())),
                    Arc::new(SerpApiSignals::new(key)),
                ),
                _ => (Arc::new(NoopSignals), Arc::new(NoopSignals)),
            };

        let notifier = Arc::new(NtfyNotifier::new(std::env::var("NTFY_TOPIC").ok()));

        let credentials = match (
            std::env::var("GITHUB_USER"),
            std::env::var("GITHUB_TOKEN"),
            std::env::var("DATA_REPO"),
        ) {
            (Ok(user), Ok(token), Ok(repo)) => Some(GithubCredentials { user, token, repo }),
            _ => None,
        };
        let publisher = Arc::new(GithubPublisher::new(credentials));

        let config_path =
            std::env::var("FXPULSE_CONFIG").unwrap_or_else(|_| "fx_config.json".into());
        let config = FxConfig::load(Path::new(&config_path));

        let confidence_threshold = std::env::var("FXPULSE_CONF_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD);

        Self {
            market: Arc::new(YahooMarketData::new()),
            reasoner,
            sentiment,
            trends,
            notifier,
            publisher,
            config,
            confidence_threshold,
        }
    }
}

pub struct FxPulse {
    collect_uc: CollectUseCase,
    decide_uc: DecideUseCase,
    scan_uc: OpportunityScanUseCase,
    backtest_uc: BacktestUseCase,
    query_uc: QueryUseCase,
}

impl FxPulse {
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        Self::with_providers(db_path, Providers::from_env())
    }

    pub fn with_providers(db_path: &str, providers: Providers) -> Result<Self, DomainError> {
        let open = || -> Result<Connection, DomainError> {
            let conn = Connection::open(db_path)
                .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
            conn.pragma_update(None, "journal_mode", "WAL")
                .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
            Ok(conn)
        };
        let conn1 = open()?;
        let conn2 = open()?;
        // each :memory: connection is its own database, so migrate both
        run_migrations(&conn1)?;
        run_migrations(&conn2)?;

        let snapshots: Arc<dyn SnapshotRepository> = Arc::new(SqliteSnapshotRepo::new(conn1));
        let decisions: Arc<dyn DecisionRepository> = Arc::new(SqliteDecisionRepo::new(conn2));

        let core = DecisionCore::new(providers.reasoner.clone(), providers.confidence_threshold);
        let scan_uc =
            OpportunityScanUseCase::new(providers.market.clone(), providers.config.clone());

        Ok(Self {
            collect_uc: CollectUseCase::new(
                providers.market.clone(),
                providers.sentiment.clone(),
                providers.trends,
                snapshots.clone(),
                providers.notifier.clone(),
                providers.publisher.clone(),
                providers.config,
            ),
            decide_uc: DecideUseCase::new(
                providers.market.clone(),
                providers.sentiment,
                core.clone(),
                scan_uc.clone(),
                decisions.clone(),
                providers.notifier,
                providers.publisher,
            ),
            scan_uc,
            backtest_uc: BacktestUseCase::new(providers.market, core),
            query_uc: QueryUseCase::new(snapshots, decisions),
        })
    }

    pub async fn collect(&self, symbol: &str) -> Result<Snapshot, DomainError> {
        self.collect_uc.execute(symbol).await
    }

    pub async fn decide(&self, symbol: &str) -> Result<DecisionRecord, DomainError> {
        self.decide_uc.execute(symbol).await
    }

    /// Collector then decision, the daily pipeline.
    pub async fn run(&self, symbol: &str) -> Result<(Snapshot, DecisionRecord), DomainError> {
        let snapshot = self.collect(symbol).await?;
        let decision = self.decide(symbol).await?;
        Ok((snapshot, decision))
    }

    pub async fn opportunities(&self) -> Result<Vec<RelatedOpportunity>, DomainError> {
        self.scan_uc.execute().await
    }

    pub async fn backtest(&self, symbol: &str, days: u32) -> Result<BacktestReport, DomainError> {
        self.backtest_uc.execute(symbol, days).await
    }

    pub fn snapshots(&self, filter: &DateFilter) -> Result<Vec<Snapshot>, DomainError> {
        self.query_uc.snapshots(filter)
    }

    pub fn latest_snapshot(&self) -> Result<Option<Snapshot>, DomainError> {
        self.query_uc.latest_snapshot()
    }

    pub fn decisions(&self, filter: &DateFilter) -> Result<Vec<DecisionRecord>, DomainError> {
        self.query_uc.decisions(filter)
    }
}
