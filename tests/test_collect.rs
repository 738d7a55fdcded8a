//! Snapshot collection: persistence, auxiliary signals and failure paths.

mod common;

use std::sync::Arc;

use common::{
    providers, rising_closes, series, setup, FailingNotifier, FailingPublisher, FakeMarketData,
    FixedSentiment,
};
use fxpulse::config::{FxConfig, RelatedAsset};
use fxpulse::domain::ports::snapshot_repository::DateFilter;
use fxpulse::domain::values::fibonacci::MarketPhase;

const SYMBOL: &str = "EURUSD=X";

#[tokio::test]
async fn collect_stores_a_full_snapshot() {
    let market = FakeMarketData::new().with(series(SYMBOL, &rising_closes(300)));
    let mut p = providers(Arc::new(market));
    p.sentiment = Arc::new(FixedSentiment(0.4));
    let fx = setup(p);

    let snapshot = fx.collect(SYMBOL).await.unwrap();
    assert_eq!(snapshot.symbol, SYMBOL);
    assert_eq!(snapshot.sentiment, 0.4);
    assert_eq!(snapshot.search_interest, None);
    assert_eq!(snapshot.fibo.phase, MarketPhase::Ceiling);
    assert_eq!(snapshot.indicators.recent_prices.len(), 5);
    assert!(snapshot.indicators.rsi_14 > 70.0);

    let stored = fx.latest_snapshot().unwrap().expect("snapshot persisted");
    assert_eq!(stored.id, snapshot.id);
    assert_eq!(stored.fibo.current_price, snapshot.fibo.current_price);
}

#[tokio::test]
async fn recollect_replaces_same_day_row() {
    let market = FakeMarketData::new().with(series(SYMBOL, &rising_closes(300)));
    let fx = setup(providers(Arc::new(market)));

    fx.collect(SYMBOL).await.unwrap();
    let second = fx.collect(SYMBOL).await.unwrap();

    let all = fx.snapshots(&DateFilter::default()).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, second.id);
}

#[tokio::test]
async fn collect_captures_macro_quotes_and_skips_failures() {
    let market = FakeMarketData::new()
        .with(series(SYMBOL, &rising_closes(300)))
        .with(series("DX-Y.NYB", &[104.0, 104.5, 105.0]));
    let mut p = providers(Arc::new(market));
    p.config = FxConfig {
        macro_symbols: vec![
            RelatedAsset {
                symbol: "DX-Y.NYB".into(),
                relation: "dollar index".into(),
            },
            RelatedAsset {
                symbol: "^MISSING".into(),
                relation: "no fixture".into(),
            },
        ],
        ..FxConfig::default()
    };
    let fx = setup(p);

    let snapshot = fx.collect(SYMBOL).await.unwrap();
    assert_eq!(snapshot.macros.len(), 1);
    assert_eq!(snapshot.macros[0].symbol, "DX-Y.NYB");
    assert_eq!(snapshot.macros[0].price, 105.0);
}

#[tokio::test]
async fn notifier_outage_does_not_fail_collection() {
    let market = FakeMarketData::new().with(series(SYMBOL, &rising_closes(300)));
    let mut p = providers(Arc::new(market));
    p.notifier = Arc::new(FailingNotifier);
    let fx = setup(p);

    let snapshot = fx.collect(SYMBOL).await.unwrap();
    let stored = fx.latest_snapshot().unwrap().unwrap();
    assert_eq!(stored.id, snapshot.id);
}

#[tokio::test]
async fn publisher_outage_does_not_fail_collection() {
    let market = FakeMarketData::new().with(series(SYMBOL, &rising_closes(300)));
    let mut p = providers(Arc::new(market));
    p.publisher = Arc::new(FailingPublisher);
    p.notifier = Arc::new(FailingNotifier);
    let fx = setup(p);

    assert!(fx.collect(SYMBOL).await.is_ok());
    assert!(fx.latest_snapshot().unwrap().is_some());
}

#[tokio::test]
async fn collect_fails_cleanly_when_feed_is_down() {
    let fx = setup(providers(Arc::new(FakeMarketData::new())));
    let err = fx.collect(SYMBOL).await.unwrap_err();
    assert!(err.to_string().contains("no fixture"));
    assert!(fx.latest_snapshot().unwrap().is_none());
}

#[tokio::test]
async fn collect_rejects_short_history() {
    let market = FakeMarketData::new().with(series(SYMBOL, &rising_closes(10)));
    let fx = setup(providers(Arc::new(market)));
    assert!(fx.collect(SYMBOL).await.is_err());
}
