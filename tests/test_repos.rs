//! Sqlite repository behavior: date filters, ordering and round-trips
//! across crafted dates (the facade always writes "today", so these go
//! through the repos directly).

mod common;

use chrono::{NaiveDate, Utc};
use rusqlite::Connection;

use fxpulse::domain::entities::decision::DecisionRecord;
use fxpulse::domain::entities::snapshot::Snapshot;
use fxpulse::domain::indicators::IndicatorSet;
use fxpulse::domain::ports::decision_repository::DecisionRepository;
use fxpulse::domain::ports::snapshot_repository::{DateFilter, SnapshotRepository};
use fxpulse::domain::values::fibonacci::FiboContext;
use fxpulse::domain::values::signal::{Signal, Verdict};
use fxpulse::infrastructure::sqlite::decision_repo::SqliteDecisionRepo;
use fxpulse::infrastructure::sqlite::migrations::run_migrations;
use fxpulse::infrastructure::sqlite::snapshot_repo::SqliteSnapshotRepo;

fn snapshot_repo() -> SqliteSnapshotRepo {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    SqliteSnapshotRepo::new(conn)
}

fn decision_repo() -> SqliteDecisionRepo {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    SqliteDecisionRepo::new(conn)
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
}

fn make_snapshot(day: u32, price: f64) -> Snapshot {
    let closes: Vec<f64> = (0..300).map(|i| price - 0.3 + i as f64 * 0.001).collect();
    let series = common::series("EURUSD=X", &closes);
    let mut snapshot = Snapshot::new(
        "EURUSD=X".to_string(),
        *series.last().unwrap(),
        IndicatorSet::from_series(&series).unwrap(),
        FiboContext::from_series(&series).unwrap(),
        0.0,
        None,
        vec![],
    );
    snapshot.date = date(day);
    snapshot
}

fn make_decision(day: u32) -> DecisionRecord {
    let closes: Vec<f64> = (0..300).map(|i| 1.0 + i as f64 * 0.001).collect();
    let series = common::series("EURUSD=X", &closes);
    DecisionRecord {
        id: uuid::Uuid::new_v4().to_string(),
        date: date(day),
        symbol: "EURUSD=X".to_string(),
        signal: Signal::Hold,
        verdict: Verdict::Hold,
        confidence: 0.0,
        context: "Market in range. No signal.".to_string(),
        command: None,
        reasoner_reply: None,
        risk: None,
        fibo: FiboContext::from_series(&series).unwrap(),
        sample_values: series.recent_closes(5),
        opportunities: vec![],
        created_at: Utc::now(),
    }
}

#[test]
fn snapshot_round_trip_preserves_document() {
    let repo = snapshot_repo();
    let snapshot = make_snapshot(10, 1.10);
    repo.upsert(&snapshot).unwrap();

    let loaded = repo.get(date(10)).unwrap().unwrap();
    assert_eq!(loaded.id, snapshot.id);
    assert_eq!(loaded.fibo.nearest_level, snapshot.fibo.nearest_level);
    assert_eq!(loaded.indicators.recent_prices, snapshot.indicators.recent_prices);
    assert!(repo.get(date(11)).unwrap().is_none());
}

#[test]
fn snapshot_list_filters_and_orders_newest_first() {
    let repo = snapshot_repo();
    for day in [5, 10, 15, 20] {
        repo.upsert(&make_snapshot(day, 1.10)).unwrap();
    }

    let all = repo.list(&DateFilter::default()).unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[0].date, date(20));
    assert_eq!(all[3].date, date(5));

    let windowed = repo
        .list(&DateFilter {
            from: Some(date(8)),
            to: Some(date(16)),
            limit: None,
        })
        .unwrap();
    assert_eq!(windowed.len(), 2);
    assert_eq!(windowed[0].date, date(15));

    let limited = repo
        .list(&DateFilter {
            limit: Some(1),
            ..DateFilter::default()
        })
        .unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].date, date(20));
}

#[test]
fn snapshot_upsert_replaces_by_date() {
    let repo = snapshot_repo();
    repo.upsert(&make_snapshot(10, 1.10)).unwrap();
    let replacement = make_snapshot(10, 1.25);
    repo.upsert(&replacement).unwrap();

    let all = repo.list(&DateFilter::default()).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, replacement.id);
    assert!(repo.latest().unwrap().unwrap().fibo.current_price > 1.2);
}

#[test]
fn decision_round_trip_and_filtering() {
    let repo = decision_repo();
    for day in [1, 2, 3] {
        repo.upsert(&make_decision(day)).unwrap();
    }

    let loaded = repo.get(date(2)).unwrap().unwrap();
    assert_eq!(loaded.verdict, Verdict::Hold);
    assert_eq!(loaded.sample_values.len(), 5);

    let recent = repo
        .list(&DateFilter {
            from: Some(date(2)),
            to: None,
            limit: None,
        })
        .unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].date, date(3));
}

#[test]
fn decision_upsert_replaces_by_date() {
    let repo = decision_repo();
    repo.upsert(&make_decision(7)).unwrap();
    let mut replacement = make_decision(7);
    replacement.verdict = Verdict::HoldLowAtr;
    repo.upsert(&replacement).unwrap();

    let all = repo.list(&DateFilter::default()).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].verdict, Verdict::HoldLowAtr);
}
