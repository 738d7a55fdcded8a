//! Sqlite snapshot store. The full document is kept as a JSON payload
//! column; a few typed columns exist purely for filtering.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

use crate::domain::entities::snapshot::Snapshot;
use crate::domain::error::DomainError;
use crate::domain::ports::snapshot_repository::{DateFilter, SnapshotRepository};

pub struct SqliteSnapshotRepo {
    conn: Mutex<Connection>,
}

impl SqliteSnapshotRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_snapshot(row: &rusqlite::Row) -> Result<Snapshot, rusqlite::Error> {
        let payload: String = row.get(0)?;
        serde_json::from_str(&payload).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
    }
}

impl SnapshotRepository for SqliteSnapshotRepo {
    fn upsert(&self, snapshot: &Snapshot) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let payload = serde_json::to_string(snapshot)
            .map_err(|e| DomainError::Parse(e.to_string()))?;
        conn.execute(
            "INSERT INTO snapshots (date, symbol, price, rsi, sentiment, payload, taken_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(date) DO UPDATE SET
                symbol = excluded.symbol,
                price = excluded.price,
                rsi = excluded.rsi,
                sentiment = excluded.sentiment,
                payload = excluded.payload,
                taken_at = excluded.taken_at",
            params![
                snapshot.date.to_string(),
                snapshot.symbol,
                snapshot.fibo.current_price,
                snapshot.indicators.rsi_14,
                snapshot.sentiment,
                payload,
                snapshot.taken_at.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to store snapshot: {e}")))?;
        Ok(())
    }

    fn get(&self, date: NaiveDate) -> Result<Option<Snapshot>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.query_row(
            "SELECT payload FROM snapshots WHERE date = ?1",
            params![date.to_string()],
            Self::row_to_snapshot,
        )
        .optional()
        .map_err(|e| DomainError::Database(e.to_string()))
    }

    fn latest(&self) -> Result<Option<Snapshot>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.query_row(
            "SELECT payload FROM snapshots ORDER BY date DESC LIMIT 1",
            [],
            Self::row_to_snapshot,
        )
        .optional()
        .map_err(|e| DomainError::Database(e.to_string()))
    }

    fn list(&self, filter: &DateFilter) -> Result<Vec<Snapshot>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let mut sql = "SELECT payload FROM snapshots WHERE 1=1".to_string();
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(from) = &filter.from {
            sql.push_str(&format!(" AND date >= ?{}", param_values.len() + 1));
            param_values.push(Box::new(from.to_string()));
        }
        if let Some(to) = &filter.to {
            sql.push_str(&format!(" AND date <= ?{}", param_values.len() + 1));
            param_values.push(Box::new(to.to_string()));
        }
        sql.push_str(" ORDER BY date DESC");
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let params: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let rows = stmt
            .query_map(params.as_slice(), Self::row_to_snapshot)
            .map_err(|e| DomainError::Database(e.to_string()))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}
