use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

use crate::domain::entities::decision::DecisionRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::decision_repository::DecisionRepository;
use crate::domain::ports::snapshot_repository::DateFilter;

pub struct SqliteDecisionRepo {
    conn: Mutex<Connection>,
}

impl SqliteDecisionRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_record(row: &rusqlite::Row) -> Result<DecisionRecord, rusqlite::Error> {
        let payload: String = row.get(0)?;
        serde_json::from_str(&payload).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
    }
}

impl DecisionRepository for SqliteDecisionRepo {
    fn upsert(&self, record: &DecisionRecord) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let payload =
            serde_json::to_string(record).map_err(|e| DomainError::Parse(e.to_string()))?;
        conn.execute(
            "INSERT INTO decisions (date, symbol, signal, verdict, confidence, payload, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(date) DO UPDATE SET
                symbol = excluded.symbol,
                signal = excluded.signal,
                verdict = excluded.verdict,
                confidence = excluded.confidence,
                payload = excluded.payload,
                created_at = excluded.created_at",
            params![
                record.date.to_string(),
                record.symbol,
                record.signal.to_string(),
                record.verdict.to_string(),
                record.confidence,
                payload,
                record.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to store decision: {e}")))?;
        Ok(())
    }

    fn get(&self, date: NaiveDate) -> Result<Option<DecisionRecord>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.query_row(
            "SELECT payload FROM decisions WHERE date = ?1",
            params![date.to_string()],
            Self::row_to_record,
        )
        .optional()
        .map_err(|e| DomainError::Database(e.to_string()))
    }

    fn list(&self, filter: &DateFilter) -> Result<Vec<DecisionRecord>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let mut sql = "SELECT payload FROM decisions WHERE 1=1".to_string();
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
            .query_map(params.as_slice(), Self::row_to_record)
            .map_err(|e| DomainError::Database(e.to_string()))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}
