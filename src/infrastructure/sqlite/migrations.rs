use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS snapshots (
            date TEXT PRIMARY KEY,
            symbol TEXT NOT NULL,
            price REAL NOT NULL,
            rsi REAL NOT NULL,
            sentiment REAL NOT NULL,
            payload TEXT NOT NULL,
            taken_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS decisions (
            date TEXT PRIMARY KEY,
            symbol TEXT NOT NULL,
            signal TEXT NOT NULL,
            verdict TEXT NOT NULL,
            confidence REAL NOT NULL,
            payload TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_snapshots_symbol ON snapshots(symbol);
        CREATE INDEX IF NOT EXISTS idx_decisions_symbol ON decisions(symbol);
        CREATE INDEX IF NOT EXISTS idx_decisions_verdict ON decisions(verdict);
        ",
    )
    .map_err(|e| format!("Migration failed: {e}"))
}
