use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::error::Result;
use crate::fingerprint::canonical_amount;
use crate::models::ParsedRow;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY,
    date TEXT NOT NULL,
    description TEXT NOT NULL,
    amount TEXT NOT NULL,
    currency TEXT NOT NULL DEFAULT 'USD',
    balance TEXT,
    hash_key TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
";

pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("bankfeed.db")
}

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Insert a parsed row, letting the `hash_key` unique index resolve
/// duplicates. Returns false when an identical row was already stored.
pub fn insert_transaction(
    conn: &Connection,
    row: &ParsedRow,
    created_at: DateTime<Utc>,
) -> Result<bool> {
    let changed = conn.execute(
        "INSERT INTO transactions (date, description, amount, currency, balance, hash_key, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(hash_key) DO NOTHING",
        rusqlite::params![
            row.date,
            row.description,
            canonical_amount(row.amount),
            row.currency,
            row.balance.map(canonical_amount),
            row.hash_key,
            created_at,
        ],
    )?;
    Ok(changed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&db_path(dir.path())).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    fn sample_row(hash_key: &str) -> ParsedRow {
        ParsedRow {
            date: "2024-01-15".to_string(),
            description: "COFFEE SHOP".to_string(),
            amount: "-4.50".parse().unwrap(),
            currency: "USD".to_string(),
            balance: None,
            hash_key: hash_key.to_string(),
        }
    }

    #[test]
    fn test_init_db_creates_schema() {
        let (_dir, conn) = test_db();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        assert!(tables.contains(&"transactions".to_string()));
        let has_date_index: bool = conn
            .prepare("SELECT 1 FROM sqlite_master WHERE type='index' AND name='idx_transactions_date'")
            .unwrap()
            .exists([])
            .unwrap();
        assert!(has_date_index);
    }

    #[test]
    fn test_init_db_is_idempotent() {
        let (_dir, conn) = test_db();
        init_db(&conn).unwrap();
    }

    #[test]
    fn test_insert_then_conflict_skips() {
        let (_dir, conn) = test_db();
        let row = sample_row("aaa111");
        assert!(insert_transaction(&conn, &row, Utc::now()).unwrap());
        assert!(!insert_transaction(&conn, &row, Utc::now()).unwrap());
        let count: i64 = conn
            .query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_insert_stores_canonical_amount_text() {
        let (_dir, conn) = test_db();
        let mut row = sample_row("bbb222");
        row.amount = "-4.50".parse().unwrap();
        insert_transaction(&conn, &row, Utc::now()).unwrap();
        let amount: String = conn
            .query_row("SELECT amount FROM transactions WHERE hash_key = 'bbb222'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(amount, "-4.5");
    }

    #[test]
    fn test_insert_null_balance() {
        let (_dir, conn) = test_db();
        insert_transaction(&conn, &sample_row("ccc333"), Utc::now()).unwrap();
        let balance: Option<String> = conn
            .query_row("SELECT balance FROM transactions WHERE hash_key = 'ccc333'", [], |r| r.get(0))
            .unwrap();
        assert!(balance.is_none());
    }
}
