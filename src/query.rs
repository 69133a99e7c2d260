use chrono::{Duration, Utc};
use rusqlite::types::ToSql;

use crate::context::AppContext;
use crate::error::{ApiError, Result};
use crate::models::{Transaction, TransactionPage};

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 200;
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Listing parameters. Dates are `YYYY-MM-DD` strings compared
/// lexicographically against the stored dates, which is the same as
/// comparing chronologically.
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

fn default_from_date() -> String {
    (Utc::now().date_naive() - Duration::days(DEFAULT_WINDOW_DAYS))
        .format("%Y-%m-%d")
        .to_string()
}

fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
    let amount_text: String = row.get(3)?;
    let amount = amount_text.parse().map_err(|e: rust_decimal::Error| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let balance_text: Option<String> = row.get(5)?;
    let balance = match balance_text {
        Some(text) => Some(text.parse().map_err(|e: rust_decimal::Error| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?),
        None => None,
    };
    Ok(Transaction {
        id: row.get(0)?,
        date: row.get(1)?,
        description: row.get(2)?,
        amount,
        currency: row.get(4)?,
        balance,
        hash_key: row.get(6)?,
        created_at: row.get(7)?,
    })
}

/// List stored transactions, newest first.
///
/// With no explicit bounds, only the last 30 days are shown, measured
/// from the UTC calendar date at call time. Giving either bound turns
/// the default window off. Both bounds are inclusive. `total` counts
/// everything the filter matches, ignoring pagination.
pub fn list_transactions(ctx: &AppContext, query: &TransactionQuery) -> Result<TransactionPage> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if page < 1 {
        return Err(ApiError::unprocessable(format!("page must be >= 1, got {page}")));
    }
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(ApiError::unprocessable(format!(
            "limit must be between 1 and {MAX_LIMIT}, got {limit}"
        )));
    }

    let default_from = if query.from.is_none() && query.to.is_none() {
        Some(default_from_date())
    } else {
        None
    };

    let mut conditions: Vec<String> = Vec::new();
    let mut params: Vec<&dyn ToSql> = Vec::new();
    if let Some(from) = query.from.as_ref().or(default_from.as_ref()) {
        params.push(from);
        conditions.push(format!("date >= ?{}", params.len()));
    }
    if let Some(to) = &query.to {
        params.push(to);
        conditions.push(format!("date <= ?{}", params.len()));
    }
    let clause = format!("WHERE {}", conditions.join(" AND "));

    let total: i64 = ctx.conn.query_row(
        &format!("SELECT count(*) FROM transactions {clause}"),
        params.as_slice(),
        |r| r.get(0),
    )?;

    // Saturates instead of overflowing; a page past the end is empty.
    let offset = (page - 1).saturating_mul(limit);
    let sql = format!(
        "SELECT id, date, description, amount, currency, balance, hash_key, created_at
         FROM transactions {clause}
         ORDER BY date DESC, id DESC
         LIMIT {limit} OFFSET {offset}"
    );
    let mut stmt = ctx.conn.prepare(&sql)?;
    let data = stmt
        .query_map(params.as_slice(), row_to_transaction)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(TransactionPage {
        data,
        page,
        limit,
        total,
    })
}
