use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use crate::context::AppContext;
use crate::dates::normalize_date;
use crate::db::insert_transaction;
use crate::error::{ApiError, Result};
use crate::fingerprint::hash_key;
use crate::models::{ParsedRow, UploadSummary};

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const REQUIRED_COLUMNS: &[&str] = &["date", "description", "amount"];

// ---------------------------------------------------------------------------
// Header validation
// ---------------------------------------------------------------------------

/// Check a header row for the required columns. Names are exact and
/// case-sensitive; every missing column is reported in one message.
pub fn validate_columns(headers: &csv::StringRecord) -> Result<()> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .copied()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::unprocessable(format!(
            "Missing required columns: {}",
            missing.join(", ")
        )))
    }
}

struct Columns {
    date: usize,
    description: usize,
    amount: usize,
    currency: Option<usize>,
    balance: Option<usize>,
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn resolve_columns(headers: &csv::StringRecord) -> Result<Columns> {
    validate_columns(headers)?;
    match (
        column_index(headers, "date"),
        column_index(headers, "description"),
        column_index(headers, "amount"),
    ) {
        (Some(date), Some(description), Some(amount)) => Ok(Columns {
            date,
            description,
            amount,
            currency: column_index(headers, "currency"),
            balance: column_index(headers, "balance"),
        }),
        _ => Err(ApiError::Internal(
            "column lookup failed after validation".to_string(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// Parse one data record into a row ready for insert. Field positions come
/// from the header, so column order in the file does not matter. Returns the
/// failure reason without the row number; the caller prefixes it.
fn parse_row(record: &csv::StringRecord, cols: &Columns) -> std::result::Result<ParsedRow, String> {
    let date_raw = record.get(cols.date).unwrap_or("").trim();
    let date = normalize_date(date_raw).map_err(|e| e.to_string())?;

    let description = record.get(cols.description).unwrap_or("").trim().to_string();

    let amount_raw = record.get(cols.amount).unwrap_or("").trim();
    if amount_raw.is_empty() {
        return Err("Missing amount".to_string());
    }
    let amount: Decimal = amount_raw
        .parse()
        .map_err(|_| format!("Invalid amount: {amount_raw}"))?;

    let currency = match cols.currency.and_then(|i| record.get(i)) {
        Some(c) if !c.trim().is_empty() => c.trim().to_string(),
        _ => "USD".to_string(),
    };

    let balance = match cols.balance.and_then(|i| record.get(i)) {
        Some(b) if !b.trim().is_empty() => {
            let trimmed = b.trim();
            Some(
                trimmed
                    .parse::<Decimal>()
                    .map_err(|_| format!("Invalid balance: {trimmed}"))?,
            )
        }
        _ => None,
    };

    let hash_key = hash_key(&date, &description, amount, &currency);
    Ok(ParsedRow {
        date,
        description,
        amount,
        currency,
        balance,
        hash_key,
    })
}

// ---------------------------------------------------------------------------
// ingest
// ---------------------------------------------------------------------------

/// Run an uploaded CSV through normalize/dedup/insert.
///
/// Every row is attempted; row failures are collected rather than aborting
/// the file. If any row failed, the call errors with the full list while
/// rows that did insert stay inserted. Re-uploading is safe: the dedup
/// fingerprint turns already-stored rows into skips.
pub fn ingest(ctx: &AppContext, bytes: &[u8], content_type: &str) -> Result<UploadSummary> {
    if !content_type.to_lowercase().contains("csv") {
        return Err(ApiError::UnsupportedMediaType(content_type.to_string()));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::PayloadTooLarge(bytes.len()));
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let headers = rdr.headers()?.clone();
    let cols = resolve_columns(&headers)?;

    let mut imported = 0usize;
    let mut skipped = 0usize;
    let mut errors: Vec<String> = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        // Header is row 1, so data row i sits at file row i + 2.
        let row_num = i + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                errors.push(format!("Row {row_num}: {e}"));
                continue;
            }
        };
        match parse_row(&record, &cols) {
            Ok(row) => {
                if insert_transaction(&ctx.conn, &row, Utc::now())? {
                    imported += 1;
                } else {
                    skipped += 1;
                }
            }
            Err(reason) => errors.push(format!("Row {row_num}: {reason}")),
        }
    }

    if !errors.is_empty() {
        return Err(ApiError::UnprocessableContent { errors });
    }

    info!("CSV processed: {imported} imported, {skipped} skipped");
    Ok(UploadSummary { imported, skipped })
}
