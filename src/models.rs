use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// A stored bank transaction. `hash_key` is the dedup fingerprint; it is
/// internal to the store and never serializes.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
    pub balance: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    #[allow(dead_code)]
    #[serde(skip_serializing)]
    pub hash_key: String,
}

/// Intermediate representation of one CSV row before DB insert.
#[derive(Debug, Clone)]
pub struct ParsedRow {
    pub date: String,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
    pub balance: Option<Decimal>,
    pub hash_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    pub imported: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionPage {
    pub data: Vec<Transaction>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_json_hides_hash_key() {
        let txn = Transaction {
            id: 1,
            date: "2024-01-15".to_string(),
            description: "COFFEE SHOP".to_string(),
            amount: "-4.50".parse().unwrap(),
            currency: "USD".to_string(),
            balance: None,
            created_at: Utc::now(),
            hash_key: "abc123".to_string(),
        };
        let v = serde_json::to_value(&txn).unwrap();
        assert!(v.get("hash_key").is_none());
        assert_eq!(v["date"], "2024-01-15");
        assert_eq!(v["currency"], "USD");
        assert!(v["balance"].is_null());
    }

    #[test]
    fn test_health_status_shape() {
        let v = serde_json::to_value(HealthStatus::ok()).unwrap();
        assert_eq!(v["status"], "ok");
    }
}
