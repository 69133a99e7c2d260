use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

/// Canonical decimal text: trailing fractional zeros stripped, so `12.50`
/// and `12.5` render identically.
pub fn canonical_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

/// Row fingerprint for dedup: SHA-256 hex digest over
/// `date|description|amount|currency`.
///
/// Pure function of its inputs. The same transaction always produces the
/// same digest, which is what makes re-uploads idempotent.
pub fn hash_key(date: &str, description: &str, amount: Decimal, currency: &str) -> String {
    let text = format!(
        "{date}|{description}|{}|{currency}",
        canonical_amount(amount)
    );
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
