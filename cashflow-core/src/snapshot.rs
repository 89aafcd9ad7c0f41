//! Lenient decoding of whole-collection snapshots from the document store.
//!
//! The store pushes complete replacement collections on every change, as
//! arrays of loosely-typed JSON documents. Decoding is tolerant per record:
//! a document with no id is dropped, a malformed date falls back to the
//! Unix epoch, missing numerics read as zero. Only a snapshot that is not
//! an array at all is an error.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::model::{Card, SecurityControls, Transaction};

fn str_field(doc: &Value, key: &str) -> Option<String> {
    doc.get(key).and_then(Value::as_str).map(str::to_string)
}

fn num_field(doc: &Value, key: &str) -> f64 {
    doc.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn date_field(doc: &Value, key: &str) -> DateTime<Utc> {
    doc.get(key)
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<DateTime<Utc>>().ok())
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Decode a transaction snapshot, dropping malformed documents and
/// re-sorting newest-first to enforce the delivery contract.
pub fn decode_transactions(snapshot: &Value) -> Result<Vec<Transaction>> {
    let docs = snapshot
        .as_array()
        .context("transaction snapshot is not an array")?;

    let mut transactions = Vec::with_capacity(docs.len());
    for doc in docs {
        let Some(id) = str_field(doc, "id") else {
            continue; // no identity, nothing to track
        };
        transactions.push(Transaction {
            id,
            title: str_field(doc, "title").unwrap_or_default(),
            category: str_field(doc, "category").unwrap_or_else(|| "Other".to_string()),
            amount: str_field(doc, "amount").unwrap_or_else(|| "+0.00".to_string()),
            date: date_field(doc, "date"),
            card_id: str_field(doc, "cardId"),
        });
    }

    transactions.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(transactions)
}

/// Decode a card snapshot. Same per-document tolerance as transactions.
pub fn decode_cards(snapshot: &Value) -> Result<Vec<Card>> {
    let docs = snapshot.as_array().context("card snapshot is not an array")?;

    let mut cards = Vec::with_capacity(docs.len());
    for doc in docs {
        let Some(id) = str_field(doc, "id") else {
            continue;
        };
        let security = doc.get("security").map_or_else(SecurityControls::default, |s| {
            SecurityControls {
                online: s.get("online").and_then(Value::as_bool).unwrap_or(false),
                atm: s.get("atm").and_then(Value::as_bool).unwrap_or(false),
                international: s
                    .get("international")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            }
        });
        cards.push(Card {
            id,
            holder: str_field(doc, "holder").unwrap_or_default(),
            number: str_field(doc, "number").unwrap_or_default(),
            limit: num_field(doc, "limit"),
            spent: num_field(doc, "spent"),
            frozen: doc.get("frozen").and_then(Value::as_bool).unwrap_or(false),
            security,
        });
    }

    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_transactions_sorted_newest_first() {
        let snapshot = json!([
            { "id": "a", "title": "old", "category": "Food",
              "amount": "-₹10.00", "date": "2024-01-01T08:00:00Z" },
            { "id": "b", "title": "new", "category": "Bills",
              "amount": "-₹20.00", "date": "2024-06-01T08:00:00Z" },
        ]);
        let txs = decode_transactions(&snapshot).unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].id, "b");
        assert_eq!(txs[1].id, "a");
    }

    #[test]
    fn test_decode_skips_documents_without_id() {
        let snapshot = json!([
            { "title": "orphan", "amount": "-₹10.00" },
            { "id": "ok", "title": "kept", "amount": "+₹5.00",
              "date": "2024-01-01T00:00:00Z" },
        ]);
        let txs = decode_transactions(&snapshot).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].id, "ok");
    }

    #[test]
    fn test_bad_date_falls_back_to_epoch() {
        let snapshot = json!([
            { "id": "x", "title": "t", "category": "Food",
              "amount": "-₹1.00", "date": "not-a-date" },
        ]);
        let txs = decode_transactions(&snapshot).unwrap();
        assert_eq!(txs[0].date, DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_non_array_snapshot_is_an_error() {
        assert!(decode_transactions(&json!({"oops": true})).is_err());
        assert!(decode_cards(&json!(42)).is_err());
    }

    #[test]
    fn test_decode_cards() {
        let snapshot = json!([
            { "id": "c1", "holder": "A", "number": "4111222233334444",
              "limit": 1000.0, "spent": 950.0, "frozen": false,
              "security": { "online": true } },
            { "id": "c2", "holder": "B", "number": "5555", "frozen": true },
        ]);
        let cards = decode_cards(&snapshot).unwrap();
        assert_eq!(cards.len(), 2);
        assert!(cards[0].security.online);
        assert!(!cards[0].security.atm);
        assert_eq!(cards[1].limit, 0.0);
        assert!(cards[1].frozen);
    }
}
