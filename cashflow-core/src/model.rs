//! Record types delivered by the external document store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::{Category, StyleTokens};
use crate::money::{self, Direction};

/// A single income or expense record. Immutable once created; edits replace
/// the whole document in the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Opaque identifier assigned by the store.
    pub id: String,
    /// Free-text label ("Starbucks", "Salary").
    pub title: String,
    /// Raw category label as stored; resolved through [`Category::from_label`].
    pub category: String,
    /// Formatted amount string, sign + symbol + magnitude ("-₹120.50").
    pub amount: String,
    /// Timestamp used for ordering and time-bucketing.
    pub date: DateTime<Utc>,
    /// Optional back-reference to a card. Not an ownership relation:
    /// deleting the card leaves the transaction intact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
}

impl Transaction {
    pub fn direction(&self) -> Direction {
        money::parse_amount(&self.amount).0
    }

    /// Absolute amount, zero for malformed strings.
    pub fn magnitude(&self) -> f64 {
        money::parse_amount(&self.amount).1
    }

    /// Magnitude with sign applied: positive income, negative expense.
    pub fn signed_amount(&self) -> f64 {
        let (direction, magnitude) = money::parse_amount(&self.amount);
        money::signed(direction, magnitude)
    }

    pub fn is_expense(&self) -> bool {
        self.direction() == Direction::Debit
    }

    pub fn is_income(&self) -> bool {
        self.direction() == Direction::Credit
    }

    pub fn style(&self) -> StyleTokens {
        Category::from_label(&self.category).style()
    }
}

/// Per-card security switches. Absent flags read as disabled.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityControls {
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub atm: bool,
    #[serde(default)]
    pub international: bool,
}

/// A virtual payment card. `spent` is maintained by the store when a linked
/// expense is added; this crate treats it as read-only input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    pub id: String,
    pub holder: String,
    pub number: String,
    pub limit: f64,
    pub spent: f64,
    pub frozen: bool,
    #[serde(default)]
    pub security: SecurityControls,
}

impl Card {
    /// Only the last four digits are ever rendered.
    pub fn masked_number(&self) -> String {
        let digits: String = self.number.chars().filter(|c| c.is_ascii_digit()).collect();
        let last4 = if digits.len() >= 4 {
            &digits[digits.len() - 4..]
        } else {
            digits.as_str()
        };
        format!("**** **** **** {}", last4)
    }

    /// Share of the card's own limit consumed, as a whole percentage
    /// clamped to 0..=100. Zero-limit cards report zero.
    pub fn percent_used(&self) -> u32 {
        if self.limit <= 0.0 {
            return 0;
        }
        ((self.spent / self.limit) * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

/// Display currency descriptor. Used only for formatting, never conversion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
}

impl Default for Currency {
    fn default() -> Self {
        Self {
            code: "INR".to_string(),
            symbol: "₹".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tx(id: &str, amount: &str, category: &str, date: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            title: format!("tx {}", id),
            category: category.to_string(),
            amount: amount.to_string(),
            date: date.parse().unwrap_or(Utc.timestamp_opt(0, 0).unwrap()),
            card_id: None,
        }
    }

    #[test]
    fn test_transaction_sign_accessors() {
        let expense = tx("e1", "-₹30.00", "Food", "2024-03-04T12:00:00Z");
        assert!(expense.is_expense());
        assert_eq!(expense.magnitude(), 30.0);
        assert_eq!(expense.signed_amount(), -30.0);

        let income = tx("i1", "+₹100.00", "Work", "2024-03-04T12:00:00Z");
        assert!(income.is_income());
        assert_eq!(income.signed_amount(), 100.0);
    }

    #[test]
    fn test_malformed_amount_is_zero() {
        let bad = tx("b1", "garbage", "Food", "2024-03-04T12:00:00Z");
        assert_eq!(bad.magnitude(), 0.0);
        assert_eq!(bad.signed_amount(), 0.0);
    }

    #[test]
    fn test_masked_number() {
        let card = Card {
            id: "c1".into(),
            holder: "ASHISH K AMIN".into(),
            number: "4111 2222 3333 4444".into(),
            limit: 50000.0,
            spent: 0.0,
            frozen: false,
            security: SecurityControls::default(),
        };
        assert_eq!(card.masked_number(), "**** **** **** 4444");
    }

    #[test]
    fn test_percent_used_guards_zero_limit() {
        let mut card = Card {
            id: "c2".into(),
            holder: "X".into(),
            number: "1234".into(),
            limit: 0.0,
            spent: 100.0,
            frozen: false,
            security: SecurityControls::default(),
        };
        assert_eq!(card.percent_used(), 0);
        card.limit = 1000.0;
        card.spent = 250.0;
        assert_eq!(card.percent_used(), 25);
        card.spent = 2000.0;
        assert_eq!(card.percent_used(), 100);
    }
}
