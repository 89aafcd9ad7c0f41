//! Notification synthesizer: advisory notices derived from budget state,
//! recent activity, and frozen cards.
//!
//! Ids are fact-derived, never counters: the same underlying condition maps
//! to the same id across recomputations and restarts, which is what lets
//! read/dismiss state survive a refresh. The synthesizer itself holds no
//! state; [`ReadState`] is the caller-owned persistence companion.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::budget::{BudgetEvaluation, ThresholdBucket};
use crate::category::{IconKind, StyleTokens};
use crate::model::{Card, Currency, Transaction};
use crate::money::display_amount;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Alert,
    Expense,
    Income,
    Info,
}

/// One advisory notice. Only `id` and `priority` are semantically stable;
/// the display fields are recomputed every pass.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Notification {
    pub id: String,
    /// Lower sorts first.
    pub priority: u8,
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    pub relative_time: String,
    pub style: StyleTokens,
}

const STYLE_BUDGET_ALERT: StyleTokens =
    StyleTokens::new("neon-red", "neon-red/10", IconKind::AlertTriangle);
const STYLE_BUDGET_WARNING: StyleTokens =
    StyleTokens::new("amber", "amber/10", IconKind::AlertTriangle);
const STYLE_EXPENSE: StyleTokens =
    StyleTokens::new("neon-red", "neon-red/10", IconKind::TrendingDown);
const STYLE_INCOME: StyleTokens =
    StyleTokens::new("neon-green", "neon-green/10", IconKind::TrendingUp);
const STYLE_FROZEN: StyleTokens =
    StyleTokens::new("brand-blue", "brand-blue/10", IconKind::CreditCard);
const STYLE_WELCOME: StyleTokens =
    StyleTokens::new("neon-green", "neon-green/10", IconKind::Wallet);

/// Render a timestamp relative to `now`: "Just now", minutes, hours, days,
/// then an absolute date beyond a week.
pub fn relative_time(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - date).num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{} min ago", minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{} hour{} ago", hours, if hours > 1 { "s" } else { "" });
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{} day{} ago", days, if days > 1 { "s" } else { "" });
    }
    date.format("%Y-%m-%d").to_string()
}

/// Build the deduplicated, priority-ordered notice list for one snapshot.
///
/// Emits at most one budget notice (highest matching tier only), one per
/// frozen card, one per recent transaction (`recent` is the newest-first
/// top five, pre-sorted by the caller), and a single onboarding notice when
/// the transaction list is entirely empty. Sorting is stable, so equal
/// priorities keep insertion order.
pub fn synthesize(
    budget: &BudgetEvaluation,
    recent: &[Transaction],
    cards: &[Card],
    no_transactions: bool,
    currency: &Currency,
    now: DateTime<Utc>,
) -> Vec<Notification> {
    let mut notices = Vec::new();
    let month_key = now.format("%Y-%m");

    match budget.bucket {
        ThresholdBucket::Exceeded => notices.push(Notification {
            id: format!("budget-exceeded-{}", month_key),
            priority: 1,
            kind: NoticeKind::Alert,
            title: "Budget Exceeded!".to_string(),
            message: format!(
                "You've exceeded your monthly budget of {}{}.",
                currency.symbol,
                display_amount(budget.limit)
            ),
            relative_time: "Just now".to_string(),
            style: STYLE_BUDGET_ALERT,
        }),
        ThresholdBucket::Warning => notices.push(Notification {
            id: format!("budget-90-{}", month_key),
            priority: 2,
            kind: NoticeKind::Alert,
            title: "Budget Warning".to_string(),
            message: format!(
                "You've used 90% of your budget. {}{} remaining.",
                currency.symbol,
                display_amount(budget.remaining)
            ),
            relative_time: "Now".to_string(),
            style: STYLE_BUDGET_WARNING,
        }),
        ThresholdBucket::Info => notices.push(Notification {
            id: format!("budget-75-{}", month_key),
            priority: 3,
            kind: NoticeKind::Info,
            title: "Budget Notice".to_string(),
            message: format!(
                "You've crossed 75% of your budget. {}{} remaining.",
                currency.symbol,
                display_amount(budget.remaining)
            ),
            relative_time: "Now".to_string(),
            style: STYLE_BUDGET_WARNING,
        }),
        ThresholdBucket::None => {}
    }

    for tx in recent.iter().take(5) {
        let is_expense = tx.is_expense();
        notices.push(Notification {
            id: format!("tx-{}", tx.id),
            priority: 5,
            kind: if is_expense {
                NoticeKind::Expense
            } else {
                NoticeKind::Income
            },
            title: if is_expense {
                "Expense Recorded".to_string()
            } else {
                "Income Received".to_string()
            },
            message: format!("{}: {}", tx.title, tx.amount),
            relative_time: relative_time(tx.date, now),
            style: if is_expense { STYLE_EXPENSE } else { STYLE_INCOME },
        });
    }

    for card in cards.iter().filter(|c| c.frozen) {
        notices.push(Notification {
            id: format!("card-frozen-{}", card.id),
            priority: 4,
            kind: NoticeKind::Alert,
            title: "Card Frozen".to_string(),
            message: format!("{} is currently frozen.", card.masked_number()),
            relative_time: "Active".to_string(),
            style: STYLE_FROZEN,
        });
    }

    if no_transactions {
        notices.push(Notification {
            id: "welcome-msg".to_string(),
            priority: 10,
            kind: NoticeKind::Info,
            title: "Welcome to CashFlow!".to_string(),
            message: "Start tracking by adding your first transaction.".to_string(),
            relative_time: "Now".to_string(),
            style: STYLE_WELCOME,
        });
    }

    notices.sort_by_key(|n| n.priority);
    notices
}

/// Caller-owned read/dismiss tracking, keyed by the deterministic notice
/// ids. Serializable so the settings collaborator can persist it; the
/// synthesizer never touches it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadState {
    pub read: BTreeSet<String>,
    pub dismissed: BTreeSet<String>,
}

impl ReadState {
    pub fn mark_read(&mut self, id: &str) {
        self.read.insert(id.to_string());
    }

    pub fn mark_all_read(&mut self, notices: &[Notification]) {
        for n in self.active(notices) {
            self.read.insert(n.id.clone());
        }
    }

    pub fn dismiss(&mut self, id: &str) {
        self.dismissed.insert(id.to_string());
    }

    pub fn clear_all(&mut self, notices: &[Notification]) {
        for n in notices {
            self.dismissed.insert(n.id.clone());
        }
    }

    /// Notices not yet dismissed, in synthesized order.
    pub fn active<'a>(&self, notices: &'a [Notification]) -> Vec<&'a Notification> {
        notices
            .iter()
            .filter(|n| !self.dismissed.contains(&n.id))
            .collect()
    }

    pub fn unread_count(&self, notices: &[Notification]) -> usize {
        self.active(notices)
            .iter()
            .filter(|n| !self.read.contains(&n.id))
            .count()
    }
}
