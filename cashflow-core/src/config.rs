//! Explicit engine configuration, passed into computations instead of
//! being read from ambient global state. A single settings collaborator
//! owns the current value and hands out immutable snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::budget::{self, BudgetConfig, BudgetEvaluation};
use crate::model::{Card, Currency, Transaction};
use crate::notify::{self, Notification};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    pub currency: Currency,
    pub budget: BudgetConfig,
}

impl EngineConfig {
    /// Budget evaluation under this configuration.
    pub fn evaluate_budget(&self, cards: &[Card], total_expense: f64) -> BudgetEvaluation {
        budget::evaluate(cards, total_expense, &self.budget)
    }

    /// Notification synthesis under this configuration. `recent` is the
    /// newest-first top five transactions, pre-sorted by the caller.
    pub fn notifications(
        &self,
        evaluation: &BudgetEvaluation,
        recent: &[Transaction],
        cards: &[Card],
        no_transactions: bool,
        now: DateTime<Utc>,
    ) -> Vec<Notification> {
        notify::synthesize(evaluation, recent, cards, no_transactions, &self.currency, now)
    }
}
