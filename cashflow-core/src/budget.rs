//! Budget evaluator: effective ceiling from active cards, utilization, and
//! threshold classification.

use serde::{Deserialize, Serialize};

use crate::model::Card;

/// Budget knobs. `default_limit` is the single home of the fallback
/// ceiling used when no unfrozen card contributes a limit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BudgetConfig {
    pub default_limit: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            default_limit: 50_000.0,
        }
    }
}

/// Utilization severity. Evaluated highest-first; only the highest matching
/// tier applies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdBucket {
    Exceeded,
    Warning,
    Info,
    None,
}

impl ThresholdBucket {
    /// Classify a raw (unclamped) utilization percentage.
    pub fn from_percent(raw_percent: f64) -> Self {
        if raw_percent >= 100.0 {
            ThresholdBucket::Exceeded
        } else if raw_percent >= 90.0 {
            ThresholdBucket::Warning
        } else if raw_percent >= 75.0 {
            ThresholdBucket::Info
        } else {
            ThresholdBucket::None
        }
    }

    /// Notification priority for this tier; `None` emits nothing.
    pub fn priority(&self) -> Option<u8> {
        match self {
            ThresholdBucket::Exceeded => Some(1),
            ThresholdBucket::Warning => Some(2),
            ThresholdBucket::Info => Some(3),
            ThresholdBucket::None => None,
        }
    }
}

/// Derived budget state for one snapshot of cards + spending.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BudgetEvaluation {
    pub limit: f64,
    pub spent: f64,
    /// Unclamped percentage; drives threshold checks.
    pub raw_percent: f64,
    /// Clamped to 0..=100 for progress bars.
    pub display_percent: f64,
    /// Headroom left, floored at zero.
    pub remaining: f64,
    pub bucket: ThresholdBucket,
}

/// Sum of limits over unfrozen cards, falling back to the configured
/// default when nothing contributes.
pub fn effective_limit(cards: &[Card], config: &BudgetConfig) -> f64 {
    let total: f64 = cards.iter().filter(|c| !c.frozen).map(|c| c.limit).sum();
    if total > 0.0 {
        total
    } else {
        config.default_limit
    }
}

/// Evaluate utilization of the effective limit by `total_expense`.
pub fn evaluate(cards: &[Card], total_expense: f64, config: &BudgetConfig) -> BudgetEvaluation {
    let limit = effective_limit(cards, config);
    let raw_percent = if limit > 0.0 {
        (total_expense / limit) * 100.0
    } else {
        0.0
    };
    BudgetEvaluation {
        limit,
        spent: total_expense,
        raw_percent,
        display_percent: raw_percent.clamp(0.0, 100.0),
        remaining: (limit - total_expense).max(0.0),
        bucket: ThresholdBucket::from_percent(raw_percent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SecurityControls;

    fn card(id: &str, limit: f64, frozen: bool) -> Card {
        Card {
            id: id.to_string(),
            holder: "HOLDER".to_string(),
            number: "4111222233334444".to_string(),
            limit,
            spent: 0.0,
            frozen,
            security: SecurityControls::default(),
        }
    }

    #[test]
    fn test_unfrozen_card_limit_drives_warning() {
        let cards = vec![card("c1", 1000.0, false)];
        let config = BudgetConfig::default();
        let eval = evaluate(&cards, 950.0, &config);
        assert_eq!(eval.limit, 1000.0);
        assert_eq!(eval.bucket, ThresholdBucket::Warning); // 95% >= 90%
        assert_eq!(eval.remaining, 50.0);
    }

    #[test]
    fn test_no_cards_falls_back_to_default() {
        let config = BudgetConfig::default();
        let eval = evaluate(&[], 40_000.0, &config);
        assert_eq!(eval.limit, 50_000.0);
        assert_eq!(eval.raw_percent, 80.0);
        assert_eq!(eval.bucket, ThresholdBucket::Info);
    }

    #[test]
    fn test_frozen_cards_do_not_count() {
        let cards = vec![card("c1", 30_000.0, true), card("c2", 20_000.0, false)];
        let config = BudgetConfig::default();
        assert_eq!(effective_limit(&cards, &config), 20_000.0);

        let all_frozen = vec![card("c1", 30_000.0, true)];
        assert_eq!(effective_limit(&all_frozen, &config), 50_000.0);
    }

    #[test]
    fn test_default_limit_is_overridable() {
        let config = BudgetConfig {
            default_limit: 10_000.0,
        };
        assert_eq!(effective_limit(&[], &config), 10_000.0);
    }

    #[test]
    fn test_threshold_tiers() {
        assert_eq!(
            ThresholdBucket::from_percent(120.0),
            ThresholdBucket::Exceeded
        );
        assert_eq!(
            ThresholdBucket::from_percent(100.0),
            ThresholdBucket::Exceeded
        );
        assert_eq!(ThresholdBucket::from_percent(92.5), ThresholdBucket::Warning);
        assert_eq!(ThresholdBucket::from_percent(75.0), ThresholdBucket::Info);
        assert_eq!(ThresholdBucket::from_percent(74.9), ThresholdBucket::None);
        assert_eq!(ThresholdBucket::from_percent(0.0), ThresholdBucket::None);
    }

    #[test]
    fn test_display_percent_clamped_raw_not() {
        let cards = vec![card("c1", 1000.0, false)];
        let eval = evaluate(&cards, 1500.0, &BudgetConfig::default());
        assert_eq!(eval.raw_percent, 150.0);
        assert_eq!(eval.display_percent, 100.0);
        assert_eq!(eval.remaining, 0.0);
        assert_eq!(eval.bucket, ThresholdBucket::Exceeded);
    }

    #[test]
    fn test_zero_config_limit_guards_division() {
        let config = BudgetConfig { default_limit: 0.0 };
        let eval = evaluate(&[], 100.0, &config);
        assert_eq!(eval.raw_percent, 0.0);
        assert_eq!(eval.bucket, ThresholdBucket::None);
    }
}
