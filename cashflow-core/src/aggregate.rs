//! Aggregation engine: derives chart-ready series from a transaction
//! snapshot.
//!
//! Pure function of `(transactions, range mode)`. Recomputed wholesale on
//! every snapshot or range change; there is no internal state and no delta
//! handling, the newest snapshot simply supersedes the previous result.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::model::Transaction;

/// Selected chart range. The range is an aggregation key, not a date
/// filter: `Week` buckets by weekday across all dates in the input, `Month`
/// by calendar month across all years present.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RangeMode {
    Week,
    Month,
}

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// How many trailing trend points are retained for display.
const TREND_WINDOW: usize = 15;

/// One expense sum per category label, ranked descending.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryTotal {
    pub label: String,
    pub amount: f64,
    pub chart_color: &'static str,
}

/// One named aggregation slot (weekday or month) for the bar chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimeBucket {
    pub label: &'static str,
    pub amount: f64,
}

/// One calendar day of the cumulative cash-flow series.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendPoint {
    /// Display key, "M/D".
    pub date_key: String,
    pub income: f64,
    pub expense: f64,
    pub cumulative_income: f64,
    pub cumulative_expense: f64,
}

/// Everything the analytics views need, derived in one pass and never
/// persisted.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Aggregation {
    pub total_income: f64,
    pub total_expense: f64,
    /// `round((income - expense) / income * 100)`; zero when income is zero.
    pub savings_rate: i64,
    /// Full ranked breakdown; ties keep input encounter order.
    pub category_totals: Vec<CategoryTotal>,
    /// First four of `category_totals`.
    pub top_categories: Vec<CategoryTotal>,
    /// Fixed-order buckets for the selected range mode.
    pub time_series: Vec<TimeBucket>,
    /// Peak bucket value, used to highlight the tallest bar.
    pub highest_spent: f64,
    /// Rough per-day expense, `round(total_expense / 30)`.
    pub daily_average: f64,
    /// Last 15 days of cumulative income/expense, chronological.
    pub trend: Vec<TrendPoint>,
}

/// Compute the full aggregation for one snapshot. Idempotent and
/// side-effect free; an empty snapshot yields an all-zero result.
pub fn compute(transactions: &[Transaction], mode: RangeMode) -> Aggregation {
    let mut total_income = 0.0;
    let mut total_expense = 0.0;
    for tx in transactions {
        if tx.is_expense() {
            total_expense += tx.magnitude();
        } else {
            total_income += tx.magnitude();
        }
    }

    let savings_rate = if total_income > 0.0 {
        (((total_income - total_expense) / total_income) * 100.0).round() as i64
    } else {
        0
    };

    let category_totals = rank_categories(transactions);
    let top_categories = category_totals.iter().take(4).cloned().collect();

    let time_series = bucket_expenses(transactions, mode);
    let highest_spent = time_series
        .iter()
        .fold(0.0_f64, |max, bucket| max.max(bucket.amount));

    let daily_average = (total_expense / 30.0).round();

    Aggregation {
        total_income,
        total_expense,
        savings_rate,
        category_totals,
        top_categories,
        time_series,
        highest_spent,
        daily_average,
        trend: build_trend(transactions),
    }
}

/// Group expense magnitudes by raw category label, descending by sum.
/// The sort is stable, so equal sums keep first-encounter order.
fn rank_categories(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        let amount = tx.magnitude();
        match totals.iter_mut().find(|c| c.label == tx.category) {
            Some(entry) => entry.amount += amount,
            None => totals.push(CategoryTotal {
                label: tx.category.clone(),
                amount,
                chart_color: Category::from_label(&tx.category).chart_color(),
            }),
        }
    }
    totals.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal));
    totals
}

/// Sum expense magnitudes into the fixed bucket set for the range mode:
/// seven weekday buckets Mon..Sun, or twelve month buckets Jan..Dec.
fn bucket_expenses(transactions: &[Transaction], mode: RangeMode) -> Vec<TimeBucket> {
    let labels: &[&'static str] = match mode {
        RangeMode::Week => &WEEKDAY_LABELS,
        RangeMode::Month => &MONTH_LABELS,
    };
    let mut sums = vec![0.0_f64; labels.len()];

    for tx in transactions.iter().filter(|t| t.is_expense()) {
        let slot = match mode {
            RangeMode::Week => tx.date.weekday().num_days_from_monday() as usize,
            RangeMode::Month => tx.date.month0() as usize,
        };
        sums[slot] += tx.magnitude();
    }

    labels
        .iter()
        .copied()
        .zip(sums)
        .map(|(label, amount)| TimeBucket { label, amount })
        .collect()
}

/// Group income and expense by calendar day, sort chronologically by the
/// real timestamp, then prefix-sum both series and keep the trailing window.
fn build_trend(transactions: &[Transaction]) -> Vec<TrendPoint> {
    let mut days: BTreeMap<chrono::NaiveDate, (f64, f64)> = BTreeMap::new();
    for tx in transactions {
        let entry = days.entry(tx.date.date_naive()).or_insert((0.0, 0.0));
        if tx.is_expense() {
            entry.1 += tx.magnitude();
        } else {
            entry.0 += tx.magnitude();
        }
    }

    let mut running_income = 0.0;
    let mut running_expense = 0.0;
    let mut points: Vec<TrendPoint> = days
        .into_iter()
        .map(|(day, (income, expense))| {
            running_income += income;
            running_expense += expense;
            TrendPoint {
                date_key: format!("{}/{}", day.month(), day.day()),
                income,
                expense,
                cumulative_income: running_income,
                cumulative_expense: running_expense,
            }
        })
        .collect();

    let skip = points.len().saturating_sub(TREND_WINDOW);
    points.drain(..skip);
    points
}

/// Memoizes the last computed result, keyed by structural equality of the
/// input snapshot and range mode. The feed re-delivers whole collections on
/// every change, possibly identical; this avoids redundant recomputation
/// without the engine itself holding any semantic state.
#[derive(Debug, Default)]
pub struct AnalyticsCache {
    input: Option<(Vec<Transaction>, RangeMode)>,
    result: Aggregation,
}

impl AnalyticsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&mut self, transactions: &[Transaction], mode: RangeMode) -> &Aggregation {
        let fresh = matches!(
            &self.input,
            Some((cached, cached_mode)) if cached.as_slice() == transactions && *cached_mode == mode
        );
        if !fresh {
            self.result = compute(transactions, mode);
            self.input = Some((transactions.to_vec(), mode));
        }
        &self.result
    }
}
