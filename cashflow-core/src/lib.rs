//! cashflow-core: analytics, budgeting, and notification engine for the
//! CashFlow personal finance tracker.
//!
//! Everything here is a pure function of the latest data snapshot: the
//! external document store pushes whole replacement collections, the engine
//! recomputes derived results, and presentation consumes them. No module
//! holds mutable state of its own.

pub mod aggregate;
pub mod budget;
pub mod category;
pub mod config;
pub mod model;
pub mod money;
pub mod notify;
pub mod snapshot;

pub use aggregate::{
    Aggregation, AnalyticsCache, CategoryTotal, RangeMode, TimeBucket, TrendPoint, compute,
};
pub use budget::{BudgetConfig, BudgetEvaluation, ThresholdBucket, effective_limit, evaluate};
pub use category::{Category, IconKind, StyleTokens, classify_text};
pub use config::EngineConfig;
pub use model::{Card, Currency, SecurityControls, Transaction};
pub use money::{Direction, format_amount, parse_amount};
pub use notify::{Notification, NoticeKind, ReadState, relative_time, synthesize};
pub use snapshot::{decode_cards, decode_transactions};
