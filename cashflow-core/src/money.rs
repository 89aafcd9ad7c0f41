//! Codec for the store's signed currency strings (e.g. `"-₹120.50"`).
//!
//! The external document store keeps each amount as sign + currency symbol +
//! magnitude in one string. Everything downstream works on
//! `(Direction, magnitude)` pairs, so this is the only place the string
//! shape is known.

use serde::{Deserialize, Serialize};

/// Which way money moved. Credit is income, debit is expense.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    #[serde(rename = "credit")]
    Credit,
    #[serde(rename = "debit")]
    Debit,
}

/// Parse a formatted amount string into direction + non-negative magnitude.
///
/// Strips every character that is not a digit, minus sign, or decimal point
/// and parses what remains. A leading `-` means debit; `+` or no sign means
/// credit. Malformed or non-finite input yields zero magnitude rather than
/// an error, so one bad record can never poison a whole aggregation pass.
pub fn parse_amount(formatted: &str) -> (Direction, f64) {
    let trimmed = formatted.trim();
    let numeric: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '.')
        .collect();

    let value = numeric.parse::<f64>().unwrap_or(0.0);
    let value = if value.is_finite() { value } else { 0.0 };

    let direction = if trimmed.starts_with('-') || value < 0.0 {
        Direction::Debit
    } else {
        Direction::Credit
    };

    (direction, value.abs())
}

/// Render `(direction, magnitude)` back into the store's string shape:
/// sign + symbol + magnitude fixed to two decimals.
pub fn format_amount(direction: Direction, magnitude: f64, symbol: &str) -> String {
    let sign = match direction {
        Direction::Credit => '+',
        Direction::Debit => '-',
    };
    format!("{}{}{:.2}", sign, symbol, magnitude)
}

/// Magnitude with its sign applied: positive for credit, negative for debit.
pub fn signed(direction: Direction, magnitude: f64) -> f64 {
    match direction {
        Direction::Credit => magnitude,
        Direction::Debit => -magnitude,
    }
}

/// Group an amount into thousands for display messages (`12345.0` → `"12,345"`).
pub fn display_amount(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
