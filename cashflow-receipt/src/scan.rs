//! Receipt text heuristics: extract merchant, total amount, and category
//! from raw OCR output.
//!
//! OCR text is noisy, so every step is a best-effort guess. A miss is an
//! explicit unset field, never a silent default: an extracted draft with
//! `amount == None` requires manual entry before it may become a
//! transaction.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use cashflow_core::category::{Category, classify_text};

/// Money pattern with mandatory two decimal places, thousands optionally
/// grouped ("1,234.56"). Used on total-keyword lines.
static STRICT_MONEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,3}(?:,\d{3})*\.\d{2}").expect("strict money pattern"));

/// Loose numeric token, decimals optional. Fallback scan only.
static LOOSE_MONEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,3}(?:,\d{3})*(?:\.\d{2})?").expect("loose money pattern"));

const TOTAL_KEYWORDS: [&str; 6] = ["total", "grand total", "payable", "amount", "due", "balance"];

const MERCHANT_FALLBACK: &str = "Unknown Merchant";
const MERCHANT_MAX_LEN: usize = 20;

/// Values at or above this are assumed to be IDs or barcodes, not totals.
const AMOUNT_CEILING: f64 = 500_000.0;

/// What the heuristics pulled out of one receipt.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReceiptDraft {
    pub merchant: String,
    /// `None` means no plausible total was found; the caller must require
    /// manual entry rather than submitting zero.
    pub amount: Option<f64>,
    pub category: Category,
}

/// Run all receipt heuristics over one block of OCR text.
pub fn classify_receipt_text(text: &str) -> ReceiptDraft {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    ReceiptDraft {
        merchant: extract_merchant(&lines),
        amount: extract_amount(text, &lines),
        category: classify_text(text),
    }
}

/// First line longer than three characters that is not all
/// digits/punctuation, with leading non-alphanumerics stripped and capped
/// at twenty characters.
fn extract_merchant(lines: &[&str]) -> String {
    let candidate = lines
        .iter()
        .find(|l| l.len() > 3 && l.chars().any(|c| c.is_alphabetic()));

    match candidate {
        Some(line) => line
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .chars()
            .take(MERCHANT_MAX_LEN)
            .collect(),
        None => MERCHANT_FALLBACK.to_string(),
    }
}

/// Two-phase total search.
///
/// Phase A: the first line containing a total keyword, and the line right
/// after it, are scanned for the strict money pattern; the last match on
/// the first line that has any wins.
///
/// Phase B: fall back to the largest loose numeric token in the whole
/// text, excluding decimal-less years 2020..=2030 and anything at or above
/// the ID/barcode ceiling.
fn extract_amount(text: &str, lines: &[&str]) -> Option<f64> {
    if let Some(idx) = lines.iter().position(|l| {
        let lower = l.to_lowercase();
        TOTAL_KEYWORDS.iter().any(|k| lower.contains(k))
    }) {
        for line in lines.iter().skip(idx).take(2) {
            if let Some(m) = STRICT_MONEY.find_iter(line).last() {
                if let Ok(value) = m.as_str().replace(',', "").parse::<f64>() {
                    return Some(value);
                }
            }
        }
    }

    let mut best: Option<f64> = None;
    for m in LOOSE_MONEY.find_iter(text) {
        let token = m.as_str();
        let Ok(value) = token.replace(',', "").parse::<f64>() else {
            continue;
        };
        let looks_like_year = (2020.0..=2030.0).contains(&value) && !token.contains('.');
        if looks_like_year || value >= AMOUNT_CEILING {
            continue;
        }
        if best.is_none_or(|b| value > b) {
            best = Some(value);
        }
    }
    best.filter(|v| *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_phase_beats_fallback_and_skips_year() {
        let text = "CITY SUPERMART\n12 Main Road\nDate: 2024\nTOTAL          120.00\nThank you";
        let draft = classify_receipt_text(text);
        assert_eq!(draft.amount, Some(120.0));
        assert_eq!(draft.merchant, "CITY SUPERMART");
        assert_eq!(draft.category, Category::Shopping);
    }

    #[test]
    fn test_amount_on_line_after_keyword() {
        let text = "Cafe Aroma\nGrand Total\n1,240.50\n";
        let draft = classify_receipt_text(text);
        assert_eq!(draft.amount, Some(1240.5));
        assert_eq!(draft.category, Category::Food);
    }

    #[test]
    fn test_last_match_on_keyword_line_wins() {
        let text = "BISTRO NINE\nTotal 2 items 45.00 tax 5.00 50.00\n";
        let draft = classify_receipt_text(text);
        assert_eq!(draft.amount, Some(50.0));
    }

    #[test]
    fn test_fallback_takes_maximum_excluding_years() {
        // No total keyword anywhere; 2024 has no decimal point and must be
        // excluded, leaving 890.00 as the largest token.
        let text = "QUICK WASH\n14 Jan 2024\nitem 120.00\nitem 890.00\n";
        let draft = classify_receipt_text(text);
        assert_eq!(draft.amount, Some(890.0));
    }

    #[test]
    fn test_fallback_excludes_barcode_sized_numbers() {
        let text = "CITY PHARMACY\nRef 999,999.00\nitem 75.00\n";
        let draft = classify_receipt_text(text);
        // 999,999.00 is at/above the ceiling; keyword phase is not
        // triggered ("Ref" is not a total keyword), so 75.00 wins.
        assert_eq!(draft.amount, Some(75.0));
        assert_eq!(draft.category, Category::Health);
    }

    #[test]
    fn test_no_amount_is_unset_not_zero() {
        let draft = classify_receipt_text("MYSTERY SHOP\nno numbers here\n");
        assert_eq!(draft.amount, None);
    }

    #[test]
    fn test_merchant_skips_numeric_noise_lines() {
        let text = "12345\n----\nThe Corner Bistro Kitchen And Grill\nTotal 99.00\n";
        let draft = classify_receipt_text(text);
        assert_eq!(draft.merchant, "The Corner Bistro Ki"); // capped at 20 chars
    }

    #[test]
    fn test_merchant_strips_leading_symbols() {
        let text = "** Starbucks Coffee\nTotal 310.00\n";
        let draft = classify_receipt_text(text);
        assert_eq!(draft.merchant, "Starbucks Coffee");
        assert_eq!(draft.category, Category::Food);
    }

    #[test]
    fn test_merchant_fallback_placeholder() {
        let draft = classify_receipt_text("123\n#!\n9\n");
        assert_eq!(draft.merchant, MERCHANT_FALLBACK);
    }

    #[test]
    fn test_empty_text() {
        let draft = classify_receipt_text("");
        assert_eq!(draft.merchant, MERCHANT_FALLBACK);
        assert_eq!(draft.amount, None);
        assert_eq!(draft.category, Category::Other);
    }
}
