//! cashflow-receipt: heuristic receipt-to-transaction extraction.
//!
//! Takes raw OCR text and guesses merchant, total amount, and category so
//! the user only has to confirm instead of typing everything in. The OCR
//! step itself lives behind the [`ocr::OcrEngine`] seam.

pub mod ocr;
pub mod scan;

pub use ocr::{OcrEngine, scan_receipt};
pub use scan::{ReceiptDraft, classify_receipt_text};
