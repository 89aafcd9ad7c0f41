//! Seam for the external OCR collaborator.
//!
//! Text extraction itself is not this crate's job; an [`OcrEngine`]
//! implementation wraps whatever engine the host application ships.
//! Progress lands in a caller-supplied sink as 0-100, and the receipt
//! heuristics run exactly once, on successful completion.

use anyhow::Result;

use crate::scan::{ReceiptDraft, classify_receipt_text};

/// Plain-text extraction from a receipt image.
pub trait OcrEngine {
    /// Extract text from `image`, reporting 0-100 progress into `progress`.
    /// Errors are terminal; there is no partial result.
    fn recognize(&self, image: &[u8], progress: &mut dyn FnMut(u8)) -> Result<String>;
}

/// Run OCR and then the receipt heuristics on the extracted text.
pub fn scan_receipt(
    engine: &dyn OcrEngine,
    image: &[u8],
    progress: &mut dyn FnMut(u8),
) -> Result<ReceiptDraft> {
    let text = engine.recognize(image, progress)?;
    Ok(classify_receipt_text(&text))
}
