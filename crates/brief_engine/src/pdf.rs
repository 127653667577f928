use std::fmt;

use engine_logging::{engine_debug, engine_warn};
use lopdf::Document;

use crate::{ExtractError, ExtractedText};

// The header may follow up to 1024 bytes of leading junk.
const PDF_MAGIC: &[u8] = b"%PDF-";
const HEADER_SEARCH_WINDOW: usize = 1024;

pub trait PdfExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractError>;
}

/// Page-by-page text extraction with lopdf.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl PdfExtractor for LopdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractError> {
        if !has_pdf_header(bytes) {
            return Err(ExtractError::NotPdf);
        }
        let doc =
            Document::load_mem(bytes).map_err(|err| ExtractError::Unreadable(err.to_string()))?;

        let pages = doc
            .get_pages()
            .into_keys()
            .map(|page_number| {
                let text = doc.extract_text(&[page_number]).map(strip_block_newline);
                (page_number, text)
            });
        let extracted = concatenate_pages(pages);
        engine_debug!(
            "Extracted {} pages, {} chars, {} failed",
            extracted.page_count,
            extracted.text.chars().count(),
            extracted.failed_pages.len()
        );
        Ok(extracted)
    }
}

/// Joins per-page results in order with no separator.
///
/// A failed page contributes an empty string and is recorded; it never fails
/// the document.
pub fn concatenate_pages<I, E>(pages: I) -> ExtractedText
where
    I: IntoIterator<Item = (u32, Result<String, E>)>,
    E: fmt::Display,
{
    let mut extracted = ExtractedText::default();
    for (page_number, page) in pages {
        extracted.page_count += 1;
        match page {
            Ok(text) => extracted.text.push_str(&text),
            Err(err) => {
                engine_warn!("Page {} yielded no text: {}", page_number, err);
                extracted.failed_pages.push(page_number);
            }
        }
    }
    extracted
}

// lopdf ends each text block with '\n'; the last one is not page content.
fn strip_block_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
    }
    text
}

fn has_pdf_header(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW + PDF_MAGIC.len())];
    window.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC)
}
