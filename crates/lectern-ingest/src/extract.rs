//! Text extraction for uploaded documents.
//!
//! A pure function over bytes: no OCR, no layout awareness. PDF pages are
//! concatenated in page order; text files are decoded as UTF-8 verbatim.

use lectern_core::{Error, FileType, Result};

/// Extract the plain-text content of an uploaded file.
pub fn extract_text(data: &[u8], file_type: FileType) -> Result<String> {
    match file_type {
        FileType::Pdf => extract_pdf(data),
        FileType::Txt => extract_txt(data),
    }
}

fn extract_pdf(data: &[u8]) -> Result<String> {
    if data.is_empty() {
        return Err(Error::Extraction(
            "Cannot extract text from empty PDF data".to_string(),
        ));
    }

    // Validate PDF magic bytes (%PDF)
    if data.len() < 4 || &data[0..4] != b"%PDF" {
        return Err(Error::Extraction(
            "Not a valid PDF (missing %PDF header)".to_string(),
        ));
    }

    pdf_extract::extract_text_from_mem(data)
        .map_err(|e| Error::Extraction(format!("PDF text extraction failed: {}", e)))
}

fn extract_txt(data: &[u8]) -> Result<String> {
    std::str::from_utf8(data)
        .map(str::to_owned)
        .map_err(|e| Error::Extraction(format!("File is not valid UTF-8: {}", e)))
}
