//! Uploaded document decoding.
//!
//! Turns the bytes of an uploaded `.txt` or `.docx` file into a normalized
//! article.

use newsdesk_domain::{normalize, NormalizedArticle};
use thiserror::Error;
use tracing::debug;

/// Document decoding error
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The file could not be parsed as its declared format
    #[error("Could not read document: {0}")]
    Unreadable(String),

    /// The file parsed but held no text
    #[error("Document contains no text")]
    Empty,
}

/// Supported upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.txt`
    PlainText,
    /// `.docx`
    Docx,
}

impl DocumentFormat {
    /// Detect the format from a filename's extension (case-insensitive)
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, extension) = filename.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "txt" => Some(DocumentFormat::PlainText),
            "docx" => Some(DocumentFormat::Docx),
            _ => None,
        }
    }
}

/// Extract and normalize the text of an uploaded document
pub fn extract_text(
    bytes: &[u8],
    format: DocumentFormat,
) -> Result<NormalizedArticle, DocumentError> {
    let raw = match format {
        DocumentFormat::PlainText => decode_plain_text(bytes),
        DocumentFormat::Docx => extract_docx(bytes)?,
    };

    let article = normalize(&raw);
    debug!("Extracted {} chars from {:?} upload", article.char_count(), format);
    Ok(article)
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// UTF-8, then BOM-marked UTF-16, then Latin-1
fn decode_plain_text(bytes: &[u8]) -> String {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(body) {
        return text.to_string();
    }

    if let Some(body) = bytes.strip_prefix(UTF16_LE_BOM) {
        return decode_utf16(body, u16::from_le_bytes);
    }
    if let Some(body) = bytes.strip_prefix(UTF16_BE_BOM) {
        return decode_utf16(body, u16::from_be_bytes);
    }

    // Every byte is a valid Latin-1 code point
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn decode_utf16(body: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

fn extract_docx(bytes: &[u8]) -> Result<String, DocumentError> {
    let doc = docx_rs::read_docx(bytes).map_err(|e| DocumentError::Unreadable(e.to_string()))?;

    let mut paragraphs = Vec::new();
    let mut cells = Vec::new();

    for child in &doc.document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(para) => {
                push_non_empty(&mut paragraphs, paragraph_text(para));
            }
            docx_rs::DocumentChild::Table(table) => {
                for row in &table.rows {
                    let docx_rs::TableChild::TableRow(tr) = row;
                    for cell in &tr.cells {
                        let docx_rs::TableRowChild::TableCell(tc) = cell;
                        let mut text = String::new();
                        for content in &tc.children {
                            if let docx_rs::TableCellContent::Paragraph(para) = content {
                                text.push_str(&paragraph_text(para));
                                text.push('\n');
                            }
                        }
                        push_non_empty(&mut cells, text);
                    }
                }
            }
            _ => {}
        }
    }

    paragraphs.append(&mut cells);
    if paragraphs.is_empty() {
        return Err(DocumentError::Empty);
    }
    Ok(paragraphs.join("\n\n"))
}

fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut output = String::new();
    for child in &para.children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run_text(run, &mut output),
            docx_rs::ParagraphChild::Hyperlink(link) => {
                for inner in &link.children {
                    if let docx_rs::ParagraphChild::Run(run) = inner {
                        push_run_text(run, &mut output);
                    }
                }
            }
            _ => {}
        }
    }
    output
}

fn push_run_text(run: &docx_rs::Run, output: &mut String) {
    for run_child in &run.children {
        if let docx_rs::RunChild::Text(text) = run_child {
            output.push_str(&text.text);
        }
    }
}

fn push_non_empty(parts: &mut Vec<String>, text: String) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
    }
}
