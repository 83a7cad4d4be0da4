//! Header row detection.
//!
//! The header is not at a fixed position: cover pages, account summaries and
//! page banners push it around, and narrow layouts wrap "Crédito"/"Débito"
//! onto a second line. Each row is therefore tried alone and together with
//! the row below it.

use integra_core::Token;

use crate::normalize::normalize_upper;
use crate::rows::Row;

/// Where the header was found on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderMatch {
    /// Tokens of the header row, or of both rows for a wrapped header
    pub tokens: Vec<Token>,
    /// Smallest `top` among the header tokens
    pub anchor_y: f64,
    pub first_row: usize,
    /// Same as `first_row` for a single-line header
    pub last_row: usize,
}

/// True when `text` names every column the columnar layout needs.
pub fn has_header_keywords(text: &str) -> bool {
    let upper = normalize_upper(text);
    upper.contains("DATA")
        && upper.contains("LANC")
        && upper.contains("DCT")
        && upper.contains("SALDO")
        && (upper.contains("CRED") || upper.contains("DEB"))
}

/// Find the first row (or pair of adjacent rows) carrying the header keywords.
pub fn locate_header(rows: &[Row]) -> Option<HeaderMatch> {
    for (i, row) in rows.iter().enumerate() {
        let text = row.text();
        if has_header_keywords(&text) {
            return Some(header_match(&[row], i, i));
        }

        if let Some(next) = rows.get(i + 1) {
            let combined = format!("{} {}", text, next.text());
            if has_header_keywords(&combined) {
                return Some(header_match(&[row, next], i, i + 1));
            }
        }
    }
    None
}

fn header_match(rows: &[&Row], first_row: usize, last_row: usize) -> HeaderMatch {
    let tokens: Vec<Token> = rows
        .iter()
        .flat_map(|r| r.tokens().iter().cloned())
        .collect();
    let anchor_y = tokens.iter().map(|t| t.top).fold(f64::INFINITY, f64::min);
    HeaderMatch {
        tokens,
        anchor_y,
        first_row,
        last_row,
    }
}
