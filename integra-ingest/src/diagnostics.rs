//! Page inspection for layout troubleshooting.

use integra_core::Token;

use crate::columns::ColumnLayout;
use crate::header::{HeaderMatch, locate_header};
use crate::rows::cluster;

#[derive(Debug, Clone, PartialEq)]
pub struct RowSummary {
    pub top: f64,
    pub text: String,
}

/// What the columnar dialect sees on one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageReport {
    pub token_count: usize,
    pub rows: Vec<RowSummary>,
    pub header: Option<HeaderMatch>,
    pub layout: Option<ColumnLayout>,
}

impl PageReport {
    /// No tokens usually means an image-only page.
    pub fn is_blank(&self) -> bool {
        self.token_count == 0
    }
}

pub fn inspect_page(page: &[Token], y_tolerance: f64) -> PageReport {
    let rows = cluster(page, y_tolerance);
    let header = locate_header(&rows);
    let layout = header
        .as_ref()
        .and_then(|h| ColumnLayout::from_header(&h.tokens));
    PageReport {
        token_count: page.len(),
        rows: rows
            .iter()
            .map(|r| RowSummary {
                top: r.anchor_top(),
                text: r.text(),
            })
            .collect(),
        header,
        layout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::DEFAULT_Y_TOLERANCE;

    #[test]
    fn test_blank_page() {
        let report = inspect_page(&[], DEFAULT_Y_TOLERANCE);
        assert!(report.is_blank());
        assert!(report.rows.is_empty());
        assert_eq!(report.header, None);
    }

    #[test]
    fn test_reports_header_and_layout() {
        let page: Vec<Token> = ["Data", "Lancamento", "Dcto", "Credito", "Saldo"]
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(*w, i as f64 * 100.0, 50.0))
            .collect();
        let report = inspect_page(&page, DEFAULT_Y_TOLERANCE);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].top, 50.0);
        assert!(report.header.is_some());
        assert_eq!(report.layout.unwrap().specs().len(), 5);
    }
}
