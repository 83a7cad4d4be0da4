//! Header-driven statement parser (Bradesco PDF layout)
//!
//! Expected page shape after positional extraction:
//!   Data        Lançamento                 Dcto.     Crédito (R$)  Débito (R$)   Saldo (R$)
//!   02/01/2024  SALDO ANTERIOR                                                   9.000,00
//!               LIQUIDACAO DE COBRANCA     6009084
//!                                          6009084   36,00                       9.036,00
//!
//! Column widths change from page to page, so boundaries are re-derived from
//! the header of every page. Pages without a header are skipped.

use integra_core::{Dialect, Page, Token, Transaction};

use crate::amount::parse_amount;
use crate::assembler::{Assembler, RowInput, resolve_value};
use crate::columns::ColumnLayout;
use crate::dialect::StatementParser;
use crate::header::locate_header;
use crate::rows::{DEFAULT_Y_TOLERANCE, Row, cluster};
use crate::types::{AssignedRow, ColumnName};

/// Gap below the header's top edge inside which rows still count as header.
pub const DEFAULT_HEADER_GAP: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnarOptions {
    pub y_tolerance: f64,
    pub header_gap: f64,
}

impl Default for ColumnarOptions {
    fn default() -> Self {
        Self {
            y_tolerance: DEFAULT_Y_TOLERANCE,
            header_gap: DEFAULT_HEADER_GAP,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColumnarParser {
    options: ColumnarOptions,
}

impl ColumnarParser {
    pub fn new(options: ColumnarOptions) -> Self {
        Self { options }
    }

    /// Feed one page into `asm`. Returns false when the page has no usable
    /// header (cover or summary pages).
    pub fn parse_page(&self, page: &[Token], asm: &mut Assembler) -> bool {
        let rows = cluster(page, self.options.y_tolerance);
        let Some(header) = locate_header(&rows) else {
            return false;
        };
        let Some(layout) = ColumnLayout::from_header(&header.tokens) else {
            log::debug!("header at y={} lacks a mandatory column", header.anchor_y);
            return false;
        };

        let data_top = header.anchor_y + self.options.header_gap;
        for row in rows[header.last_row + 1..]
            .iter()
            .filter(|r| r.anchor_top() > data_top)
        {
            asm.feed(row_input(&layout, row));
        }
        asm.finish_page();
        true
    }
}

fn row_input(layout: &ColumnLayout, row: &Row) -> RowInput {
    let cells: AssignedRow = layout.assign(row);
    let credit = parse_amount(cells.get(ColumnName::Credit));
    let debit = parse_amount(cells.get(ColumnName::Debit));
    RowInput {
        date: cells.get(ColumnName::Date).to_string(),
        description: cells.get(ColumnName::Description).to_string(),
        doc_ref: cells.get(ColumnName::DocRef).to_string(),
        value: resolve_value(credit, debit),
    }
}

impl StatementParser for ColumnarParser {
    fn dialect(&self) -> Dialect {
        Dialect::Columnar
    }

    fn parse(&self, pages: &[Page]) -> Vec<Transaction> {
        let mut asm = Assembler::new();
        for (i, page) in pages.iter().enumerate() {
            let before = asm.emitted().len();
            if self.parse_page(page, &mut asm) {
                log::debug!(
                    "page {}: {} transaction(s)",
                    i + 1,
                    asm.emitted().len() - before
                );
            } else {
                log::debug!("page {}: header not found, skipping", i + 1);
            }
        }
        asm.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X_DATE: f64 = 20.0;
    const X_DESC: f64 = 100.0;
    const X_DOC: f64 = 300.0;
    const X_CRED: f64 = 360.0;
    const X_DEB: f64 = 430.0;
    const X_SALDO: f64 = 500.0;

    fn header(top: f64) -> Vec<Token> {
        vec![
            Token::new("Data", X_DATE, top),
            Token::new("Lançamento", X_DESC, top),
            Token::new("Dcto.", X_DOC, top),
            Token::new("Crédito", X_CRED, top),
            Token::new("Débito", X_DEB, top),
            Token::new("Saldo", X_SALDO, top),
        ]
    }

    fn cells(top: f64, cells: &[(f64, &str)]) -> Vec<Token> {
        cells
            .iter()
            .flat_map(|(x, text)| {
                text.split(' ')
                    .enumerate()
                    .map(move |(i, w)| Token::new(w, x + i as f64 * 25.0, top))
            })
            .collect()
    }

    #[test]
    fn test_credit_and_debit_signs() {
        let mut page = header(80.0);
        page.extend(cells(100.0, &[(X_DATE, "02/01/2024"), (X_DESC, "DEPOSITO"), (X_CRED, "150,00")]));
        page.extend(cells(115.0, &[(X_DESC, "TARIFA"), (X_DEB, "150,00")]));

        let txns = ColumnarParser::default().parse(&[page]);
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].value, 150.0);
        assert_eq!(txns[1].value, -150.0);
        assert_eq!(txns[1].date, "02/01/2024");
    }

    #[test]
    fn test_continuation_in_debit_column() {
        let mut page = header(80.0);
        page.extend(cells(100.0, &[(X_DESC, "LIQUIDACAO DE COBRANCA"), (X_DOC, "6009084")]));
        page.extend(cells(112.0, &[(X_DOC, "6009084"), (X_DEB, "36,00"), (X_SALDO, "964,00")]));

        let txns = ColumnarParser::default().parse(&[page]);
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].description_final, "LIQUIDACAO DE COBRANCA Dcto:6009084");
        assert_eq!(txns[0].value, -36.0);
    }

    #[test]
    fn test_balance_only_rows_are_dropped() {
        let mut page = header(80.0);
        page.extend(cells(100.0, &[(X_DATE, "01/02/2024"), (X_DESC, "SALDO ANTERIOR"), (X_SALDO, "9.000,00")]));
        page.extend(cells(115.0, &[(X_DESC, "PIX RECEBIDO"), (X_CRED, "10,00"), (X_SALDO, "9.010,00")]));

        let txns = ColumnarParser::default().parse(&[page]);
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].description_raw, "PIX RECEBIDO");
        assert_eq!(txns[0].date, "01/02/2024");
    }

    #[test]
    fn test_rows_above_header_ignored() {
        let mut page = cells(20.0, &[(X_DESC, "AGENCIA 1234 CONTA 5678"), (X_CRED, "1,00")]);
        page.extend(header(80.0));
        page.extend(cells(100.0, &[(X_DESC, "TARIFA"), (X_DEB, "5,00")]));

        let txns = ColumnarParser::default().parse(&[page]);
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].value, -5.0);
    }

    #[test]
    fn test_page_without_header_reports_skip() {
        let page = cells(100.0, &[(X_DESC, "CAPA DO EXTRATO")]);
        let mut asm = Assembler::new();
        assert!(!ColumnarParser::default().parse_page(&page, &mut asm));
        assert!(asm.finish().is_empty());
    }
}
