//! Regex-driven statement parser (Caixa PDF layout)
//!
//! Expected rows after positional extraction:
//!   Data Mov.   Nr. Doc.   Histórico                 Valor           Saldo
//!   14/03/2024  123456     PAGAMENTO FORNECEDOR      1.250,00 D      8.750,00 C
//!
//! No column geometry is used: the date is looked up among the first words of
//! a row and the sign comes from the C/D marker after the amount. Every row
//! stands alone; wrapped descriptions are not merged.

use regex::Regex;
use std::sync::OnceLock;

use integra_core::{Dialect, Page, Transaction};

use crate::amount::{is_date, is_noise, parse_amount};
use crate::assembler::PendingTransaction;
use crate::dialect::StatementParser;
use crate::normalize::normalize;
use crate::rows::{DEFAULT_Y_TOLERANCE, cluster};

/// How many leading words of a row may hold the date.
pub const DEFAULT_DATE_SEARCH_TOKENS: usize = 3;

fn value_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([\d.]+,\d{2})\s+([CD])\b").expect("value regex"))
}

fn amount_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\d.]+,\d{2}").expect("amount word regex"))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionalOptions {
    pub y_tolerance: f64,
    pub date_search_tokens: usize,
}

impl Default for PositionalOptions {
    fn default() -> Self {
        Self {
            y_tolerance: DEFAULT_Y_TOLERANCE,
            date_search_tokens: DEFAULT_DATE_SEARCH_TOKENS,
        }
    }
}

/// A single-row statement entry before numbering.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalRow {
    pub date: String,
    pub description: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PositionalParser {
    options: PositionalOptions,
}

/// Six-digit document numbers printed inline with the description.
fn is_doc_code(word: &str) -> bool {
    word.len() == 6 && word.chars().all(|c| c.is_ascii_digit())
}

impl PositionalParser {
    pub fn new(options: PositionalOptions) -> Self {
        Self { options }
    }

    /// Interpret one visual row given its words in left-to-right order.
    pub fn parse_words<S: AsRef<str>>(&self, words: &[S]) -> Option<PositionalRow> {
        let words: Vec<String> = words
            .iter()
            .map(|w| normalize(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();

        let date = words
            .iter()
            .take(self.options.date_search_tokens)
            .find(|w| is_date(w))?
            .clone();

        let text = words.join(" ");
        let caps = value_re().captures(&text)?;
        let magnitude = parse_amount(&caps[1])?.abs();
        let value = if &caps[2] == "D" { -magnitude } else { magnitude };

        if is_noise(&text) {
            return None;
        }

        let description: Vec<&str> = words
            .iter()
            .map(String::as_str)
            .filter(|w| {
                !is_date(w)
                    && !amount_word_re().is_match(w)
                    && *w != "C"
                    && *w != "D"
                    && !is_doc_code(w)
            })
            .collect();
        let description = normalize(&description.join(" "));
        if is_noise(&description) {
            return None;
        }

        Some(PositionalRow {
            date,
            description,
            value,
        })
    }

    /// Parse plain-text pages (one string per line), the alternative input
    /// shape for this dialect.
    pub fn parse_lines(&self, pages: &[Vec<String>]) -> Vec<Transaction> {
        let rows = pages
            .iter()
            .flatten()
            .filter_map(|line| self.parse_words(&line.split_whitespace().collect::<Vec<_>>()));
        number(rows)
    }
}

fn number(rows: impl Iterator<Item = PositionalRow>) -> Vec<Transaction> {
    let mut out = Vec::new();
    for row in rows {
        let pending = PendingTransaction {
            date: Some(row.date),
            description: row.description,
            doc_ref: None,
            value: Some(row.value),
        };
        if let Some(txn) = pending.finalize(out.len() + 1) {
            out.push(txn);
        }
    }
    out
}

impl StatementParser for PositionalParser {
    fn dialect(&self) -> Dialect {
        Dialect::Positional
    }

    fn parse(&self, pages: &[Page]) -> Vec<Transaction> {
        let mut rows = Vec::new();
        for (i, page) in pages.iter().enumerate() {
            let before = rows.len();
            for row in cluster(page, self.options.y_tolerance) {
                let words: Vec<&str> = row.tokens().iter().map(|t| t.text.as_str()).collect();
                if let Some(parsed) = self.parse_words(&words) {
                    rows.push(parsed);
                }
            }
            log::debug!("page {}: {} candidate row(s)", i + 1, rows.len() - before);
        }
        number(rows.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use integra_core::Token;

    fn words(line: &str) -> Vec<&str> {
        line.split_whitespace().collect()
    }

    #[test]
    fn test_debit_row_with_doc_code() {
        let parser = PositionalParser::default();
        let row = parser
            .parse_words(&words("14/03/2024 PAGAMENTO FORNECEDOR 123456 1.250,00 D"))
            .unwrap();
        assert_eq!(row.date, "14/03/2024");
        assert_eq!(row.value, -1250.0);
        assert_eq!(row.description, "PAGAMENTO FORNECEDOR");
    }

    #[test]
    fn test_credit_row_ignores_balance_column() {
        let parser = PositionalParser::default();
        let row = parser
            .parse_words(&words("15/03/2024 000123 CRED PIX 200,00 C 8.950,00 C"))
            .unwrap();
        assert_eq!(row.value, 200.0);
        assert_eq!(row.description, "CRED PIX");
    }

    #[test]
    fn test_rows_without_date_or_value_dropped() {
        let parser = PositionalParser::default();
        assert_eq!(parser.parse_words(&words("PAGAMENTO 1.250,00 D")), None);
        assert_eq!(parser.parse_words(&words("14/03/2024 PAGAMENTO 1.250,00")), None);
        assert_eq!(parser.parse_words(&words("A B C 14/03/2024 PAGAMENTO 1,00 C")), None);
    }

    #[test]
    fn test_noise_rows_dropped() {
        let parser = PositionalParser::default();
        assert_eq!(parser.parse_words(&words("13/03/2024 SALDO ANTERIOR 9.000,00 C")), None);
        assert_eq!(parser.parse_words(&words("13/03/2024 123456 1,00 C")), None);
    }

    #[test]
    fn test_parse_tokens_and_lines_agree() {
        let parser = PositionalParser::default();
        let page: Page = vec![
            Token::new("1.250,00", 400.0, 100.0),
            Token::new("D", 460.0, 100.0),
            Token::new("14/03/2024", 20.0, 100.0),
            Token::new("PAGAMENTO", 150.0, 100.0),
            Token::new("TARIFA", 150.0, 120.0),
            Token::new("14/03/2024", 20.0, 121.0),
            Token::new("3,50", 400.0, 120.0),
            Token::new("D", 460.0, 120.0),
        ];
        let from_tokens = parser.parse(&[page]);
        let from_lines = parser.parse_lines(&[vec![
            "14/03/2024 PAGAMENTO 1.250,00 D".to_string(),
            "14/03/2024 TARIFA 3,50 D".to_string(),
        ]]);

        assert_eq!(from_tokens.len(), 2);
        assert_eq!(from_tokens, from_lines);
        assert_eq!(from_tokens[1].seq, 2);
        assert_eq!(from_tokens[1].description_final, "TARIFA");
        assert_eq!(from_tokens[1].doc_ref, "");
    }
}
