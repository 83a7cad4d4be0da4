//! Dialect selection and the common parser contract.

use integra_core::{Dialect, Page, Transaction};

use crate::error::{IngestError, Result};
use crate::parsers::columnar::DEFAULT_HEADER_GAP;
use crate::parsers::positional::DEFAULT_DATE_SEARCH_TOKENS;
use crate::parsers::{ColumnarOptions, ColumnarParser, PositionalOptions, PositionalParser};
use crate::rows::DEFAULT_Y_TOLERANCE;

/// Turns a document's pages into numbered transactions.
///
/// Implementations are pure: the same pages always give the same output, and
/// one parser value can serve many documents concurrently.
pub trait StatementParser: Send + Sync {
    fn dialect(&self) -> Dialect;

    fn parse(&self, pages: &[Page]) -> Vec<Transaction>;
}

/// Tunables shared by both dialects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOptions {
    pub y_tolerance: f64,
    pub header_gap: f64,
    pub date_search_tokens: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            y_tolerance: DEFAULT_Y_TOLERANCE,
            header_gap: DEFAULT_HEADER_GAP,
            date_search_tokens: DEFAULT_DATE_SEARCH_TOKENS,
        }
    }
}

impl EngineOptions {
    pub fn columnar(&self) -> ColumnarOptions {
        ColumnarOptions {
            y_tolerance: self.y_tolerance,
            header_gap: self.header_gap,
        }
    }

    pub fn positional(&self) -> PositionalOptions {
        PositionalOptions {
            y_tolerance: self.y_tolerance,
            date_search_tokens: self.date_search_tokens,
        }
    }
}

pub fn parser_for(dialect: Dialect, options: &EngineOptions) -> Box<dyn StatementParser> {
    match dialect {
        Dialect::Columnar => Box::new(ColumnarParser::new(options.columnar())),
        Dialect::Positional => Box::new(PositionalParser::new(options.positional())),
    }
}

/// Run `parser` over `pages`, reporting an empty result as an error.
pub fn extract(parser: &dyn StatementParser, pages: &[Page]) -> Result<Vec<Transaction>> {
    let txns = parser.parse(pages);
    if txns.is_empty() {
        return Err(IngestError::NoTransactions {
            dialect: parser.dialect(),
            pages: pages.len(),
        });
    }
    log::info!(
        "{} transaction(s) from {} page(s) ({})",
        txns.len(),
        pages.len(),
        parser.dialect()
    );
    Ok(txns)
}
