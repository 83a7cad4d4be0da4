//! Errors surfaced by the ingestion engine.
//!
//! Row- and page-level problems never become errors: malformed amounts
//! resolve to "no value" and pages without a header are skipped. The only
//! outcome reported to the caller is a document that yields nothing at all.

use integra_core::Dialect;

pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IngestError {
    /// Likely a layout mismatch or an image-only document
    #[error("no transactions found in {pages} page(s) using the {dialect} layout")]
    NoTransactions { dialect: Dialect, pages: usize },
}
