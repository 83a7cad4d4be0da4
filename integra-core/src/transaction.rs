//! Finalized statement transactions (the engine's output unit)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A reconstructed statement entry.
///
/// Immutable once emitted: the description is never empty or noise and the
/// value is always resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// 1-based position in the document output
    pub seq: usize,
    /// DD/MM/YYYY as printed; empty when no date preceded the entry
    pub date: String,
    /// Historic base: the merged, normalized description text
    pub description_raw: String,
    /// Description with the document reference appended (`... Dcto:123`)
    pub description_final: String,
    pub doc_ref: String,
    /// Positive = credit, negative = debit
    pub value: f64,
}

impl Transaction {
    /// Parse the printed DD/MM/YYYY date.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%d/%m/%Y").ok()
    }

    pub fn is_credit(&self) -> bool {
        self.value >= 0.0
    }

    pub fn is_debit(&self) -> bool {
        self.value < 0.0
    }
}
