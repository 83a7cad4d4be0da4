//! Multi-row transaction assembly.
//!
//! Statement entries wrap: a long description spills onto one or more rows
//! above or below the row carrying the amount, and the document number may
//! sit on any of them. The [`Assembler`] consumes column-assigned rows top to
//! bottom and merges them into one pending entry until the next value-bearing
//! row closes it.
//!
//! ```text
//!            value row                    value row (pending has value)
//!   Idle ───────────────▶ Pending(v) ─────────────────────────▶ flush, Pending(v')
//!    │                     ▲    │ text row: append
//!    │ text row            │    ▼
//!    └───────────▶ Pending(-) ──┘ value row: fold + set value
//! ```

use integra_core::Transaction;

use crate::amount::{is_date, is_noise};
use crate::normalize::normalize;

/// Fields of one data row, as read from its columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowInput {
    pub date: String,
    pub description: String,
    pub doc_ref: String,
    /// Signed value; see [`resolve_value`]
    pub value: Option<f64>,
}

/// An entry still being accumulated across rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingTransaction {
    pub date: Option<String>,
    pub description: String,
    pub doc_ref: Option<String>,
    pub value: Option<f64>,
}

impl PendingTransaction {
    fn start(row: RowInput, date: Option<String>) -> Self {
        Self {
            date,
            description: normalize(&row.description),
            doc_ref: non_empty(row.doc_ref),
            value: row.value,
        }
    }

    fn append_description(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.description = normalize(&format!("{} {}", self.description, text));
    }

    /// Apply the flush rule: `None` when the value is unresolved or the
    /// description is empty or noise.
    pub fn finalize(self, seq: usize) -> Option<Transaction> {
        let value = self.value?;
        let description = normalize(&self.description);
        if is_noise(&description) {
            return None;
        }
        let doc_ref = self.doc_ref.map(|d| normalize(&d)).unwrap_or_default();
        let description_final = if doc_ref.is_empty() {
            description.clone()
        } else {
            format!("{} Dcto:{}", description, doc_ref)
        };

        Some(Transaction {
            seq,
            date: self.date.unwrap_or_default(),
            description_raw: description,
            description_final,
            doc_ref,
            value,
        })
    }
}

fn non_empty(s: String) -> Option<String> {
    let s = normalize(&s);
    (!s.is_empty()).then_some(s)
}

/// Signed value of a row with separate credit and debit cells.
///
/// Credit wins when both cells parse; debit is always negative.
pub fn resolve_value(credit: Option<f64>, debit: Option<f64>) -> Option<f64> {
    match (credit, debit) {
        (Some(c), Some(d)) => {
            log::warn!("row carries both credit {c} and debit {d}; keeping the credit");
            Some(c)
        }
        (Some(c), None) => Some(c),
        (None, Some(d)) => Some(-d.abs()),
        (None, None) => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
enum State {
    #[default]
    Idle,
    Pending(PendingTransaction),
}

/// Row-by-row state machine producing finalized transactions.
///
/// One assembler spans a whole document: the current date and an open entry
/// carry over page breaks until [`Assembler::finish_page`] is called.
#[derive(Debug, Default)]
pub struct Assembler {
    state: State,
    current_date: Option<String>,
    out: Vec<Transaction>,
    discarded: usize,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently seen date; rows without their own date inherit it.
    pub fn current_date(&self) -> Option<&str> {
        self.current_date.as_deref()
    }

    pub fn pending(&self) -> Option<&PendingTransaction> {
        match &self.state {
            State::Idle => None,
            State::Pending(p) => Some(p),
        }
    }

    pub fn emitted(&self) -> &[Transaction] {
        &self.out
    }

    /// Entries dropped by the flush rule so far.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    pub fn feed(&mut self, row: RowInput) {
        if is_date(&row.date) {
            self.current_date = Some(normalize(&row.date));
        }

        let description = normalize(&row.description);
        if !description.is_empty() && is_noise(&description) {
            log::trace!("skipping noise row '{description}'");
            return;
        }

        match row.value {
            Some(value) => self.feed_value_row(row, value),
            None => self.feed_text_row(row),
        }
    }

    fn feed_value_row(&mut self, row: RowInput, value: f64) {
        if matches!(&self.state, State::Pending(p) if p.value.is_some()) {
            self.flush();
        }

        match &mut self.state {
            State::Pending(p) => {
                if p.date.is_none() {
                    p.date = self.current_date.clone();
                }
                p.append_description(&normalize(&row.description));
                if let Some(doc) = non_empty(row.doc_ref) {
                    p.doc_ref = Some(doc);
                }
                p.value = Some(value);
            }
            State::Idle => {
                let date = self.current_date.clone();
                self.state = State::Pending(PendingTransaction::start(row, date));
            }
        }
    }

    fn feed_text_row(&mut self, row: RowInput) {
        match &mut self.state {
            State::Idle => {
                if !normalize(&row.description).is_empty() {
                    let date = self.current_date.clone();
                    self.state = State::Pending(PendingTransaction::start(row, date));
                }
            }
            State::Pending(p) => {
                p.append_description(&normalize(&row.description));
                if p.doc_ref.is_none() {
                    p.doc_ref = non_empty(row.doc_ref);
                }
            }
        }
    }

    fn flush(&mut self) {
        let State::Pending(pending) = std::mem::take(&mut self.state) else {
            return;
        };
        let seq = self.out.len() + 1;
        let summary = pending.description.clone();
        match pending.finalize(seq) {
            Some(txn) => self.out.push(txn),
            None => {
                self.discarded += 1;
                log::trace!("discarding incomplete or noise entry '{summary}'");
            }
        }
    }

    /// Close the open entry at a page (or document) boundary.
    pub fn finish_page(&mut self) {
        self.flush();
    }

    /// Flush and return every transaction, numbered from 1.
    pub fn finish(mut self) -> Vec<Transaction> {
        self.flush();
        self.out
    }
}
