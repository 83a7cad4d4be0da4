//! Split parsed transactions into already-mapped entries and descriptions
//! still waiting for an account rule.

use integra_core::{AccountCode, Mapping, Transaction};
use serde::Serialize;

use crate::rules::RuleStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappedEntry {
    pub seq: usize,
    pub date: String,
    pub description: String,
    pub account: AccountCode,
    pub value: f64,
}

/// A description with no rule yet, listed once however often it occurs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingEntry {
    pub description: String,
    pub example_value: f64,
    pub occurrences: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Review {
    pub mapped: Vec<MappedEntry>,
    pub pending: Vec<PendingEntry>,
}

impl Review {
    /// True when every transaction can be exported.
    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }
}

pub fn review(txns: &[Transaction], rules: &dyn RuleStore) -> Review {
    let mut out = Review::default();

    for txn in txns {
        match rules.lookup(&txn.description_raw) {
            Mapping::Mapped(account) => out.mapped.push(MappedEntry {
                seq: txn.seq,
                date: txn.date.clone(),
                description: txn.description_raw.clone(),
                account,
                value: txn.value,
            }),
            Mapping::Unmapped => {
                match out
                    .pending
                    .iter_mut()
                    .find(|p| p.description == txn.description_raw)
                {
                    Some(p) => p.occurrences += 1,
                    None => out.pending.push(PendingEntry {
                        description: txn.description_raw.clone(),
                        example_value: txn.value,
                        occurrences: 1,
                    }),
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::MemoryRuleStore;

    fn txn(seq: usize, description: &str, value: f64) -> Transaction {
        Transaction {
            seq,
            date: "02/01/2024".to_string(),
            description_raw: description.to_string(),
            description_final: description.to_string(),
            doc_ref: String::new(),
            value,
        }
    }

    #[test]
    fn test_partitions_and_dedupes_pending() {
        let mut rules = MemoryRuleStore::new();
        rules.upsert("TARIFA BANCARIA", AccountCode::new("410").unwrap());

        let txns = vec![
            txn(1, "PIX RECEBIDO", 100.0),
            txn(2, "TARIFA BANCARIA", -12.5),
            txn(3, "PIX RECEBIDO", 30.0),
            txn(4, "PAGTO BOLETO", -300.0),
        ];
        let r = review(&txns, &rules);

        assert_eq!(r.mapped.len(), 1);
        assert_eq!(r.mapped[0].seq, 2);
        assert_eq!(r.mapped[0].account.as_str(), "410");
        assert_eq!(r.pending.len(), 2);
        assert_eq!(r.pending[0].description, "PIX RECEBIDO");
        assert_eq!(r.pending[0].example_value, 100.0);
        assert_eq!(r.pending[0].occurrences, 2);
        assert_eq!(r.pending[1].description, "PAGTO BOLETO");
        assert!(!r.is_complete());
    }

    #[test]
    fn test_empty_input_is_complete() {
        assert!(review(&[], &MemoryRuleStore::new()).is_complete());
    }
}
