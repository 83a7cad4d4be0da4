//! Historic → account mapping rules.
//!
//! Rules are keyed by the historic base (`Transaction::description_raw`),
//! normalized, so "Tarifa Bancária" and "TARIFA BANCARIA" share a rule only
//! when their normalized forms match exactly.

use integra_core::{AccountCode, Mapping};
use integra_ingest::normalize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Lookup/upsert contract of the rule store.
pub trait RuleStore {
    fn lookup(&self, description: &str) -> Mapping;

    /// Insert a rule, replacing the account of an existing one.
    fn upsert(&mut self, description: &str, account: AccountCode);

    /// All rules, ordered by description.
    fn entries(&self) -> Vec<(String, AccountCode)>;
}

fn rule_key(description: &str) -> String {
    normalize(description)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryRuleStore {
    rules: BTreeMap<String, AccountCode>,
}

impl MemoryRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl RuleStore for MemoryRuleStore {
    fn lookup(&self, description: &str) -> Mapping {
        self.rules.get(&rule_key(description)).cloned().into()
    }

    fn upsert(&mut self, description: &str, account: AccountCode) {
        let key = rule_key(description);
        if key.is_empty() {
            return;
        }
        self.rules.insert(key, account);
    }

    fn entries(&self) -> Vec<(String, AccountCode)> {
        self.rules
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Only exact matches are evaluated; the column keeps the file format open
/// for other kinds.
#[derive(Debug, Serialize)]
struct RuleRecord {
    description: String,
    account: String,
    match_kind: String,
}

const EXACT: &str = "exact";

impl RuleRecord {
    /// Rows may omit `match_kind`, which then defaults to exact.
    fn from_record(record: &csv::StringRecord) -> Option<Self> {
        let description = record.get(0)?.to_string();
        let account = record.get(1)?.to_string();
        let match_kind = match record.get(2).map(str::trim) {
            Some(kind) if !kind.is_empty() => kind.to_string(),
            _ => EXACT.to_string(),
        };
        Some(Self {
            description,
            account,
            match_kind,
        })
    }
}

/// Rules of one client, stored as CSV (`description,account,match_kind`).
#[derive(Debug, Clone)]
pub struct CsvRuleStore {
    path: PathBuf,
    rules: MemoryRuleStore,
}

impl CsvRuleStore {
    /// Open the store at `path`; a missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut rules = MemoryRuleStore::new();

        if path.exists() {
            let mut rdr = csv::ReaderBuilder::new().flexible(true).from_path(&path)?;
            for row in rdr.records() {
                let row = row?;
                let Some(record) = RuleRecord::from_record(&row) else {
                    log::warn!("skipping short row {:?} in {}", row, path.display());
                    continue;
                };
                if record.match_kind != EXACT {
                    log::warn!(
                        "ignoring '{}' rule for '{}' in {}",
                        record.match_kind,
                        record.description,
                        path.display()
                    );
                    continue;
                }
                rules.upsert(&record.description, AccountCode::new(&record.account)?);
            }
        }

        log::debug!("loaded {} rule(s) from {}", rules.len(), path.display());
        Ok(Self { path, rules })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut wtr = csv::Writer::from_path(&self.path)?;
        for (description, account) in self.rules.entries() {
            wtr.serialize(RuleRecord {
                description,
                account: account.to_string(),
                match_kind: EXACT.to_string(),
            })?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl RuleStore for CsvRuleStore {
    fn lookup(&self, description: &str) -> Mapping {
        self.rules.lookup(description)
    }

    fn upsert(&mut self, description: &str, account: AccountCode) {
        self.rules.upsert(description, account);
    }

    fn entries(&self) -> Vec<(String, AccountCode)> {
        self.rules.entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> AccountCode {
        AccountCode::new(s).unwrap()
    }

    #[test]
    fn test_lookup_is_normalized() {
        let mut store = MemoryRuleStore::new();
        store.upsert("Tarifa  Bancária", code("410"));
        assert_eq!(store.lookup("TARIFA BANCARIA"), Mapping::Unmapped);
        assert_eq!(store.lookup("Tarifa Bancaria"), Mapping::Mapped(code("410")));
    }

    #[test]
    fn test_upsert_replaces_account() {
        let mut store = MemoryRuleStore::new();
        store.upsert("PIX RECEBIDO", code("1"));
        store.upsert("PIX RECEBIDO", code("2"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup("PIX RECEBIDO").account(), Some(&code("2")));
    }

    #[test]
    fn test_blank_description_not_stored() {
        let mut store = MemoryRuleStore::new();
        store.upsert("  ", code("1"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules").join("1.csv");

        let mut store = CsvRuleStore::open(&path).unwrap();
        assert!(store.entries().is_empty());
        store.upsert("TARIFA BANCARIA", code("410"));
        store.upsert("PIX RECEBIDO", code("1052"));
        store.save().unwrap();

        let reopened = CsvRuleStore::open(&path).unwrap();
        assert_eq!(reopened.entries(), store.entries());
        assert_eq!(reopened.lookup("PIX RECEBIDO"), Mapping::Mapped(code("1052")));
    }

    #[test]
    fn test_csv_skips_non_exact_rules() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.csv");
        fs::write(
            &path,
            "description,account,match_kind\nPIX,1,contains\nTARIFA,2,exact\nDOC,3\n",
        )
        .unwrap();

        let store = CsvRuleStore::open(&path).unwrap();
        assert_eq!(store.lookup("PIX"), Mapping::Unmapped);
        assert!(store.lookup("TARIFA").is_mapped());
        assert!(store.lookup("DOC").is_mapped());
    }

    #[test]
    fn test_csv_short_rows_do_not_abort_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.csv");
        fs::write(
            &path,
            "description,account,match_kind\nDOC,3\nLONELY\nCHEQUE,4,\nTARIFA,2,exact\n",
        )
        .unwrap();

        let store = CsvRuleStore::open(&path).unwrap();
        assert_eq!(store.lookup("DOC"), Mapping::Mapped(code("3")));
        assert_eq!(store.lookup("CHEQUE"), Mapping::Mapped(code("4")));
        assert_eq!(store.lookup("LONELY"), Mapping::Unmapped);
        assert_eq!(store.entries().len(), 3);
    }
}
