//! integra-ledger: client registry, historic→account rules, review and export

pub mod clients;
pub mod error;
pub mod export;
pub mod review;
pub mod rules;

pub use clients::{ClientRegistry, NewClient};
pub use error::{LedgerError, Result};
pub use export::{export_file_name, export_lines, render};
pub use review::{Review, review};
pub use rules::{CsvRuleStore, MemoryRuleStore, RuleStore};
