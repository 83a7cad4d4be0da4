//! Pipe-delimited import file for the accounting system.
//!
//! One line per transaction:
//!   DDMMYYYY|DEBIT_ACCOUNT|CREDIT_ACCOUNT|VALUE|DESCRIPTION
//!   05022024|410|10|12,50|TARIFA BANCARIA
//!
//! Debits post against the mapped account, credits against the bank.

use integra_core::{AccountCode, ClientProfile, Mapping, Transaction};

use crate::error::{LedgerError, Result};
use crate::rules::RuleStore;

fn export_date(txn: &Transaction) -> String {
    match txn.parsed_date() {
        Some(d) => d.format("%d%m%Y").to_string(),
        None => txn.date.replace('/', ""),
    }
}

/// Absolute value with two decimals and a comma separator ("1250,00").
pub fn format_value(value: f64) -> String {
    format!("{:.2}", value.abs()).replace('.', ",")
}

pub fn export_line(txn: &Transaction, mapped: &AccountCode, bank: &AccountCode) -> String {
    let (debit, credit) = if txn.value < 0.0 {
        (mapped, bank)
    } else {
        (bank, mapped)
    };
    format!(
        "{}|{}|{}|{}|{}",
        export_date(txn),
        debit,
        credit,
        format_value(txn.value),
        txn.description_final
    )
}

/// Build every export line, or refuse when any transaction is unmapped.
pub fn export_lines(
    txns: &[Transaction],
    rules: &dyn RuleStore,
    bank_account: &AccountCode,
) -> Result<Vec<String>> {
    let mut lines = Vec::with_capacity(txns.len());
    let mut unmapped: Vec<String> = Vec::new();
    let mut count = 0;

    for txn in txns {
        match rules.lookup(&txn.description_raw) {
            Mapping::Mapped(account) => lines.push(export_line(txn, &account, bank_account)),
            Mapping::Unmapped => {
                count += 1;
                if !unmapped.contains(&txn.description_raw) {
                    unmapped.push(txn.description_raw.clone());
                }
            }
        }
    }

    if count > 0 {
        return Err(LedgerError::Unmapped {
            count,
            descriptions: unmapped,
        });
    }
    Ok(lines)
}

/// Lines joined into the file body.
pub fn render(lines: &[String]) -> String {
    lines.join("\n")
}

pub fn export_file_name(client: &ClientProfile) -> String {
    format!("dominio_{}.txt", client.system_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::MemoryRuleStore;

    fn code(s: &str) -> AccountCode {
        AccountCode::new(s).unwrap()
    }

    fn txn(description: &str, value: f64) -> Transaction {
        Transaction {
            seq: 1,
            date: "05/02/2024".to_string(),
            description_raw: description.to_string(),
            description_final: format!("{description} Dcto:77"),
            doc_ref: "77".to_string(),
            value,
        }
    }

    #[test]
    fn test_debit_puts_mapped_account_first() {
        let line = export_line(&txn("TARIFA", -1250.0), &code("410"), &code("10"));
        assert_eq!(line, "05022024|410|10|1250,00|TARIFA Dcto:77");
    }

    #[test]
    fn test_credit_puts_bank_first() {
        let line = export_line(&txn("PIX", 36.0), &code("1052"), &code("10"));
        assert_eq!(line, "05022024|10|1052|36,00|PIX Dcto:77");
    }

    #[test]
    fn test_format_value_rounds_to_cents() {
        assert_eq!(format_value(-0.5), "0,50");
        assert_eq!(format_value(1234567.891), "1234567,89");
    }

    #[test]
    fn test_refuses_unmapped() {
        let mut rules = MemoryRuleStore::new();
        rules.upsert("PIX", code("1052"));
        let txns = vec![txn("PIX", 1.0), txn("DOC", -2.0), txn("DOC", -3.0)];

        match export_lines(&txns, &rules, &code("10")) {
            Err(LedgerError::Unmapped { count, descriptions }) => {
                assert_eq!(count, 2);
                assert_eq!(descriptions, vec!["DOC".to_string()]);
            }
            other => panic!("expected Unmapped, got {other:?}"),
        }

        rules.upsert("DOC", code("300"));
        let lines = export_lines(&txns, &rules, &code("10")).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(render(&lines).lines().count(), 3);
    }
}
