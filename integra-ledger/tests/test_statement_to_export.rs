use integra_core::{AccountCode, Dialect, Token};
use integra_ingest::{EngineOptions, extract, parser_for};
use integra_ledger::{
    ClientRegistry, CsvRuleStore, LedgerError, NewClient, RuleStore, export_file_name,
    export_lines, render, review,
};

fn code(s: &str) -> AccountCode {
    AccountCode::new(s).unwrap()
}

fn line(top: f64, cells: &[(f64, &str)]) -> Vec<Token> {
    cells
        .iter()
        .flat_map(|(x, text)| {
            text.split(' ')
                .enumerate()
                .map(move |(i, w)| Token::new(w, x + i as f64 * 20.0, top))
        })
        .collect()
}

fn bradesco_page() -> Vec<Token> {
    let mut page = line(
        50.0,
        &[
            (20.0, "Data"),
            (100.0, "Lançamento"),
            (300.0, "Dcto."),
            (360.0, "Crédito"),
            (430.0, "Débito"),
            (500.0, "Saldo"),
        ],
    );
    page.extend(line(70.0, &[(20.0, "05/02/2024"), (100.0, "SALDO ANTERIOR"), (500.0, "1.000,00")]));
    page.extend(line(85.0, &[(100.0, "LIQUIDACAO DE COBRANCA"), (300.0, "6009084")]));
    page.extend(line(97.0, &[(300.0, "6009084"), (360.0, "36,00"), (500.0, "1.036,00")]));
    page.extend(line(112.0, &[(100.0, "TARIFA BANCARIA"), (430.0, "12,50"), (500.0, "1.023,50")]));
    page
}

/// Parse, review, map the pending descriptions, export.
#[test]
fn test_statement_to_export_file() {
    let dir = tempfile::tempdir().unwrap();

    let mut registry = ClientRegistry::load(dir.path().join("clients.json")).unwrap();
    let client = registry
        .add(NewClient {
            name: "ACME Comercio".to_string(),
            cnpj: None,
            system_code: "321".to_string(),
            bank_account: code("10"),
            dialect: Dialect::Columnar,
        })
        .unwrap()
        .clone();
    registry.save().unwrap();

    let parser = parser_for(client.dialect, &EngineOptions::default());
    let txns = extract(parser.as_ref(), &[bradesco_page()]).unwrap();
    assert_eq!(txns.len(), 2);

    let rules_path = dir.path().join("rules").join(format!("{}.csv", client.id));
    let mut rules = CsvRuleStore::open(&rules_path).unwrap();

    let before = review(&txns, &rules);
    assert_eq!(before.pending.len(), 2);
    assert!(matches!(
        export_lines(&txns, &rules, &client.bank_account),
        Err(LedgerError::Unmapped { count: 2, .. })
    ));

    rules.upsert("LIQUIDACAO DE COBRANCA", code("1120"));
    rules.upsert("TARIFA BANCARIA", code("410"));
    rules.save().unwrap();

    let rules = CsvRuleStore::open(&rules_path).unwrap();
    assert!(review(&txns, &rules).is_complete());

    let lines = export_lines(&txns, &rules, &client.bank_account).unwrap();
    assert_eq!(
        render(&lines),
        "05022024|10|1120|36,00|LIQUIDACAO DE COBRANCA Dcto:6009084\n\
         05022024|410|10|12,50|TARIFA BANCARIA"
    );
    assert_eq!(export_file_name(&client), "dominio_321.txt");
}
