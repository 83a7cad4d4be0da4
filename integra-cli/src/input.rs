//! Reading extracted statement documents from disk.

use anyhow::{Context, Result, bail};
use integra_core::{Dialect, Page, Transaction};
use integra_ingest::{EngineOptions, IngestError, PositionalParser, extract, parser_for};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Token JSON as written by the extraction step: either
/// `{"pages": [[token, ...], ...]}` or a bare array of pages.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TokenFile {
    Bare(Vec<Page>),
    Wrapped { pages: Vec<Page> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Tokens(Vec<Page>),
    /// Plain text, one entry per line, pages split on form feed
    Lines(Vec<Vec<String>>),
}

impl Document {
    pub fn page_count(&self) -> usize {
        match self {
            Document::Tokens(pages) => pages.len(),
            Document::Lines(pages) => pages.len(),
        }
    }
}

pub fn parse_token_json(s: &str) -> Result<Vec<Page>> {
    let file: TokenFile = serde_json::from_str(s).context("parse token JSON")?;
    Ok(match file {
        TokenFile::Wrapped { pages } => pages,
        TokenFile::Bare(pages) => pages,
    })
}

pub fn split_text_pages(s: &str) -> Vec<Vec<String>> {
    s.split('\u{c}')
        .map(|page| page.lines().map(str::to_string).collect())
        .collect()
}

/// Load `path` as token JSON, or as plain text when `text` is set.
pub fn load_document(path: &Path, text: bool) -> Result<Document> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    if text {
        return Ok(Document::Lines(split_text_pages(&s)));
    }
    let pages = parse_token_json(&s).with_context(|| format!("load {}", path.display()))?;
    Ok(Document::Tokens(pages))
}

pub fn parse_document(
    doc: &Document,
    dialect: Dialect,
    options: &EngineOptions,
) -> Result<Vec<Transaction>> {
    let result = match (doc, dialect) {
        (Document::Tokens(pages), _) => extract(parser_for(dialect, options).as_ref(), pages),
        (Document::Lines(pages), Dialect::Positional) => {
            let txns = PositionalParser::new(options.positional()).parse_lines(pages);
            if txns.is_empty() {
                Err(IngestError::NoTransactions {
                    dialect,
                    pages: pages.len(),
                })
            } else {
                Ok(txns)
            }
        }
        (Document::Lines(_), Dialect::Columnar) => {
            bail!("plain-text input needs word positions for the columnar layout; pass token JSON")
        }
    };

    result.map_err(|e| {
        let hint = format!(
            "check that the document is a text PDF for this bank, or try --dialect {}",
            dialect.other()
        );
        anyhow::Error::new(e).context(hint)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_json_shapes() {
        let wrapped = r#"{"pages": [[{"text": "A", "left": 1.0, "top": 2.0}], []]}"#;
        let bare = r#"[[{"text": "A", "left": 1.0, "top": 2.0}], []]"#;
        assert_eq!(parse_token_json(wrapped).unwrap(), parse_token_json(bare).unwrap());
        assert_eq!(parse_token_json(bare).unwrap().len(), 2);
        assert!(parse_token_json("{}").is_err());
    }

    #[test]
    fn test_text_pages_split_on_form_feed() {
        let pages = split_text_pages("capa\n\u{c}14/03/2024 PIX 1,00 C\nrodape");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1], vec!["14/03/2024 PIX 1,00 C", "rodape"]);
    }

    #[test]
    fn test_lines_need_positional_dialect() {
        let doc = Document::Lines(vec![vec!["14/03/2024 PIX 1,00 C".to_string()]]);
        let opts = EngineOptions::default();
        assert_eq!(parse_document(&doc, Dialect::Positional, &opts).unwrap().len(), 1);
        assert!(parse_document(&doc, Dialect::Columnar, &opts).is_err());
    }

    #[test]
    fn test_empty_result_suggests_other_dialect() {
        let doc = Document::Tokens(vec![Vec::new()]);
        let err = parse_document(&doc, Dialect::Columnar, &EngineOptions::default()).unwrap_err();
        assert!(err.to_string().contains("--dialect positional"));
        assert!(err.downcast_ref::<IngestError>().is_some());
    }
}
