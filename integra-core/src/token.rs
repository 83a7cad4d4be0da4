//! Positioned text tokens, as handed over by the PDF/text extraction step.

use serde::{Deserialize, Serialize};

/// A single word with page-relative coordinates.
///
/// `left` is the leading edge of the word, `top` its row position. Units are
/// whatever the extractor uses, as long as they are consistent within a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub left: f64,
    pub top: f64,
}

impl Token {
    pub fn new(text: impl Into<String>, left: f64, top: f64) -> Self {
        Self {
            text: text.into(),
            left,
            top,
        }
    }
}

/// All tokens of one page, in extraction order.
pub type Page = Vec<Token>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_deserializes_from_extractor_json() {
        let json = r#"[{"text": "SALDO", "left": 512.3, "top": 88.0}]"#;
        let page: Page = serde_json::from_str(json).unwrap();
        assert_eq!(page, vec![Token::new("SALDO", 512.3, 88.0)]);
    }
}
