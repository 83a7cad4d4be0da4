//! Token text canonicalization.
//!
//! Statement PDFs mix accented and unaccented spellings of the same words
//! ("LANÇAMENTO" / "LANCAMENTO", "Crédito" / "Credito") and pad cells with
//! non-breaking spaces. Every comparison in the engine goes through
//! [`normalize`] first.

use unicode_normalization::UnicodeNormalization;

/// Canonicalize raw token text: NBSP to space, accents stripped, whitespace
/// runs collapsed, trimmed. Characters with no ASCII base form are dropped.
pub fn normalize(raw: &str) -> String {
    let folded: String = raw
        .replace('\u{a0}', " ")
        .nfkd()
        .filter(char::is_ascii)
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// [`normalize`], uppercased. Used for keyword matching.
pub fn normalize_upper(raw: &str) -> String {
    normalize(raw).to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_accents() {
        assert_eq!(normalize("Lançamento Crédito Débito"), "Lancamento Credito Debito");
        assert_eq!(normalize_upper("Histórico"), "HISTORICO");
    }

    #[test]
    fn test_collapses_whitespace_and_nbsp() {
        assert_eq!(normalize("\u{a0} PIX\u{a0}\u{a0}RECEBIDO \t  OUTRA\n"), "PIX RECEBIDO OUTRA");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \u{a0} "), "");
    }

    #[test]
    fn test_keeps_amount_punctuation() {
        assert_eq!(normalize("R$ 1.250,00"), "R$ 1.250,00");
    }
}
