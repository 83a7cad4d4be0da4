//! pt-BR monetary parsing, date shape and noise classification.

use regex::Regex;
use std::sync::OnceLock;

use crate::normalize::{normalize, normalize_upper};

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("date regex"))
}

/// Descriptions that are statement boilerplate rather than entries.
const BOILERPLATE: &[&str] = &["TOTAL", "VALOR DISPONIVEL", "QUANDO DO REGISTRO"];

/// Balance lines that repeat on every statement page.
const BALANCE_MARKERS: &[&str] = &["SALDO ANTERIOR", "SALDO INICIAL", "SALDO DIA", "TOTAL DISPON"];

/// True for a DD/MM/YYYY token.
pub fn is_date(s: &str) -> bool {
    date_re().is_match(&normalize(s))
}

/// Parse a pt-BR formatted amount ("1.250,00", "R$ 36,00", "-15,30").
///
/// Returns the magnitude unless the text carries its own sign (leading or
/// trailing `-`). `None` when there is no digit or the text does not parse.
pub fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = normalize(s)
        .replace("R$", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let (body, negative) = match cleaned.strip_suffix('-') {
        Some(rest) if !rest.starts_with('-') => (rest.to_string(), true),
        _ => (cleaned, false),
    };
    let value: f64 = body.replace('.', "").replace(',', ".").parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// True when a description is not a real entry (balances, totals,
/// page banners, boilerplate). This is the only noise filter in the engine.
pub fn is_noise(description: &str) -> bool {
    let upper = normalize_upper(description);
    if upper.is_empty() {
        return true;
    }
    if BALANCE_MARKERS.iter().any(|m| upper.contains(m)) {
        return true;
    }
    upper.starts_with("EXTRATO") || BOILERPLATE.contains(&upper.as_str())
}
