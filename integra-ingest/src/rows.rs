//! Grouping a page's tokens into visual rows by vertical proximity.

use integra_core::Token;

use crate::normalize::normalize;

/// Vertical distance (in page units) under which tokens share a row.
pub const DEFAULT_Y_TOLERANCE: f64 = 4.5;

/// Tokens visually aligned on one line, sorted left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    tokens: Vec<Token>,
}

impl Row {
    /// Build a row from arbitrary tokens; they are re-sorted by `left`.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        tokens.sort_by(|a, b| a.left.total_cmp(&b.left));
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Smallest `top` among the row's tokens.
    pub fn anchor_top(&self) -> f64 {
        self.tokens
            .iter()
            .map(|t| t.top)
            .fold(f64::INFINITY, f64::min)
    }

    /// Normalized token texts joined with single spaces.
    pub fn text(&self) -> String {
        join_normalized(&self.tokens)
    }
}

pub(crate) fn join_normalized(tokens: &[Token]) -> String {
    let parts: Vec<String> = tokens
        .iter()
        .map(|t| normalize(&t.text))
        .filter(|s| !s.is_empty())
        .collect();
    parts.join(" ")
}

/// Cluster tokens into rows, top to bottom.
///
/// Tokens are walked in `(top, left)` order; a new row starts whenever a
/// token's `top` is more than `y_tolerance` away from the first token of the
/// current row.
pub fn cluster(tokens: &[Token], y_tolerance: f64) -> Vec<Row> {
    let mut sorted: Vec<&Token> = tokens.iter().collect();
    sorted.sort_by(|a, b| a.top.total_cmp(&b.top).then(a.left.total_cmp(&b.left)));

    let mut rows = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    let mut anchor = 0.0;

    for token in sorted {
        if current.is_empty() {
            anchor = token.top;
        } else if (token.top - anchor).abs() > y_tolerance {
            rows.push(Row::new(std::mem::take(&mut current)));
            anchor = token.top;
        }
        current.push(token.clone());
    }
    if !current.is_empty() {
        rows.push(Row::new(current));
    }

    rows
}
