//! Column boundaries inferred from header word positions.

use integra_core::Token;

use crate::normalize::{normalize, normalize_upper};
use crate::rows::Row;
use crate::types::{AssignedRow, ColumnName, ColumnSpec};

/// Column anchors of one page, sorted left to right, with the midpoints
/// between adjacent anchors used as bucket limits.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    specs: Vec<ColumnSpec>,
    boundaries: Vec<f64>,
}

/// Leftmost header token containing each column keyword.
///
/// Returns `None` when a mandatory column is missing or neither Credit nor
/// Debit is present.
pub fn anchors(header_tokens: &[Token]) -> Option<Vec<ColumnSpec>> {
    let mut sorted: Vec<&Token> = header_tokens.iter().collect();
    sorted.sort_by(|a, b| a.left.total_cmp(&b.left));
    let upper: Vec<(String, f64)> = sorted
        .iter()
        .map(|t| (normalize_upper(&t.text), t.left))
        .collect();

    let mut specs = Vec::new();
    for name in ColumnName::ALL {
        let found = upper
            .iter()
            .find(|(text, _)| text.contains(name.keyword()))
            .map(|(_, left)| *left);
        match found {
            Some(anchor_x) => specs.push(ColumnSpec { name, anchor_x }),
            None if name.is_mandatory() => return None,
            None => {}
        }
    }

    let has_value_column = specs
        .iter()
        .any(|s| matches!(s.name, ColumnName::Credit | ColumnName::Debit));
    has_value_column.then_some(specs)
}

/// Midpoints between adjacent anchors, after sorting specs by `anchor_x`.
pub fn boundaries(specs: &mut [ColumnSpec]) -> Vec<f64> {
    specs.sort_by(|a, b| a.anchor_x.total_cmp(&b.anchor_x));
    specs
        .windows(2)
        .map(|w| (w[0].anchor_x + w[1].anchor_x) / 2.0)
        .collect()
}

impl ColumnLayout {
    pub fn from_header(header_tokens: &[Token]) -> Option<Self> {
        let mut specs = anchors(header_tokens)?;
        let boundaries = boundaries(&mut specs);
        Some(Self { specs, boundaries })
    }

    pub fn specs(&self) -> &[ColumnSpec] {
        &self.specs
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    pub fn has_column(&self, name: ColumnName) -> bool {
        self.specs.iter().any(|s| s.name == name)
    }

    /// Index of the column a token starting at `left` falls into.
    pub fn column_index(&self, left: f64) -> usize {
        self.boundaries
            .iter()
            .position(|b| left <= *b)
            .unwrap_or(self.boundaries.len())
    }

    /// Bucket a row's tokens into columns and join each bucket.
    pub fn assign(&self, row: &Row) -> AssignedRow {
        let mut buckets: Vec<Vec<&str>> = vec![Vec::new(); self.specs.len()];
        for token in row.tokens() {
            buckets[self.column_index(token.left)].push(&token.text);
        }

        let cells = self
            .specs
            .iter()
            .zip(buckets)
            .map(|(spec, words)| (spec.name, normalize(&words.join(" "))))
            .collect();
        AssignedRow::from_cells(cells)
    }
}
