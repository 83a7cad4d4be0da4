use std::fmt;

/// Logical columns of a header-driven statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnName {
    Date,
    Description,
    DocRef,
    Credit,
    Debit,
    Balance,
}

impl ColumnName {
    pub const ALL: [ColumnName; 6] = [
        ColumnName::Date,
        ColumnName::Description,
        ColumnName::DocRef,
        ColumnName::Credit,
        ColumnName::Debit,
        ColumnName::Balance,
    ];

    /// Substring identifying the column in the normalized, uppercased header.
    pub fn keyword(&self) -> &'static str {
        match self {
            ColumnName::Date => "DATA",
            ColumnName::Description => "LANC",
            ColumnName::DocRef => "DCT",
            ColumnName::Credit => "CRED",
            ColumnName::Debit => "DEB",
            ColumnName::Balance => "SALDO",
        }
    }

    /// Credit and Debit are individually optional (at least one is required).
    pub fn is_mandatory(&self) -> bool {
        !matches!(self, ColumnName::Credit | ColumnName::Debit)
    }
}

impl fmt::Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnName::Date => "Data",
            ColumnName::Description => "Lancamento",
            ColumnName::DocRef => "Dcto",
            ColumnName::Credit => "Credito",
            ColumnName::Debit => "Debito",
            ColumnName::Balance => "Saldo",
        };
        f.pad(name)
    }
}

/// One detected column and the x-position of its header word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    pub name: ColumnName,
    pub anchor_x: f64,
}

/// A data row bucketed into columns. Absent columns read as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignedRow {
    cells: Vec<(ColumnName, String)>,
}

impl AssignedRow {
    pub(crate) fn from_cells(cells: Vec<(ColumnName, String)>) -> Self {
        Self { cells }
    }

    /// Cell text for `name`; empty when the column is missing or blank.
    pub fn get(&self, name: ColumnName) -> &str {
        self.cells
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, text)| text.as_str())
            .unwrap_or("")
    }

    pub fn has_column(&self, name: ColumnName) -> bool {
        self.cells.iter().any(|(n, _)| *n == name)
    }
}
