//! Supported statement layouts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Statement layout dialect. Which one applies to a document is a per-client
/// setting; the engine never sniffs it from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Header-driven layout with printed column titles (Bradesco)
    Columnar,
    /// Regex-driven layout with a trailing C/D marker (Caixa)
    Positional,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::Columnar, Dialect::Positional];

    pub fn key(&self) -> &'static str {
        match self {
            Dialect::Columnar => "columnar",
            Dialect::Positional => "positional",
        }
    }

    /// Bank layout label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            Dialect::Columnar => "Bradesco (PDF)",
            Dialect::Positional => "Caixa (PDF)",
        }
    }

    /// The dialect worth suggesting when this one finds nothing.
    pub fn other(&self) -> Dialect {
        match self {
            Dialect::Columnar => Dialect::Positional,
            Dialect::Positional => Dialect::Columnar,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dialect '{0}' (expected columnar or positional)")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Dialect::ALL
            .into_iter()
            .find(|d| d.key().eq_ignore_ascii_case(wanted) || d.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownDialect(s.to_string()))
    }
}
