//! Account codes, historic→account mappings and client profiles

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Dialect;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("account code must not be empty")]
pub struct InvalidAccount;

/// Reduced account code of the target accounting system (e.g. "1052").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountCode(String);

impl AccountCode {
    pub fn new(code: impl AsRef<str>) -> Result<Self, InvalidAccount> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            return Err(InvalidAccount);
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountCode {
    type Error = InvalidAccount;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AccountCode::new(value)
    }
}

impl From<AccountCode> for String {
    fn from(value: AccountCode) -> Self {
        value.0
    }
}

impl fmt::Display for AccountCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Result of looking a historic base up in the rule store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mapping {
    Mapped(AccountCode),
    Unmapped,
}

impl Mapping {
    pub fn account(&self) -> Option<&AccountCode> {
        match self {
            Mapping::Mapped(code) => Some(code),
            Mapping::Unmapped => None,
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, Mapping::Mapped(_))
    }
}

impl From<Option<AccountCode>> for Mapping {
    fn from(value: Option<AccountCode>) -> Self {
        value.map_or(Mapping::Unmapped, Mapping::Mapped)
    }
}

/// A client company whose statements get imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub cnpj: Option<String>,
    /// Company code in the accounting system, used in export file names
    pub system_code: String,
    /// Account the bank statement itself posts against
    pub bank_account: AccountCode,
    #[serde(default = "default_dialect")]
    pub dialect: Dialect,
}

fn default_dialect() -> Dialect {
    Dialect::Columnar
}
