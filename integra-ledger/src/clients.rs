//! Client registry persisted as JSON.

use integra_core::{AccountCode, ClientProfile, Dialect};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LedgerError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    clients: Vec<ClientProfile>,
}

/// Fields of a client being registered.
#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub cnpj: Option<String>,
    pub system_code: String,
    pub bank_account: AccountCode,
    pub dialect: Dialect,
}

#[derive(Debug, Clone)]
pub struct ClientRegistry {
    path: PathBuf,
    clients: Vec<ClientProfile>,
}

impl ClientRegistry {
    /// Load the registry; a missing file is an empty registry.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let clients = if path.exists() {
            let s = fs::read_to_string(&path)?;
            serde_json::from_str::<RegistryFile>(&s)?.clients
        } else {
            Vec::new()
        };
        Ok(Self { path, clients })
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = RegistryFile {
            clients: self.clients.clone(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }

    pub fn add(&mut self, new: NewClient) -> Result<&ClientProfile> {
        let name = new.name.trim().to_string();
        if name.is_empty() {
            return Err(LedgerError::InvalidClient("name is empty".to_string()));
        }
        if new.system_code.trim().is_empty() {
            return Err(LedgerError::InvalidClient("system code is empty".to_string()));
        }
        if self.clients.iter().any(|c| c.name.eq_ignore_ascii_case(&name)) {
            return Err(LedgerError::DuplicateClient(name));
        }

        let id = self.clients.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        self.clients.push(ClientProfile {
            id,
            name,
            cnpj: new.cnpj.filter(|c| !c.trim().is_empty()),
            system_code: new.system_code.trim().to_string(),
            bank_account: new.bank_account,
            dialect: new.dialect,
        });
        log::info!("registered client {id}");
        Ok(&self.clients[self.clients.len() - 1])
    }

    pub fn get(&self, id: u32) -> Option<&ClientProfile> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// Find a client by numeric id or by (case-insensitive) name.
    pub fn find(&self, name_or_id: &str) -> Result<&ClientProfile> {
        let wanted = name_or_id.trim();
        let by_id = wanted.parse::<u32>().ok().and_then(|id| self.get(id));
        by_id
            .or_else(|| self.clients.iter().find(|c| c.name.eq_ignore_ascii_case(wanted)))
            .ok_or_else(|| LedgerError::UnknownClient(wanted.to_string()))
    }

    /// Clients ordered by name.
    pub fn list(&self) -> Vec<&ClientProfile> {
        let mut out: Vec<&ClientProfile> = self.clients.iter().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }
}
