use integra_core::InvalidAccount;

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    InvalidAccount(#[from] InvalidAccount),

    #[error("client not found: {0}")]
    UnknownClient(String),

    #[error("client already registered: {0}")]
    DuplicateClient(String),

    #[error("invalid client: {0}")]
    InvalidClient(String),

    /// Export refused: some descriptions have no account rule yet
    #[error("{count} transaction(s) without an account rule")]
    Unmapped {
        count: usize,
        descriptions: Vec<String>,
    },
}
