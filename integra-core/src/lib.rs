//! integra-core: shared statement data model (tokens, transactions, dialects, accounts)

pub mod account;
pub mod dialect;
pub mod token;
pub mod transaction;

pub use account::{AccountCode, ClientProfile, InvalidAccount, Mapping};
pub use dialect::{Dialect, UnknownDialect};
pub use token::{Page, Token};
pub use transaction::Transaction;
