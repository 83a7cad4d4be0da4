//! integra-ingest: statement layout reconstruction from positioned tokens.
//!
//! Pages of tokens go in, numbered [`Transaction`]s come out. Two dialects
//! are supported: a header-driven columnar layout and a positional layout
//! keyed on C/D markers.

pub mod amount;
pub mod assembler;
pub mod columns;
pub mod diagnostics;
pub mod dialect;
pub mod error;
pub mod header;
pub mod normalize;
pub mod parsers;
pub mod rows;
pub mod types;

pub use amount::{is_date, is_noise, parse_amount};
pub use assembler::{Assembler, PendingTransaction, RowInput, resolve_value};
pub use columns::ColumnLayout;
pub use dialect::{EngineOptions, StatementParser, extract, parser_for};
pub use error::IngestError;
pub use header::{HeaderMatch, locate_header};
pub use normalize::normalize;
pub use parsers::{ColumnarParser, PositionalParser};
pub use rows::{DEFAULT_Y_TOLERANCE, Row, cluster};
pub use types::{AssignedRow, ColumnName, ColumnSpec};

pub use integra_core::{Dialect, Page, Token, Transaction};
