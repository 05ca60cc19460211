//! Import error types.
//!
//! [`ImportError`] aborts a whole import. [`RowError`] only skips one row and
//! ends up in the error sample of the report.

use grimoire_db::{OperationError, SchemaError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Le fichier CSV est vide")]
    Empty,
}

/// Why a single row was skipped.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("Type manquant")]
    MissingType,
    #[error("Classe non trouvée: {0}")]
    UnknownClass(String),
    #[error("Sous-classe non trouvée: {0}")]
    UnknownSubclass(String),
    #[error("{0}")]
    Db(#[from] OperationError),
}
