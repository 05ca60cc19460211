//! The upload contract: validate a file, detect its shape, run the matching
//! importer, and answer with a success or error object.

use grimoire_catalog::types::ImportLog;
use grimoire_db::insert_import_log;
use rusqlite::Connection;
use serde::Serialize;

use crate::class_import::import_classes;
use crate::error::ImportError;
use crate::monster_import::{MonsterImportOptions, import_monsters};
use crate::progress::ImportProgress;
use crate::reader::{Delimiter, first_line, parse_rows};
use crate::report::ImportOutcome;
use crate::shape::CsvShape;
use crate::spell_import::import_spells;

pub const NO_FILE: &str = "Veuillez sélectionner un fichier CSV";
pub const NOT_CSV: &str = "Le fichier doit être au format CSV";
pub const EMPTY_FILE: &str = "Le fichier CSV est vide";
pub const SERVER_ERROR: &str = "Erreur serveur";

/// Options shared by every import.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Guess image URLs for monsters that have none.
    pub infer_images: bool,
}

/// Answer to an upload, serialized as `{success, message, details?}` or
/// `{error, details?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UploadResponse {
    Success {
        success: bool,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    Failure {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

impl UploadResponse {
    pub fn success(message: impl Into<String>, details: Option<String>) -> Self {
        UploadResponse::Success {
            success: true,
            message: message.into(),
            details,
        }
    }

    pub fn failure(error: impl Into<String>, details: Option<String>) -> Self {
        UploadResponse::Failure {
            error: error.into(),
            details,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UploadResponse::Success { .. })
    }

    /// The success message or the error text.
    pub fn headline(&self) -> &str {
        match self {
            UploadResponse::Success { message, .. } => message,
            UploadResponse::Failure { error, .. } => error,
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            UploadResponse::Success { details, .. } | UploadResponse::Failure { details, .. } => {
                details.as_deref()
            }
        }
    }
}

/// Handle one uploaded file end to end. Never fails: every problem becomes a
/// [`UploadResponse::Failure`].
pub fn import_upload(
    conn: &Connection,
    file_name: &str,
    data: &[u8],
    options: &ImportOptions,
    progress: Option<&dyn ImportProgress>,
) -> UploadResponse {
    if file_name.is_empty() || data.is_empty() {
        return UploadResponse::failure(NO_FILE, None);
    }
    if !file_name.ends_with(".csv") {
        return UploadResponse::failure(NOT_CSV, None);
    }

    match import_csv(conn, data, options, progress) {
        Ok(outcome) => {
            log_import(conn, file_name, &outcome);
            let message = outcome.message();
            if let Some(p) = progress {
                p.on_complete(&message);
            }
            UploadResponse::success(message, outcome.summary.details())
        }
        Err(ImportError::Empty) => UploadResponse::failure(EMPTY_FILE, None),
        Err(e) => {
            log::error!("Import of '{}' failed: {}", file_name, e);
            UploadResponse::failure(SERVER_ERROR, Some(e.to_string()))
        }
    }
}

/// Sniff, parse, detect and import raw CSV bytes.
pub fn import_csv(
    conn: &Connection,
    data: &[u8],
    options: &ImportOptions,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportOutcome, ImportError> {
    let delimiter = Delimiter::sniff(&first_line(data));
    let rows = parse_rows(data, delimiter)?;
    let Some(first) = rows.first() else {
        return Err(ImportError::Empty);
    };

    let shape = CsvShape::detect(first);
    log::info!(
        "Detected {} file: {} rows, {} separated",
        shape,
        rows.len(),
        delimiter
    );

    let outcome = match shape {
        CsvShape::Spells => ImportOutcome::new(shape, import_spells(conn, &rows, progress)?),
        CsvShape::Classes => {
            let (summary, subclasses) = import_classes(conn, &rows, progress)?;
            ImportOutcome {
                subclasses,
                ..ImportOutcome::new(shape, summary)
            }
        }
        CsvShape::Monsters => {
            let monster_options = MonsterImportOptions {
                infer_images: options.infer_images,
            };
            let (summary, pruned) = import_monsters(conn, &rows, monster_options, progress)?;
            ImportOutcome {
                pruned,
                ..ImportOutcome::new(shape, summary)
            }
        }
    };

    if outcome.summary.errors > 0 {
        log::warn!(
            "{} rows skipped with errors in {} import",
            outcome.summary.errors,
            shape
        );
    }
    Ok(outcome)
}

/// Record a completed import in the import log. A failure here is logged and
/// does not undo the import.
pub fn log_import(conn: &Connection, file_name: &str, outcome: &ImportOutcome) {
    let summary = &outcome.summary;
    let entry = ImportLog {
        id: 0,
        file_name: file_name.to_string(),
        shape: outcome.shape.as_str().to_string(),
        records_imported: summary.imported as i64,
        row_errors: summary.errors as i64,
        imported_at: chrono::Utc::now().to_rfc3339(),
    };
    if let Err(e) = insert_import_log(conn, &entry) {
        log::warn!("Could not record import of '{}': {}", file_name, e);
    }
}
