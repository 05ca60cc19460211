//! Import CSV exports into the spell and monster catalog database.
//!
//! This crate owns the whole upload pipeline: delimiter sniffing, row
//! parsing, shape detection, the three importers, and the response object.

pub mod class_import;
pub mod error;
pub mod monster_import;
pub mod progress;
pub mod reader;
pub mod report;
pub mod shape;
pub mod spell_import;
pub mod upload;

pub use class_import::import_classes;
pub use error::{ImportError, RowError};
pub use monster_import::{MonsterImportOptions, import_monsters, monster_from_row};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
pub use reader::{CsvRow, Delimiter, parse_rows};
pub use report::{ImportOutcome, ImportSummary, MAX_ERROR_SAMPLES};
pub use shape::CsvShape;
pub use spell_import::{import_spells, spell_from_row};
pub use upload::{ImportOptions, UploadResponse, import_csv, import_upload, log_import};
