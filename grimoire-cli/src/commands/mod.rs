pub(crate) mod classes;
pub(crate) mod config;
pub(crate) mod import;
pub(crate) mod monsters;
pub(crate) mod reset;
pub(crate) mod spells;
pub(crate) mod stats;
pub(crate) mod toggle;

use std::path::Path;

use rusqlite::Connection;

use crate::CliError;

/// Open (creating if needed) the database at `db_path`.
pub(crate) fn open_db(db_path: &Path) -> Result<Connection, CliError> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    grimoire_db::open_database(db_path)
        .map_err(|e| CliError::database(format!("Failed to open database: {}", e)))
}

/// Open an existing database, or warn and return `None` when there is none yet.
pub(crate) fn open_existing_db(db_path: &Path) -> Result<Option<Connection>, CliError> {
    if !db_path.exists() {
        log::warn!("No database found at {}", db_path.display());
        log::info!("Run 'grimoire import <FILE>' to create one.");
        return Ok(None);
    }
    open_db(db_path).map(Some)
}

/// Truncate a string to a maximum width in characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let kept: String = s.chars().take(max - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max).collect()
    }
}
