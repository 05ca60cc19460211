use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Delete the database file along with its WAL side files.
pub(crate) fn run_reset(db_path: &Path, confirm: bool) -> Result<(), CliError> {
    if !confirm {
        log::warn!(
            "This will permanently delete the database at:\n  {}",
            db_path.display(),
        );
        log::info!("Re-run with --confirm to proceed:");
        log::info!("  grimoire reset --confirm");
        return Ok(());
    }

    if !db_path.exists() {
        log::info!("No database found at {}", db_path.display());
        log::info!("Nothing to reset.");
        return Ok(());
    }

    let file_size = std::fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

    std::fs::remove_file(db_path)
        .map_err(|e| CliError::other(format!("Failed to delete {}: {}", db_path.display(), e)))?;
    for suffix in ["-wal", "-shm"] {
        let side = side_file(db_path, suffix);
        if side.exists() {
            std::fs::remove_file(&side).map_err(|e| {
                CliError::other(format!("Failed to delete {}: {}", side.display(), e))
            })?;
        }
    }

    let size_kb = file_size as f64 / 1024.0;
    log::info!(
        "{}",
        "Database deleted.".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Path: {}", db_path.display());
    log::info!("  Freed: {:.1} KB", size_kb);
    crate::log_blank();
    log::info!("Run 'grimoire import <FILE>' to rebuild.");

    Ok(())
}

fn side_file(db_path: &Path, suffix: &str) -> PathBuf {
    let mut name = db_path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}
