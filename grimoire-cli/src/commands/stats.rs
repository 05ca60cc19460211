use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::open_existing_db;

const RECENT_IMPORTS: u32 = 10;

pub(crate) fn run_stats(db_path: &Path) -> Result<(), CliError> {
    let Some(conn) = open_existing_db(db_path)? else {
        return Ok(());
    };

    let stats = grimoire_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query stats: {}", e)))?;

    log::info!(
        "{}",
        "Grimoire Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Classes:          {:>8}", stats.classes);
    log::info!("  Subclasses:       {:>8}", stats.subclasses);
    log::info!("  Spells:           {:>8}", stats.spells);
    log::info!("  Spell/class links:{:>8}", stats.spell_classes);
    log::info!("  Slot rows:        {:>8}", stats.spell_slots);
    log::info!("  Monsters:         {:>8}", stats.monsters);
    log::info!("  Favorites:        {:>8}", stats.favorites);
    log::info!("  Prepared spells:  {:>8}", stats.prepared_spells);

    let logs = grimoire_db::list_import_logs(&conn, RECENT_IMPORTS)
        .map_err(|e| CliError::database(format!("Failed to query import log: {}", e)))?;
    if logs.is_empty() {
        return Ok(());
    }

    crate::log_blank();
    log::info!("{}", "Recent imports".if_supports_color(Stdout, |t| t.bold()));
    for entry in &logs {
        let errors = if entry.row_errors > 0 {
            format!("{} error(s)", entry.row_errors)
                .if_supports_color(Stdout, |t| t.yellow())
                .to_string()
        } else {
            String::new()
        };
        log::info!(
            "  {}  {:<9} {:>6}  {}  {}",
            entry.imported_at.if_supports_color(Stdout, |t| t.dimmed()),
            entry.shape,
            entry.records_imported,
            entry.file_name,
            errors,
        );
    }

    Ok(())
}
