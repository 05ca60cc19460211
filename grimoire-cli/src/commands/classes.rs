use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::open_existing_db;

/// List classes with their subclasses.
pub(crate) fn run_classes(db_path: &Path) -> Result<(), CliError> {
    let Some(conn) = open_existing_db(db_path)? else {
        return Ok(());
    };

    let classes = grimoire_db::list_classes(&conn)
        .map_err(|e| CliError::database(format!("Failed to list classes: {}", e)))?;

    if classes.is_empty() {
        log::info!("No classes yet. Import a spell or class CSV first.");
        return Ok(());
    }

    for class in &classes {
        log::info!(
            "{} {}",
            class.display_name.if_supports_color(Stdout, |t| t.bold()),
            format!("({})", class.name).if_supports_color(Stdout, |t| t.dimmed()),
        );
        let subclasses = grimoire_db::subclasses_for_class(&conn, &class.name)
            .map_err(|e| CliError::database(format!("Failed to list subclasses: {}", e)))?;
        for sub in &subclasses {
            log::info!("  - {} ({})", sub.display_name, sub.name);
        }
    }

    Ok(())
}

/// Show the slot table of one subclass.
pub(crate) fn run_slots(
    db_path: &Path,
    class: &str,
    subclass: &str,
    level: Option<i64>,
) -> Result<(), CliError> {
    let Some(conn) = open_existing_db(db_path)? else {
        return Ok(());
    };

    let rows = grimoire_db::spell_slots(&conn, class, subclass, level)
        .map_err(|e| CliError::database(format!("Failed to load spell slots: {}", e)))?;

    if rows.is_empty() {
        return Err(CliError::not_found(format!(
            "no spell slots for {} / {}",
            class, subclass
        )));
    }

    log::info!(
        "{}",
        format!("{} / {}", class, subclass).if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Niv.  1  2  3  4  5  6  7  8  9");
    for row in &rows {
        let cells: Vec<String> = row
            .slots
            .iter()
            .map(|n| if *n == 0 { " -".to_string() } else { format!("{:>2}", n) })
            .collect();
        log::info!("  {:>4} {}", row.character_level, cells.join(" "));
    }

    Ok(())
}
