//! Favorite monsters and prepared spells.

use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::open_existing_db;

/// Toggle a monster in a user's favorites.
pub(crate) fn run_favorite(db_path: &Path, user_id: i64, monster_id: i64) -> Result<(), CliError> {
    let Some(conn) = open_existing_db(db_path)? else {
        return Ok(());
    };

    let monster = grimoire_db::monster_by_id(&conn, monster_id)
        .map_err(|e| CliError::database(format!("Failed to load monster: {}", e)))?
        .ok_or_else(|| CliError::not_found(format!("monster {}", monster_id)))?;

    let now_favorite = grimoire_db::toggle_favorite_monster(&conn, user_id, monster_id)
        .map_err(|e| CliError::database(format!("Failed to update favorites: {}", e)))?;

    if now_favorite {
        log::info!(
            "{} added to favorites of user {}",
            monster.record.name.if_supports_color(Stdout, |t| t.bold()),
            user_id,
        );
    } else {
        log::info!(
            "{} removed from favorites of user {}",
            monster.record.name.if_supports_color(Stdout, |t| t.bold()),
            user_id,
        );
    }

    let count = grimoire_db::favorite_monster_ids(&conn, user_id)
        .map_err(|e| CliError::database(format!("Failed to list favorites: {}", e)))?
        .len();
    log::info!("  {} favorite(s)", count);

    Ok(())
}

/// Toggle a spell in a character's prepared list.
pub(crate) fn run_prepare(db_path: &Path, character_id: i64, spell_id: i64) -> Result<(), CliError> {
    let Some(conn) = open_existing_db(db_path)? else {
        return Ok(());
    };

    let spell = grimoire_db::spell_by_id(&conn, spell_id)
        .map_err(|e| CliError::database(format!("Failed to load spell: {}", e)))?
        .ok_or_else(|| CliError::not_found(format!("spell {}", spell_id)))?;

    let now_prepared = grimoire_db::toggle_prepared_spell(&conn, character_id, spell_id)
        .map_err(|e| CliError::database(format!("Failed to update prepared spells: {}", e)))?;

    let verb = if now_prepared { "prepared by" } else { "no longer prepared by" };
    log::info!(
        "{} {} character {}",
        spell.record.name.if_supports_color(Stdout, |t| t.bold()),
        verb,
        character_id,
    );

    let prepared = grimoire_db::prepared_spells(&conn, character_id)
        .map_err(|e| CliError::database(format!("Failed to list prepared spells: {}", e)))?;
    for s in &prepared {
        log::info!("  - {} (niv. {})", s.record.name, s.record.level);
    }

    Ok(())
}
