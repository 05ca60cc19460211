//! Write operations for every catalog table.

use std::collections::HashMap;

use grimoire_catalog::types::*;
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
}

// ── Class Operations ────────────────────────────────────────────────────────

/// Insert a class. Returns the new row id.
pub fn insert_class(
    conn: &Connection,
    name: &str,
    display_name: &str,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO classes (nom, nom_affich) VALUES (?1, ?2)",
        params![name, display_name],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Map every class identifier to its row id.
pub fn class_id_map(conn: &Connection) -> Result<HashMap<String, i64>, OperationError> {
    let mut stmt = conn.prepare("SELECT id, nom FROM classes")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(1)?, row.get::<_, i64>(0)?)))?;
    rows.collect::<Result<HashMap<_, _>, _>>().map_err(Into::into)
}

// ── Spell Operations ────────────────────────────────────────────────────────

/// Insert a spell. Returns the new row id.
pub fn insert_spell(conn: &Connection, spell: &SpellRecord) -> Result<i64, OperationError> {
    let [niv_1, niv_2, niv_3, niv_4, niv_5, niv_6, niv_7, niv_8, niv_9] = &spell.scaling;
    conn.execute(
        "INSERT INTO spells (
             nom, niveau, ecole, rituel, concentration,
             temps_valeur, temps_unite, temps_condition,
             portee_type, portee_valeur, portee_unite, portee_forme,
             duree_type, duree_valeur, duree_unite,
             composantes, materiaux,
             niv_1, niv_2, niv_3, niv_4, niv_5, niv_6, niv_7, niv_8, niv_9,
             source, description, niveaux_sup_txt)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15,
                 ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29)",
        params![
            spell.name,
            spell.level,
            spell.school,
            spell.ritual,
            spell.concentration,
            spell.casting_time_value,
            spell.casting_time_unit,
            spell.casting_time_condition,
            spell.range_type,
            spell.range_value,
            spell.range_unit,
            spell.range_shape,
            spell.duration_type,
            spell.duration_value,
            spell.duration_unit,
            spell.components,
            spell.materials,
            niv_1,
            niv_2,
            niv_3,
            niv_4,
            niv_5,
            niv_6,
            niv_7,
            niv_8,
            niv_9,
            spell.source,
            spell.description,
            spell.higher_levels,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Associate a spell with a class. Linking the same pair twice is a no-op.
pub fn link_spell_class(
    conn: &Connection,
    spell_id: i64,
    class_id: i64,
) -> Result<(), OperationError> {
    conn.execute(
        "INSERT OR IGNORE INTO spell_classes (spell_id, class_id) VALUES (?1, ?2)",
        params![spell_id, class_id],
    )?;
    Ok(())
}

// ── Subclass / Slot Operations ──────────────────────────────────────────────

/// Empty the subclass and slot progression tables. Classes are left alone.
pub fn clear_class_progression(conn: &Connection) -> Result<(), OperationError> {
    conn.execute("DELETE FROM class_spell_slots", [])?;
    conn.execute("DELETE FROM subclasses", [])?;
    Ok(())
}

/// Insert a subclass. Returns the new row id.
pub fn insert_subclass(
    conn: &Connection,
    class_id: i64,
    name: &str,
    display_name: &str,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO subclasses (class_id, nom, nom_affich) VALUES (?1, ?2, ?3)",
        params![class_id, name, display_name],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert one slot progression row. Returns the new row id.
pub fn insert_spell_slots(
    conn: &Connection,
    slots: &SpellSlotRecord,
) -> Result<i64, OperationError> {
    let [s1, s2, s3, s4, s5, s6, s7, s8, s9] = slots.slots;
    conn.execute(
        "INSERT INTO class_spell_slots (
             class_id, subclass_id, character_level,
             slot_level_1, slot_level_2, slot_level_3, slot_level_4, slot_level_5,
             slot_level_6, slot_level_7, slot_level_8, slot_level_9)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            slots.class_id,
            slots.subclass_id,
            slots.character_level,
            s1,
            s2,
            s3,
            s4,
            s5,
            s6,
            s7,
            s8,
            s9,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Monster Operations ──────────────────────────────────────────────────────

/// Insert a monster, or overwrite every column of the monster with the same
/// name. The row id of an existing monster is preserved. Returns the row id.
pub fn upsert_monster(conn: &Connection, monster: &MonsterRecord) -> Result<i64, OperationError> {
    let scores = &monster.scores;
    let mods = &monster.modifiers;
    let id = conn.query_row(
        r#"INSERT INTO monsters (
             name, type, trad_raw, trad_json, ac, hp, speed,
             str, dex, con, "int", wis, cha,
             str_mod, dex_mod, con_mod, int_mod, wis_mod, cha_mod,
             details_json, sections_json, description_text, image_url, links_json)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                 ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24)
         ON CONFLICT(name) DO UPDATE SET
             type = excluded.type,
             trad_raw = excluded.trad_raw,
             trad_json = excluded.trad_json,
             ac = excluded.ac,
             hp = excluded.hp,
             speed = excluded.speed,
             str = excluded.str,
             dex = excluded.dex,
             con = excluded.con,
             "int" = excluded."int",
             wis = excluded.wis,
             cha = excluded.cha,
             str_mod = excluded.str_mod,
             dex_mod = excluded.dex_mod,
             con_mod = excluded.con_mod,
             int_mod = excluded.int_mod,
             wis_mod = excluded.wis_mod,
             cha_mod = excluded.cha_mod,
             details_json = excluded.details_json,
             sections_json = excluded.sections_json,
             description_text = excluded.description_text,
             image_url = excluded.image_url,
             links_json = excluded.links_json,
             updated_at = datetime('now')
         RETURNING id"#,
        params![
            monster.name,
            monster.monster_type,
            monster.trad_raw,
            monster.trad_json,
            monster.armor_class,
            monster.hit_points,
            monster.speed,
            scores.strength,
            scores.dexterity,
            scores.constitution,
            scores.intelligence,
            scores.wisdom,
            scores.charisma,
            mods.strength,
            mods.dexterity,
            mods.constitution,
            mods.intelligence,
            mods.wisdom,
            mods.charisma,
            monster.details_json,
            monster.sections_json,
            monster.description_text,
            monster.image_url,
            monster.links_json,
        ],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Delete every monster whose name is not in `keep`. Returns the number deleted.
///
/// An empty `keep` deletes nothing: a run that imported no monster must not
/// wipe the bestiary.
pub fn prune_monsters<'a, I>(conn: &Connection, keep: I) -> Result<usize, OperationError>
where
    I: IntoIterator<Item = &'a str>,
{
    conn.execute_batch(
        "CREATE TEMP TABLE IF NOT EXISTS kept_monster_names (name TEXT PRIMARY KEY);
         DELETE FROM temp.kept_monster_names;",
    )?;

    let mut kept = 0usize;
    {
        let mut stmt =
            conn.prepare("INSERT OR IGNORE INTO temp.kept_monster_names (name) VALUES (?1)")?;
        for name in keep {
            kept += stmt.execute(params![name])?;
        }
    }

    let deleted = if kept == 0 {
        0
    } else {
        conn.execute(
            "DELETE FROM monsters WHERE name NOT IN (SELECT name FROM temp.kept_monster_names)",
            [],
        )?
    };

    conn.execute_batch("DROP TABLE temp.kept_monster_names;")?;
    Ok(deleted)
}

/// Delete a monster by id. Favorites pointing at it cascade.
pub fn delete_monster(conn: &Connection, id: i64) -> Result<(), OperationError> {
    let changed = conn.execute("DELETE FROM monsters WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "monster".to_string(),
            id: id.to_string(),
        });
    }
    Ok(())
}

// ── User / Character Operations ─────────────────────────────────────────────

/// Insert a user row. Credential handling lives outside this crate; the hash
/// is stored as given.
pub fn insert_user(
    conn: &Connection,
    email: &str,
    password_hash: &str,
    display_name: Option<&str>,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO users (email, password_hash, display_name) VALUES (?1, ?2, ?3)",
        params![email, password_hash, display_name],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert a character. Returns the new row id.
pub fn insert_character(
    conn: &Connection,
    user_id: i64,
    name: &str,
    class_id: i64,
    subclass_id: Option<i64>,
    level: i64,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO characters (user_id, name, class_id, subclass_id, level)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user_id, name, class_id, subclass_id, level],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Favorites ───────────────────────────────────────────────────────────────

pub fn is_favorite_monster(
    conn: &Connection,
    user_id: i64,
    monster_id: i64,
) -> Result<bool, OperationError> {
    let found = conn
        .query_row(
            "SELECT 1 FROM user_favorite_monsters WHERE user_id = ?1 AND monster_id = ?2",
            params![user_id, monster_id],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Mark a monster as a user's favorite. Already-favorite is a no-op.
pub fn add_favorite_monster(
    conn: &Connection,
    user_id: i64,
    monster_id: i64,
) -> Result<(), OperationError> {
    conn.execute(
        "INSERT OR IGNORE INTO user_favorite_monsters (user_id, monster_id) VALUES (?1, ?2)",
        params![user_id, monster_id],
    )?;
    Ok(())
}

pub fn remove_favorite_monster(
    conn: &Connection,
    user_id: i64,
    monster_id: i64,
) -> Result<(), OperationError> {
    conn.execute(
        "DELETE FROM user_favorite_monsters WHERE user_id = ?1 AND monster_id = ?2",
        params![user_id, monster_id],
    )?;
    Ok(())
}

/// Flip the favorite flag. Returns `true` if the monster is now a favorite.
pub fn toggle_favorite_monster(
    conn: &Connection,
    user_id: i64,
    monster_id: i64,
) -> Result<bool, OperationError> {
    if is_favorite_monster(conn, user_id, monster_id)? {
        remove_favorite_monster(conn, user_id, monster_id)?;
        Ok(false)
    } else {
        add_favorite_monster(conn, user_id, monster_id)?;
        Ok(true)
    }
}

// ── Prepared Spells ─────────────────────────────────────────────────────────

pub fn is_spell_prepared(
    conn: &Connection,
    character_id: i64,
    spell_id: i64,
) -> Result<bool, OperationError> {
    let found = conn
        .query_row(
            "SELECT 1 FROM character_prepared_spells WHERE character_id = ?1 AND spell_id = ?2",
            params![character_id, spell_id],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Mark a spell as prepared by a character. Already-prepared is a no-op.
pub fn add_prepared_spell(
    conn: &Connection,
    character_id: i64,
    spell_id: i64,
) -> Result<(), OperationError> {
    conn.execute(
        "INSERT OR IGNORE INTO character_prepared_spells (character_id, spell_id) VALUES (?1, ?2)",
        params![character_id, spell_id],
    )?;
    Ok(())
}

pub fn remove_prepared_spell(
    conn: &Connection,
    character_id: i64,
    spell_id: i64,
) -> Result<(), OperationError> {
    conn.execute(
        "DELETE FROM character_prepared_spells WHERE character_id = ?1 AND spell_id = ?2",
        params![character_id, spell_id],
    )?;
    Ok(())
}

/// Flip the prepared flag. Returns `true` if the spell is now prepared.
pub fn toggle_prepared_spell(
    conn: &Connection,
    character_id: i64,
    spell_id: i64,
) -> Result<bool, OperationError> {
    if is_spell_prepared(conn, character_id, spell_id)? {
        remove_prepared_spell(conn, character_id, spell_id)?;
        Ok(false)
    } else {
        add_prepared_spell(conn, character_id, spell_id)?;
        Ok(true)
    }
}

// ── Import Log ──────────────────────────────────────────────────────────────

/// Insert an import log entry. Returns the row id.
pub fn insert_import_log(conn: &Connection, log: &ImportLog) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO import_log (file_name, shape, records_imported, row_errors, imported_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            log.file_name,
            log.shape,
            log.records_imported,
            log.row_errors,
            log.imported_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
