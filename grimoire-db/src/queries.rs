//! Read queries for the catalog database.
//!
//! Spell and monster search, class progression lookups, per-user lists,
//! and summary statistics.

use std::collections::HashMap;

use grimoire_catalog::{normalize_class_name, normalize_subclass_name};
use grimoire_catalog::types::*;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};

use crate::operations::OperationError;

const SPELL_COLUMNS: &str = "s.id, s.nom, s.niveau, s.ecole, s.rituel, s.concentration,
     s.temps_valeur, s.temps_unite, s.temps_condition,
     s.portee_type, s.portee_valeur, s.portee_unite, s.portee_forme,
     s.duree_type, s.duree_valeur, s.duree_unite, s.composantes, s.materiaux,
     s.niv_1, s.niv_2, s.niv_3, s.niv_4, s.niv_5, s.niv_6, s.niv_7, s.niv_8, s.niv_9,
     s.source, s.description, s.niveaux_sup_txt";

const MONSTER_COLUMNS: &str = r#"m.id, m.name, m.type, m.trad_raw, m.trad_json, m.ac, m.hp, m.speed,
     m.str, m.dex, m.con, m."int", m.wis, m.cha,
     m.str_mod, m.dex_mod, m.con_mod, m.int_mod, m.wis_mod, m.cha_mod,
     m.details_json, m.sections_json, m.description_text, m.image_url, m.links_json,
     m.created_at, m.updated_at"#;

// ── Spell Queries ───────────────────────────────────────────────────────────

/// Spell search criteria. Empty lists and `None` mean "no constraint".
#[derive(Debug, Clone, Default)]
pub struct SpellFilter {
    /// Class names in any spelling `normalize_class_name` accepts.
    pub classes: Vec<String>,
    pub levels: Vec<i64>,
    /// Case-insensitive substring of the spell name or description.
    pub search: Option<String>,
}

/// Spells matching every criterion of `filter`, ordered by level then name.
pub fn search_spells(conn: &Connection, filter: &SpellFilter) -> Result<Vec<Spell>, OperationError> {
    let mut clauses = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if !filter.classes.is_empty() {
        let names: Vec<String> = filter
            .classes
            .iter()
            .map(|c| normalize_class_name(c))
            .collect();
        clauses.push(format!(
            "s.id IN (SELECT sc.spell_id FROM spell_classes sc
                      JOIN classes c ON c.id = sc.class_id
                      WHERE c.nom IN ({}))",
            placeholders(names.len())
        ));
        values.extend(names.into_iter().map(Value::Text));
    }
    if !filter.levels.is_empty() {
        clauses.push(format!("s.niveau IN ({})", placeholders(filter.levels.len())));
        values.extend(filter.levels.iter().copied().map(Value::Integer));
    }
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{search}%");
        clauses.push("(s.nom LIKE ? OR s.description LIKE ?)".to_string());
        values.push(Value::Text(pattern.clone()));
        values.push(Value::Text(pattern));
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };
    let sql = format!(
        "SELECT {SPELL_COLUMNS} FROM spells s {where_clause} ORDER BY s.niveau, s.nom"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values), row_to_spell)?;
    let mut spells = rows.collect::<Result<Vec<_>, _>>()?;
    attach_classes(conn, &mut spells)?;
    Ok(spells)
}

/// Look up one spell.
pub fn spell_by_id(conn: &Connection, id: i64) -> Result<Option<Spell>, OperationError> {
    let sql = format!("SELECT {SPELL_COLUMNS} FROM spells s WHERE s.id = ?1");
    let spell = conn.query_row(&sql, params![id], row_to_spell).optional()?;
    match spell {
        Some(spell) => {
            let mut spells = vec![spell];
            attach_classes(conn, &mut spells)?;
            Ok(spells.pop())
        }
        None => Ok(None),
    }
}

pub fn spell_count(conn: &Connection) -> Result<i64, OperationError> {
    conn.query_row("SELECT COUNT(*) FROM spells", [], |r| r.get(0))
        .map_err(Into::into)
}

/// Spell levels that have at least one spell of the given classes.
///
/// With no class filter, or one naming no existing class, every level 0-9 is
/// offered.
pub fn available_levels(conn: &Connection, classes: &[String]) -> Result<Vec<i64>, OperationError> {
    let all_levels = || (0..=9).collect();
    if classes.is_empty() {
        return Ok(all_levels());
    }

    let names: Vec<Value> = classes
        .iter()
        .map(|c| Value::Text(normalize_class_name(c)))
        .collect();
    let known: i64 = conn.query_row(
        &format!(
            "SELECT COUNT(*) FROM classes WHERE nom IN ({})",
            placeholders(names.len())
        ),
        params_from_iter(names.iter()),
        |row| row.get(0),
    )?;
    if known == 0 {
        return Ok(all_levels());
    }

    let sql = format!(
        "SELECT DISTINCT s.niveau FROM spells s
         JOIN spell_classes sc ON sc.spell_id = s.id
         JOIN classes c ON c.id = sc.class_id
         WHERE c.nom IN ({})
         ORDER BY s.niveau",
        placeholders(names.len())
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(names), |row| row.get(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Fill `classes` on each spell with class display names, sorted.
fn attach_classes(conn: &Connection, spells: &mut [Spell]) -> Result<(), OperationError> {
    if spells.is_empty() {
        return Ok(());
    }
    let ids: Vec<Value> = spells.iter().map(|s| Value::Integer(s.id)).collect();
    let sql = format!(
        "SELECT sc.spell_id, c.nom_affich FROM spell_classes sc
         JOIN classes c ON c.id = sc.class_id
         WHERE sc.spell_id IN ({})
         ORDER BY c.nom_affich",
        placeholders(ids.len())
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(ids), |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut by_spell: HashMap<i64, Vec<String>> = HashMap::new();
    for row in rows {
        let (spell_id, class) = row?;
        by_spell.entry(spell_id).or_default().push(class);
    }
    for spell in spells {
        spell.classes = by_spell.remove(&spell.id).unwrap_or_default();
    }
    Ok(())
}

// ── Class Queries ───────────────────────────────────────────────────────────

/// All classes, ordered by display name.
pub fn list_classes(conn: &Connection) -> Result<Vec<CharacterClass>, OperationError> {
    let mut stmt = conn.prepare("SELECT id, nom, nom_affich FROM classes ORDER BY nom_affich")?;
    let rows = stmt.query_map([], |row| {
        Ok(CharacterClass {
            id: row.get(0)?,
            name: row.get(1)?,
            display_name: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Subclasses of a class, looked up by any accepted spelling of its name.
pub fn subclasses_for_class(
    conn: &Connection,
    class_name: &str,
) -> Result<Vec<Subclass>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT sub.id, sub.class_id, sub.nom, sub.nom_affich
         FROM subclasses sub JOIN classes c ON c.id = sub.class_id
         WHERE c.nom = ?1
         ORDER BY sub.nom_affich",
    )?;
    let rows = stmt.query_map(params![normalize_class_name(class_name)], |row| {
        Ok(Subclass {
            id: row.get(0)?,
            class_id: row.get(1)?,
            name: row.get(2)?,
            display_name: row.get(3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Slot progression of a subclass, ordered by character level.
///
/// `subclass_name` may be the display name or the slug. With `level`, only
/// that character level is returned.
pub fn spell_slots(
    conn: &Connection,
    class_name: &str,
    subclass_name: &str,
    level: Option<i64>,
) -> Result<Vec<SpellSlotRecord>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT sl.class_id, sl.subclass_id, sl.character_level,
                sl.slot_level_1, sl.slot_level_2, sl.slot_level_3,
                sl.slot_level_4, sl.slot_level_5, sl.slot_level_6,
                sl.slot_level_7, sl.slot_level_8, sl.slot_level_9
         FROM class_spell_slots sl
         JOIN classes c ON c.id = sl.class_id
         JOIN subclasses sub ON sub.id = sl.subclass_id
         WHERE c.nom = ?1 AND sub.nom = ?2 AND (?3 IS NULL OR sl.character_level = ?3)
         ORDER BY sl.character_level",
    )?;
    let rows = stmt.query_map(
        params![
            normalize_class_name(class_name),
            normalize_subclass_name(subclass_name),
            level
        ],
        |row| {
            let mut slots = [0i64; 9];
            for (i, slot) in slots.iter_mut().enumerate() {
                *slot = row.get(3 + i)?;
            }
            Ok(SpellSlotRecord {
                class_id: row.get(0)?,
                subclass_id: row.get(1)?,
                character_level: row.get(2)?,
                slots,
            })
        },
    )?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Monster Queries ─────────────────────────────────────────────────────────

/// Monster search criteria. Empty lists and `None` mean "no constraint".
#[derive(Debug, Clone, Default)]
pub struct MonsterFilter {
    /// Exact type labels.
    pub types: Vec<String>,
    /// Case-insensitive substring of the name, type, or description.
    pub search: Option<String>,
}

/// Monsters matching `filter`, ordered by name.
pub fn search_monsters(
    conn: &Connection,
    filter: &MonsterFilter,
) -> Result<Vec<Monster>, OperationError> {
    let mut clauses = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if !filter.types.is_empty() {
        clauses.push(format!("m.type IN ({})", placeholders(filter.types.len())));
        values.extend(filter.types.iter().cloned().map(Value::Text));
    }
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        clauses.push(
            "(m.name LIKE ? OR m.type LIKE ? OR m.description_text LIKE ?)".to_string(),
        );
        let pattern = format!("%{search}%");
        values.extend(std::iter::repeat_n(Value::Text(pattern), 3));
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };
    let sql = format!("SELECT {MONSTER_COLUMNS} FROM monsters m {where_clause} ORDER BY m.name");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values), row_to_monster)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn monster_by_id(conn: &Connection, id: i64) -> Result<Option<Monster>, OperationError> {
    let sql = format!("SELECT {MONSTER_COLUMNS} FROM monsters m WHERE m.id = ?1");
    conn.query_row(&sql, params![id], row_to_monster)
        .optional()
        .map_err(Into::into)
}

pub fn monster_by_name(conn: &Connection, name: &str) -> Result<Option<Monster>, OperationError> {
    let sql = format!("SELECT {MONSTER_COLUMNS} FROM monsters m WHERE m.name = ?1");
    conn.query_row(&sql, params![name], row_to_monster)
        .optional()
        .map_err(Into::into)
}

pub fn monster_count(conn: &Connection) -> Result<i64, OperationError> {
    conn.query_row("SELECT COUNT(*) FROM monsters", [], |r| r.get(0))
        .map_err(Into::into)
}

/// Distinct monster types, sorted.
pub fn monster_types(conn: &Connection) -> Result<Vec<String>, OperationError> {
    let mut stmt = conn.prepare("SELECT DISTINCT type FROM monsters ORDER BY type")?;
    let rows = stmt.query_map([], |row| row.get(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Per-user Lists ──────────────────────────────────────────────────────────

pub fn favorite_monster_ids(conn: &Connection, user_id: i64) -> Result<Vec<i64>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT monster_id FROM user_favorite_monsters WHERE user_id = ?1 ORDER BY monster_id",
    )?;
    let rows = stmt.query_map(params![user_id], |row| row.get(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// A user's favorite monsters, ordered by name.
pub fn favorite_monsters(conn: &Connection, user_id: i64) -> Result<Vec<Monster>, OperationError> {
    let sql = format!(
        "SELECT {MONSTER_COLUMNS} FROM monsters m
         JOIN user_favorite_monsters f ON f.monster_id = m.id
         WHERE f.user_id = ?1
         ORDER BY m.name"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], row_to_monster)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn prepared_spell_ids(conn: &Connection, character_id: i64) -> Result<Vec<i64>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT spell_id FROM character_prepared_spells WHERE character_id = ?1 ORDER BY spell_id",
    )?;
    let rows = stmt.query_map(params![character_id], |row| row.get(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// A character's prepared spells, ordered by level then name.
pub fn prepared_spells(conn: &Connection, character_id: i64) -> Result<Vec<Spell>, OperationError> {
    let sql = format!(
        "SELECT {SPELL_COLUMNS} FROM spells s
         JOIN character_prepared_spells p ON p.spell_id = s.id
         WHERE p.character_id = ?1
         ORDER BY s.niveau, s.nom"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![character_id], row_to_spell)?;
    let mut spells = rows.collect::<Result<Vec<_>, _>>()?;
    attach_classes(conn, &mut spells)?;
    Ok(spells)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Get summary statistics for the catalog.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let count = |table: &str| -> Result<i64, OperationError> {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
            .map_err(Into::into)
    };

    Ok(CatalogStats {
        classes: count("classes")?,
        spells: count("spells")?,
        spell_classes: count("spell_classes")?,
        subclasses: count("subclasses")?,
        spell_slots: count("class_spell_slots")?,
        monsters: count("monsters")?,
        favorites: count("user_favorite_monsters")?,
        prepared_spells: count("character_prepared_spells")?,
    })
}

/// Summary statistics for the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct CatalogStats {
    pub classes: i64,
    pub spells: i64,
    pub spell_classes: i64,
    pub subclasses: i64,
    pub spell_slots: i64,
    pub monsters: i64,
    pub favorites: i64,
    pub prepared_spells: i64,
}

/// Most recent imports first.
pub fn list_import_logs(conn: &Connection, limit: u32) -> Result<Vec<ImportLog>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, file_name, shape, records_imported, row_errors, imported_at
         FROM import_log ORDER BY id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(ImportLog {
            id: row.get(0)?,
            file_name: row.get(1)?,
            shape: row.get(2)?,
            records_imported: row.get(3)?,
            row_errors: row.get(4)?,
            imported_at: row.get(5)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Row Mapping ─────────────────────────────────────────────────────────────

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

fn row_to_spell(row: &rusqlite::Row<'_>) -> rusqlite::Result<Spell> {
    let mut scaling: [Option<String>; 9] = Default::default();
    for (i, value) in scaling.iter_mut().enumerate() {
        *value = row.get(18 + i)?;
    }
    Ok(Spell {
        id: row.get(0)?,
        record: SpellRecord {
            name: row.get(1)?,
            level: row.get(2)?,
            school: row.get(3)?,
            ritual: row.get(4)?,
            concentration: row.get(5)?,
            casting_time_value: row.get(6)?,
            casting_time_unit: row.get(7)?,
            casting_time_condition: row.get(8)?,
            range_type: row.get(9)?,
            range_value: row.get(10)?,
            range_unit: row.get(11)?,
            range_shape: row.get(12)?,
            duration_type: row.get(13)?,
            duration_value: row.get(14)?,
            duration_unit: row.get(15)?,
            components: row.get(16)?,
            materials: row.get(17)?,
            scaling,
            source: row.get(27)?,
            description: row.get(28)?,
            higher_levels: row.get(29)?,
        },
        classes: Vec::new(),
    })
}

fn row_to_monster(row: &rusqlite::Row<'_>) -> rusqlite::Result<Monster> {
    Ok(Monster {
        id: row.get(0)?,
        record: MonsterRecord {
            name: row.get(1)?,
            monster_type: row.get(2)?,
            trad_raw: row.get(3)?,
            trad_json: row.get::<_, Option<String>>(4)?.unwrap_or_else(|| "[]".to_string()),
            armor_class: row.get(5)?,
            hit_points: row.get(6)?,
            speed: row.get(7)?,
            scores: Abilities {
                strength: row.get(8)?,
                dexterity: row.get(9)?,
                constitution: row.get(10)?,
                intelligence: row.get(11)?,
                wisdom: row.get(12)?,
                charisma: row.get(13)?,
            },
            modifiers: Abilities {
                strength: row.get(14)?,
                dexterity: row.get(15)?,
                constitution: row.get(16)?,
                intelligence: row.get(17)?,
                wisdom: row.get(18)?,
                charisma: row.get(19)?,
            },
            details_json: row.get(20)?,
            sections_json: row.get(21)?,
            description_text: row.get(22)?,
            image_url: row.get(23)?,
            links_json: row.get::<_, Option<String>>(24)?.unwrap_or_else(|| "[]".to_string()),
        },
        created_at: row.get(25)?,
        updated_at: row.get(26)?,
    })
}
