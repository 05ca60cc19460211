//! Monster file importer.
//!
//! Monsters are upserted by name so their ids, and the favorites pointing at
//! them, survive a re-import. Monsters absent from the file are pruned.

use std::collections::BTreeSet;

use grimoire_catalog::image::{infer_image_url, is_npc_image_url, normalize_image_url};
use grimoire_catalog::json::{decode_translations, parse_translation_list};
use grimoire_catalog::types::{Abilities, MonsterRecord};
use grimoire_catalog::values::{optional_int, trimmed};
use grimoire_catalog::{JsonFallback, normalize_json};
use grimoire_db::{ensure_monster_tables, prune_monsters, upsert_monster};
use rusqlite::Connection;

use crate::error::{ImportError, RowError};
use crate::progress::ImportProgress;
use crate::reader::CsvRow;
use crate::report::ImportSummary;

/// Options for the monster importer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonsterImportOptions {
    /// Guess an aidedd.org image URL for monsters that have none.
    pub infer_images: bool,
}

/// Import a monster file. Returns the row summary and the number of
/// monsters pruned.
pub fn import_monsters(
    conn: &Connection,
    rows: &[CsvRow],
    options: MonsterImportOptions,
    progress: Option<&dyn ImportProgress>,
) -> Result<(ImportSummary, usize), ImportError> {
    ensure_monster_tables(conn)?;

    if let Some(p) = progress {
        p.on_phase(&format!("Importing {} monster rows", rows.len()));
    }

    let mut summary = ImportSummary::default();
    let mut imported = BTreeSet::new();
    for (i, row) in rows.iter().enumerate() {
        let name = row.get("name").trim();
        if name.is_empty() || name.eq_ignore_ascii_case("name") {
            log::debug!("Skipping monster row {} with name {:?}", i + 1, name);
        } else {
            match import_monster_row(conn, row, options) {
                Ok(()) => {
                    imported.insert(name.to_string());
                    summary.record_success();
                }
                Err(e) => summary.record_error(format!("{name}: {e}")),
            }
        }

        if let Some(p) = progress {
            p.on_row(i + 1, rows.len(), name);
        }
    }

    let pruned = if imported.is_empty() {
        0
    } else {
        if let Some(p) = progress {
            p.on_phase("Removing monsters missing from the file");
        }
        prune_monsters(conn, imported.iter().map(String::as_str))?
    };
    if pruned > 0 {
        log::info!("Pruned {} monsters no longer in the bestiary", pruned);
    }

    Ok((summary, pruned))
}

fn import_monster_row(
    conn: &Connection,
    row: &CsvRow,
    options: MonsterImportOptions,
) -> Result<(), RowError> {
    let record = monster_from_row(row, options)?;
    upsert_monster(conn, &record)?;
    Ok(())
}

/// Coerce a monster row into a record.
pub fn monster_from_row(
    row: &CsvRow,
    options: MonsterImportOptions,
) -> Result<MonsterRecord, RowError> {
    let name = row.get("name").trim().to_string();
    let monster_type = row.get("type").trim().to_string();
    if monster_type.is_empty() {
        return Err(RowError::MissingType);
    }

    let trad_raw = trimmed(row.get("trad_raw"));
    let trad_json = normalize_json(row.get("trad_json"), JsonFallback::EmptyArray);
    let image_url = monster_image_url(&name, &trad_json, trad_raw.as_deref(), row, options);

    Ok(MonsterRecord {
        name,
        monster_type,
        trad_raw,
        trad_json,
        armor_class: trimmed(row.get("ac")),
        hit_points: trimmed(row.get("hp")),
        speed: trimmed(row.get("speed")),
        scores: Abilities {
            strength: optional_int(row.get("str")),
            dexterity: optional_int(row.get("dex")),
            constitution: optional_int(row.get("con")),
            intelligence: optional_int(row.get("int")),
            wisdom: optional_int(row.get("wis")),
            charisma: optional_int(row.get("cha")),
        },
        modifiers: Abilities {
            strength: trimmed(row.get("str_mod")),
            dexterity: trimmed(row.get("dex_mod")),
            constitution: trimmed(row.get("con_mod")),
            intelligence: trimmed(row.get("int_mod")),
            wisdom: trimmed(row.get("wis_mod")),
            charisma: trimmed(row.get("cha_mod")),
        },
        details_json: normalize_json(row.get("details_json"), JsonFallback::EmptyObject),
        sections_json: normalize_json(row.get("sections_json"), JsonFallback::EmptyArray),
        description_text: trimmed(row.get("description_text")),
        image_url,
        links_json: normalize_json(row.get("links_json"), JsonFallback::EmptyArray),
    })
}

/// Resolved image URL: NPC portraits are dropped, and with inference on a
/// missing URL is guessed from the translations and the name.
fn monster_image_url(
    name: &str,
    trad_json: &str,
    trad_raw: Option<&str>,
    row: &CsvRow,
    options: MonsterImportOptions,
) -> Option<String> {
    let url = normalize_image_url(row.get("image_url"));
    if !url.is_empty() && !is_npc_image_url(&url) {
        return Some(url);
    }
    if !options.infer_images {
        return None;
    }

    let mut translations = decode_translations(Some(trad_json));
    if translations.is_empty() {
        translations = trad_raw.map(parse_translation_list).unwrap_or_default();
    }
    let inferred = infer_image_url(name, &translations, None);
    if let Some(url) = &inferred {
        log::debug!("Inferred image for '{}': {}", name, url);
    }
    inferred
}
