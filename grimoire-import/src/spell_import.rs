//! Spell file importer.
//!
//! Every spell import replaces the spell, class and spell-class tables
//! wholesale. Only classes known to the alias table are registered; spells
//! naming other classes are still imported, without that association.

use std::collections::{BTreeMap, BTreeSet};

use grimoire_catalog::text::clean_optional;
use grimoire_catalog::types::SpellRecord;
use grimoire_catalog::values::{non_empty, optional_int, parse_leading_int};
use grimoire_catalog::{class_display_name, resolve_class_name, split_class_list};
use grimoire_db::{insert_class, insert_spell, link_spell_class, recreate_spell_tables};
use rusqlite::Connection;

use crate::error::{ImportError, RowError};
use crate::progress::ImportProgress;
use crate::reader::CsvRow;
use crate::report::ImportSummary;

const SCALING_FIELDS: [&str; 9] = [
    "Niv_1", "Niv_2", "Niv_3", "Niv_4", "Niv_5", "Niv_6", "Niv_7", "Niv_8", "Niv_9",
];

/// Import a spell file. Destroys all previously imported spells and classes.
pub fn import_spells(
    conn: &Connection,
    rows: &[CsvRow],
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportSummary, ImportError> {
    if let Some(p) = progress {
        p.on_phase("Recreating spell tables");
    }
    recreate_spell_tables(conn)?;

    let class_ids = register_classes(conn, rows)?;

    if let Some(p) = progress {
        p.on_phase(&format!("Importing {} spell rows", rows.len()));
    }

    let mut summary = ImportSummary::default();
    for (i, row) in rows.iter().enumerate() {
        let name = row.get("Nom");
        if is_header_echo(name) {
            log::debug!("Skipping spell row {} with name {:?}", i + 1, name);
        } else {
            match import_spell_row(conn, row, &class_ids) {
                Ok(()) => summary.record_success(),
                Err(e) => summary.record_error(format!("\"{name}\": {e}")),
            }
        }

        if let Some(p) = progress {
            p.on_row(i + 1, rows.len(), name);
        }
    }

    Ok(summary)
}

/// Rows without a name, or repeating the header label, are not data.
fn is_header_echo(name: &str) -> bool {
    let name = name.trim();
    name.is_empty() || name.eq_ignore_ascii_case("nom")
}

/// Insert every known class referenced by the file. Returns identifier → row id.
fn register_classes(
    conn: &Connection,
    rows: &[CsvRow],
) -> Result<BTreeMap<&'static str, i64>, ImportError> {
    let mut known = BTreeSet::new();
    let mut unknown = BTreeSet::new();
    for row in rows {
        for class in split_class_list(row.get("Classes")) {
            match resolve_class_name(class) {
                Some(id) => {
                    known.insert(id);
                }
                None => {
                    unknown.insert(class.to_string());
                }
            }
        }
    }

    for class in &unknown {
        log::warn!("Unknown class '{}' will not be linked to its spells", class);
    }

    let mut ids = BTreeMap::new();
    for id in known {
        ids.insert(id, insert_class(conn, id, class_display_name(id))?);
    }
    log::debug!("Registered {} classes", ids.len());
    Ok(ids)
}

fn import_spell_row(
    conn: &Connection,
    row: &CsvRow,
    class_ids: &BTreeMap<&'static str, i64>,
) -> Result<(), RowError> {
    let spell_id = insert_spell(conn, &spell_from_row(row))?;

    for class in split_class_list(row.get("Classes")) {
        if let Some(class_id) = resolve_class_name(class).and_then(|id| class_ids.get(id)) {
            link_spell_class(conn, spell_id, *class_id)?;
        }
    }
    Ok(())
}

/// Coerce a spell row into a record.
pub fn spell_from_row(row: &CsvRow) -> SpellRecord {
    SpellRecord {
        name: row.get("Nom").to_string(),
        level: parse_leading_int(row.get("Niveau")).unwrap_or(0),
        school: row.get("Ecole").to_string(),
        ritual: row.get("Rituel") == "Oui",
        concentration: row.get("Concentration") == "Oui",
        casting_time_value: optional_int(row.get("Temps_Valeur")),
        casting_time_unit: non_empty(row.get("Temps_Unite")),
        casting_time_condition: non_empty(row.get("Temps_Condition")),
        range_type: non_empty(row.get("Portee_Type")),
        range_value: optional_int(row.get("Portee_Valeur")),
        range_unit: non_empty(row.get("Portee_Unite")),
        range_shape: non_empty(row.get("Portee_Forme")),
        duration_type: non_empty(row.get("Duree_Type")),
        duration_value: optional_int(row.get("Duree_Valeur")),
        duration_unit: non_empty(row.get("Duree_Unite")),
        components: non_empty(row.get("Composantes")),
        materials: non_empty(row.get("Materiaux")),
        scaling: SCALING_FIELDS.map(|field| non_empty(row.get(field))),
        source: non_empty(row.get("Source")),
        description: clean_optional(row.get("Description")),
        higher_levels: clean_optional(row.get("Niveaux_Sup_Txt")),
    }
}
