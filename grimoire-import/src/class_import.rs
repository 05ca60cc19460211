//! Class and spell-slot file importer.
//!
//! Subclasses and slot rows are cleared and rebuilt on every import. Classes
//! are only ever added.

use std::collections::{BTreeMap, HashMap, HashSet};

use grimoire_catalog::types::SpellSlotRecord;
use grimoire_catalog::values::int_or;
use grimoire_catalog::{class_display_name, normalize_class_name, normalize_subclass_name};
use grimoire_db::{
    class_id_map, clear_class_progression, insert_class, insert_spell_slots, insert_subclass,
};
use rusqlite::Connection;

use crate::error::{ImportError, RowError};
use crate::progress::ImportProgress;
use crate::reader::CsvRow;
use crate::report::ImportSummary;

const SLOT_FIELDS: [&str; 9] = [
    "Niv_1", "Niv_2", "Niv_3", "Niv_4", "Niv_5", "Niv_6", "Niv_7", "Niv_8", "Niv_9",
];

/// (normalized class, subclass slug)
type SubclassKey = (String, String);

fn subclass_key(row: &CsvRow) -> SubclassKey {
    (
        normalize_class_name(row.get("Classe")),
        normalize_subclass_name(row.get("Sous_Classe")),
    )
}

/// Import a class/slot file. Returns the row summary and the number of
/// distinct subclasses registered.
pub fn import_classes(
    conn: &Connection,
    rows: &[CsvRow],
    progress: Option<&dyn ImportProgress>,
) -> Result<(ImportSummary, usize), ImportError> {
    if let Some(p) = progress {
        p.on_phase("Clearing subclasses and spell slots");
    }
    clear_class_progression(conn)?;

    let mut class_ids = class_id_map(conn)?;

    // Distinct classes and (class, subclass) pairs, pairs in first-seen order.
    // Empty names are registered like any other.
    let mut classes = BTreeMap::new();
    let mut seen: HashSet<SubclassKey> = HashSet::new();
    let mut subclasses: Vec<(SubclassKey, String)> = Vec::new();
    for row in rows {
        let key = subclass_key(row);
        classes
            .entry(key.0.clone())
            .or_insert_with(|| class_display_name(&key.0).to_string());
        if seen.insert(key.clone()) {
            subclasses.push((key, row.get("Sous_Classe").to_string()));
        }
    }

    for (name, display) in &classes {
        if !class_ids.contains_key(name) {
            let id = insert_class(conn, name, display)?;
            log::debug!("Added class '{}'", name);
            class_ids.insert(name.clone(), id);
        }
    }

    let mut subclass_ids: HashMap<SubclassKey, i64> = HashMap::new();
    for (key, display) in &subclasses {
        if let Some(class_id) = class_ids.get(&key.0) {
            let id = insert_subclass(conn, *class_id, &key.1, display)?;
            subclass_ids.insert(key.clone(), id);
        }
    }

    if let Some(p) = progress {
        p.on_phase(&format!(
            "Importing {} spell slot rows for {} subclasses",
            rows.len(),
            subclass_ids.len()
        ));
    }

    let mut summary = ImportSummary::default();
    for (i, row) in rows.iter().enumerate() {
        match import_slot_row(conn, row, &class_ids, &subclass_ids) {
            Ok(()) => summary.record_success(),
            Err(e @ (RowError::UnknownClass(_) | RowError::UnknownSubclass(_))) => {
                summary.record_error(e.to_string())
            }
            Err(e) => summary.record_error(format!(
                "{} {} niv.{}: {}",
                row.get("Classe"),
                row.get("Sous_Classe"),
                row.get("Niveau"),
                e
            )),
        }

        if let Some(p) = progress {
            p.on_row(i + 1, rows.len(), row.get("Sous_Classe"));
        }
    }

    Ok((summary, subclasses.len()))
}

fn import_slot_row(
    conn: &Connection,
    row: &CsvRow,
    class_ids: &HashMap<String, i64>,
    subclass_ids: &HashMap<SubclassKey, i64>,
) -> Result<(), RowError> {
    let key = subclass_key(row);
    let class_id = *class_ids
        .get(&key.0)
        .ok_or_else(|| RowError::UnknownClass(row.get("Classe").to_string()))?;
    let subclass_id = *subclass_ids
        .get(&key)
        .ok_or_else(|| RowError::UnknownSubclass(row.get("Sous_Classe").to_string()))?;

    insert_spell_slots(
        conn,
        &SpellSlotRecord {
            class_id,
            subclass_id,
            character_level: int_or(row.get("Niveau"), 1),
            slots: SLOT_FIELDS.map(|field| int_or(row.get(field), 0)),
        },
    )?;
    Ok(())
}
