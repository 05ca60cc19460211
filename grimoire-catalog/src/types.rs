//! Data model types for the spell and monster catalog.
//!
//! `*Record` types are what an importer writes; the plain types (`Spell`,
//! `Monster`, ...) are what the read queries return, carrying the database id.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::json;

// ── Classes ─────────────────────────────────────────────────────────────────

/// A character class row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterClass {
    pub id: i64,
    /// Normalized identifier (e.g., `"rodeur"`).
    pub name: String,
    /// Label shown to users (e.g., `"Rôdeur"`).
    pub display_name: String,
}

/// A subclass row, unique per (class, slug).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subclass {
    pub id: i64,
    pub class_id: i64,
    /// Slug produced by `normalize_subclass_name`.
    pub name: String,
    /// Subclass name as it appeared in the source file.
    pub display_name: String,
}

// ── Spells ──────────────────────────────────────────────────────────────────

/// One spell as written by the spell importer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpellRecord {
    pub name: String,
    /// Spell level, 0 (cantrip) through 9.
    pub level: i64,
    pub school: String,
    pub ritual: bool,
    pub concentration: bool,
    pub casting_time_value: Option<i64>,
    pub casting_time_unit: Option<String>,
    pub casting_time_condition: Option<String>,
    pub range_type: Option<String>,
    pub range_value: Option<i64>,
    pub range_unit: Option<String>,
    pub range_shape: Option<String>,
    pub duration_type: Option<String>,
    pub duration_value: Option<i64>,
    pub duration_unit: Option<String>,
    /// Component letters, e.g. `"V, S, M"`.
    pub components: Option<String>,
    pub materials: Option<String>,
    /// Per-level scaling strings, index 0 is spell level 1.
    pub scaling: [Option<String>; 9],
    pub source: Option<String>,
    pub description: Option<String>,
    pub higher_levels: Option<String>,
}

/// A stored spell with the display names of the classes that can cast it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Spell {
    pub id: i64,
    #[serde(flatten)]
    pub record: SpellRecord,
    pub classes: Vec<String>,
}

// ── Spell slots ─────────────────────────────────────────────────────────────

/// Slot progression for one (class, subclass, character level).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpellSlotRecord {
    pub class_id: i64,
    pub subclass_id: i64,
    pub character_level: i64,
    /// Slot counts for spell levels 1 through 9.
    pub slots: [i64; 9],
}

// ── Monsters ────────────────────────────────────────────────────────────────

/// The six ability values of a stat block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Abilities<T> {
    pub strength: T,
    pub dexterity: T,
    pub constitution: T,
    pub intelligence: T,
    pub wisdom: T,
    pub charisma: T,
}

/// One monster as written by the monster importer.
///
/// The `*_json` columns always hold valid JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonsterRecord {
    /// Natural key; re-importing the same name updates the row.
    pub name: String,
    pub monster_type: String,
    pub trad_raw: Option<String>,
    pub trad_json: String,
    pub armor_class: Option<String>,
    pub hit_points: Option<String>,
    pub speed: Option<String>,
    pub scores: Abilities<Option<i64>>,
    pub modifiers: Abilities<Option<String>>,
    pub details_json: String,
    pub sections_json: String,
    pub description_text: Option<String>,
    pub image_url: Option<String>,
    pub links_json: String,
}

/// A stored monster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Monster {
    pub id: i64,
    #[serde(flatten)]
    pub record: MonsterRecord,
    pub created_at: String,
    pub updated_at: String,
}

impl Monster {
    /// Decode the JSON columns into structured content.
    pub fn content(&self) -> MonsterContent {
        MonsterContent::from_columns(
            Some(&self.record.trad_json),
            Some(&self.record.details_json),
            Some(&self.record.sections_json),
            Some(&self.record.links_json),
        )
    }
}

/// An entry inside a stat block section (a trait, an action, a paragraph).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionEntry {
    pub kind: String,
    pub name: String,
    pub text: String,
}

/// A titled group of entries ("Traits", "Actions", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonsterSection {
    pub title: String,
    pub entries: Vec<SectionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonsterLink {
    pub href: String,
    pub text: String,
}

/// Structured view of a monster's JSON columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonsterContent {
    pub translations: Vec<String>,
    pub details: BTreeMap<String, String>,
    pub sections: Vec<MonsterSection>,
    pub links: Vec<MonsterLink>,
}

impl MonsterContent {
    /// Decode the stored columns. Never fails: anything malformed or of the
    /// wrong shape decodes to an empty value.
    pub fn from_columns(
        trad_json: Option<&str>,
        details_json: Option<&str>,
        sections_json: Option<&str>,
        links_json: Option<&str>,
    ) -> Self {
        Self {
            translations: json::decode_translations(trad_json),
            details: json::decode_details(details_json),
            sections: json::decode_sections(sections_json),
            links: json::decode_links(links_json),
        }
    }
}

// ── Import tracking ─────────────────────────────────────────────────────────

/// A row of the import log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportLog {
    pub id: i64,
    pub file_name: String,
    pub shape: String,
    pub records_imported: i64,
    pub row_errors: i64,
    pub imported_at: String,
}
