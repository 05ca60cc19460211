//! SQLite persistence layer for the spell and monster catalog.
//!
//! Provides schema creation, write operations, and query APIs
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    OperationError, add_favorite_monster, add_prepared_spell, class_id_map,
    clear_class_progression, delete_monster, insert_character, insert_class, insert_import_log,
    insert_spell, insert_spell_slots, insert_subclass, insert_user, is_favorite_monster,
    is_spell_prepared, link_spell_class, prune_monsters, remove_favorite_monster,
    remove_prepared_spell, toggle_favorite_monster, toggle_prepared_spell, upsert_monster,
};
pub use queries::{
    CatalogStats, MonsterFilter, SpellFilter, available_levels, catalog_stats,
    favorite_monster_ids, favorite_monsters, list_classes, list_import_logs, monster_by_id,
    monster_by_name, monster_count, monster_types, prepared_spell_ids, prepared_spells,
    search_monsters, search_spells, spell_by_id, spell_count, spell_slots, subclasses_for_class,
};
pub use schema::{
    SchemaError, ensure_monster_tables, open_database, open_memory, recreate_spell_tables,
};
