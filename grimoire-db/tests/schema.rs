use grimoire_catalog::types::*;
use grimoire_db::schema::{CURRENT_VERSION, create_schema};
use grimoire_db::*;

fn count(conn: &rusqlite::Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .unwrap()
}

fn table_exists(conn: &rusqlite::Connection, table: &str) -> bool {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
        [table],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn create_schema_in_memory() {
    let conn = open_memory().unwrap();
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(version, CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    create_schema(&conn).unwrap();
    assert_eq!(count(&conn, "schema_version"), 1);
}

#[test]
fn foreign_keys_enabled() {
    let conn = open_memory().unwrap();
    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    let tables = [
        "schema_version",
        "classes",
        "spells",
        "spell_classes",
        "users",
        "sessions",
        "subclasses",
        "class_spell_slots",
        "characters",
        "character_prepared_spells",
        "monsters",
        "user_favorite_monsters",
        "import_log",
    ];
    for table in tables {
        assert!(table_exists(&conn, table), "Table '{}' should exist", table);
    }
}

#[test]
fn open_database_on_disk_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grimoire.db");
    {
        let conn = open_database(&path).unwrap();
        insert_class(&conn, "barde", "Barde").unwrap();
    }
    let conn = open_database(&path).unwrap();
    assert_eq!(count(&conn, "classes"), 1);
    assert_eq!(count(&conn, "schema_version"), 1);
}

#[test]
fn recreate_spell_tables_empties_spells_and_classes() {
    let conn = open_memory().unwrap();
    let class_id = insert_class(&conn, "clerc", "Clerc").unwrap();
    let spell_id = insert_spell(
        &conn,
        &SpellRecord {
            name: "Bénédiction".to_string(),
            level: 1,
            school: "Enchantement".to_string(),
            ..Default::default()
        },
    )
    .unwrap();
    link_spell_class(&conn, spell_id, class_id).unwrap();
    insert_subclass(&conn, class_id, "domaine_de_la_vie", "Domaine de la Vie").unwrap();

    recreate_spell_tables(&conn).unwrap();

    assert_eq!(count(&conn, "spells"), 0);
    assert_eq!(count(&conn, "classes"), 0);
    assert_eq!(count(&conn, "spell_classes"), 0);
    // Dependent tables are not cleared by the drop.
    assert_eq!(count(&conn, "subclasses"), 1);

    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn ensure_monster_tables_keeps_rows() {
    let conn = open_memory().unwrap();
    upsert_monster(
        &conn,
        &MonsterRecord {
            name: "Gobelin".to_string(),
            monster_type: "Humanoïde".to_string(),
            trad_json: "[]".to_string(),
            details_json: "{}".to_string(),
            sections_json: "[]".to_string(),
            links_json: "[]".to_string(),
            ..Default::default()
        },
    )
    .unwrap();
    ensure_monster_tables(&conn).unwrap();
    assert_eq!(count(&conn, "monsters"), 1);
}
