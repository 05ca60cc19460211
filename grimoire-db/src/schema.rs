//! SQLite schema creation and migration.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Migration error: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 1;

/// Create all tables and indexes if they don't exist.
///
/// Idempotent: safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_VERSION_SQL)?;
    conn.execute_batch(SPELL_TABLES_SQL)?;
    conn.execute_batch(ACCOUNT_TABLES_SQL)?;
    conn.execute_batch(CLASS_PROGRESSION_SQL)?;
    conn.execute_batch(MONSTER_TABLES_SQL)?;
    conn.execute_batch(IMPORT_LOG_SQL)?;
    if get_schema_version(conn)? < CURRENT_VERSION {
        set_schema_version(conn, CURRENT_VERSION)?;
    }
    Ok(())
}

/// Open or create a grimoire database at the given path.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    let version = get_schema_version(&conn)?;
    if version == 0 {
        create_schema(&conn)?;
    } else if version != CURRENT_VERSION {
        migrate(&conn, version)?;
    }

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Drop and recreate `spell_classes`, `spells` and `classes`.
///
/// Foreign key enforcement is switched off for the drop so rows in other
/// tables that point at classes or spells do not block it; those references
/// are left dangling. This must not run inside a transaction, where SQLite
/// ignores the pragma.
pub fn recreate_spell_tables(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(
        "PRAGMA foreign_keys=OFF;
         DROP TABLE IF EXISTS spell_classes;
         DROP TABLE IF EXISTS spells;
         DROP TABLE IF EXISTS classes;",
    )?;
    let created = conn.execute_batch(SPELL_TABLES_SQL);
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    created?;
    Ok(())
}

/// Create the monster and favorite tables if they are missing. Existing rows are kept.
pub fn ensure_monster_tables(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(MONSTER_TABLES_SQL)?;
    Ok(())
}

/// Get the current schema version, or 0 if no schema exists.
fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Record a schema version.
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Run migrations from `from_version` up to `CURRENT_VERSION`.
fn migrate(conn: &Connection, from_version: i32) -> Result<(), SchemaError> {
    if from_version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: from_version,
        });
    }

    // No migrations yet; bring any missing tables up to date.
    create_schema(conn)
}

const SCHEMA_VERSION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

/// Tables replaced wholesale by a spell import.
const SPELL_TABLES_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS classes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nom TEXT NOT NULL UNIQUE,
    nom_affich TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS spells (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nom TEXT NOT NULL,
    niveau INTEGER NOT NULL DEFAULT 0,
    ecole TEXT NOT NULL,
    rituel BOOLEAN NOT NULL DEFAULT 0,
    concentration BOOLEAN NOT NULL DEFAULT 0,
    temps_valeur INTEGER,
    temps_unite TEXT,
    temps_condition TEXT,
    portee_type TEXT,
    portee_valeur INTEGER,
    portee_unite TEXT,
    portee_forme TEXT,
    duree_type TEXT,
    duree_valeur INTEGER,
    duree_unite TEXT,
    composantes TEXT,
    materiaux TEXT,
    niv_1 TEXT,
    niv_2 TEXT,
    niv_3 TEXT,
    niv_4 TEXT,
    niv_5 TEXT,
    niv_6 TEXT,
    niv_7 TEXT,
    niv_8 TEXT,
    niv_9 TEXT,
    source TEXT,
    description TEXT,
    niveaux_sup_txt TEXT
);
CREATE INDEX IF NOT EXISTS idx_spells_niveau ON spells(niveau);
CREATE INDEX IF NOT EXISTS idx_spells_ecole ON spells(ecole);
CREATE INDEX IF NOT EXISTS idx_spells_niveau_ecole ON spells(niveau, ecole);

CREATE TABLE IF NOT EXISTS spell_classes (
    spell_id INTEGER NOT NULL REFERENCES spells(id) ON DELETE CASCADE,
    class_id INTEGER NOT NULL REFERENCES classes(id) ON DELETE CASCADE,
    PRIMARY KEY (spell_id, class_id)
);
CREATE INDEX IF NOT EXISTS idx_spell_classes_class ON spell_classes(class_id);
"#;

const ACCOUNT_TABLES_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    display_name TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS sessions (
    id TEXT PRIMARY KEY,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    expires_at TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id);
"#;

const CLASS_PROGRESSION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS subclasses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    class_id INTEGER NOT NULL REFERENCES classes(id) ON DELETE CASCADE,
    nom TEXT NOT NULL,
    nom_affich TEXT NOT NULL,
    UNIQUE(class_id, nom)
);

CREATE TABLE IF NOT EXISTS class_spell_slots (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    class_id INTEGER NOT NULL REFERENCES classes(id) ON DELETE CASCADE,
    subclass_id INTEGER REFERENCES subclasses(id) ON DELETE CASCADE,
    character_level INTEGER NOT NULL,
    slot_level_1 INTEGER NOT NULL DEFAULT 0,
    slot_level_2 INTEGER NOT NULL DEFAULT 0,
    slot_level_3 INTEGER NOT NULL DEFAULT 0,
    slot_level_4 INTEGER NOT NULL DEFAULT 0,
    slot_level_5 INTEGER NOT NULL DEFAULT 0,
    slot_level_6 INTEGER NOT NULL DEFAULT 0,
    slot_level_7 INTEGER NOT NULL DEFAULT 0,
    slot_level_8 INTEGER NOT NULL DEFAULT 0,
    slot_level_9 INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_slots_class ON class_spell_slots(class_id);
CREATE INDEX IF NOT EXISTS idx_slots_subclass ON class_spell_slots(subclass_id);
CREATE INDEX IF NOT EXISTS idx_slots_level ON class_spell_slots(character_level);

CREATE TABLE IF NOT EXISTS characters (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    class_id INTEGER NOT NULL REFERENCES classes(id),
    subclass_id INTEGER REFERENCES subclasses(id) ON DELETE SET NULL,
    level INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE INDEX IF NOT EXISTS idx_characters_user ON characters(user_id);

CREATE TABLE IF NOT EXISTS character_prepared_spells (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    character_id INTEGER NOT NULL REFERENCES characters(id) ON DELETE CASCADE,
    spell_id INTEGER NOT NULL REFERENCES spells(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE(character_id, spell_id)
);
"#;

/// Tables a monster import creates on demand but never drops.
const MONSTER_TABLES_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS monsters (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    type TEXT NOT NULL,
    trad_raw TEXT,
    trad_json TEXT,
    ac TEXT,
    hp TEXT,
    speed TEXT,
    str INTEGER,
    dex INTEGER,
    con INTEGER,
    "int" INTEGER,
    wis INTEGER,
    cha INTEGER,
    str_mod TEXT,
    dex_mod TEXT,
    con_mod TEXT,
    int_mod TEXT,
    wis_mod TEXT,
    cha_mod TEXT,
    details_json TEXT NOT NULL,
    sections_json TEXT NOT NULL,
    description_text TEXT,
    image_url TEXT,
    links_json TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE INDEX IF NOT EXISTS idx_monsters_type ON monsters(type);

CREATE TABLE IF NOT EXISTS user_favorite_monsters (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    monster_id INTEGER NOT NULL REFERENCES monsters(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE(user_id, monster_id)
);
CREATE INDEX IF NOT EXISTS idx_favorites_monster ON user_favorite_monsters(monster_id);
"#;

const IMPORT_LOG_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS import_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    file_name TEXT NOT NULL,
    shape TEXT NOT NULL,
    records_imported INTEGER NOT NULL DEFAULT 0,
    row_errors INTEGER NOT NULL DEFAULT 0,
    imported_at TEXT NOT NULL
);
"#;
