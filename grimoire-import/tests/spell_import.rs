use grimoire_db::*;
use grimoire_import::*;

fn count(conn: &rusqlite::Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .unwrap()
}

fn import(conn: &rusqlite::Connection, csv: &str) -> ImportOutcome {
    import_csv(conn, csv.as_bytes(), &ImportOptions::default(), None).unwrap()
}

const HEADER: &str = "Nom,Niveau,Ecole,Rituel,Concentration,Temps_Valeur,Temps_Unite,Portee_Valeur,Niv_2,Classes,Description";

#[test]
fn header_echo_is_skipped_and_classes_linked() {
    let conn = open_memory().unwrap();
    let csv = format!(
        "{HEADER}\n\
         Boule de feu,3,Évocation,Non,Non,1,action,45,,\"Magicien,Occultiste\",Une explosion.\n\
         Nom,Niveau,Ecole,Rituel,Concentration,Temps_Valeur,Temps_Unite,Portee_Valeur,Niv_2,Classes,Description\n"
    );
    let outcome = import(&conn, &csv);

    assert_eq!(outcome.shape, CsvShape::Spells);
    assert_eq!(outcome.summary.imported, 1);
    assert_eq!(outcome.summary.errors, 0);
    assert_eq!(count(&conn, "spells"), 1);
    assert_eq!(count(&conn, "spell_classes"), 2);
    assert_eq!(
        outcome.message(),
        "Base de donnees mise a jour avec succes ! 1 sorts importes."
    );
}

#[test]
fn fields_are_coerced() {
    let conn = open_memory().unwrap();
    let csv = format!(
        "{HEADER}\n\
         Détection de la magie,1,Divination,Oui,Oui,,action,abc,niv2 text,Barde,\"**Rituel**\nlancé.\"\n"
    );
    import(&conn, &csv);

    let spells = search_spells(&conn, &SpellFilter::default()).unwrap();
    let spell = &spells[0].record;
    assert_eq!(spell.level, 1);
    assert!(spell.ritual);
    assert!(spell.concentration);
    assert_eq!(spell.casting_time_value, None);
    assert_eq!(spell.casting_time_unit.as_deref(), Some("action"));
    assert_eq!(spell.range_value, None);
    assert_eq!(spell.scaling[1].as_deref(), Some("niv2 text"));
    assert_eq!(spell.scaling[0], None);
    assert_eq!(spell.materials, None);
    assert_eq!(spell.description.as_deref(), Some("**Rituel**. lancé."));
}

#[test]
fn unknown_class_is_not_fatal() {
    let conn = open_memory().unwrap();
    let csv = format!(
        "{HEADER}\n\
         Animation des morts,3,Nécromancie,Non,Non,1,minute,3,,\"Nécromancien, Clerc\",\n\
         Rayon de givre,0,Évocation,Non,Non,1,action,18,,Nécromancien,\n"
    );
    let outcome = import(&conn, &csv);

    assert_eq!(outcome.summary.imported, 2);
    assert_eq!(outcome.summary.errors, 0);
    assert_eq!(count(&conn, "spells"), 2);
    assert_eq!(count(&conn, "classes"), 1);
    assert_eq!(count(&conn, "spell_classes"), 1);
}

#[test]
fn class_aliases_resolve() {
    let conn = open_memory().unwrap();
    let csv = format!(
        "{HEADER}\n\
         Soins,1,Évocation,Non,Non,1,action,0,,\"RÔDEUR, Sorcier (Occultiste), rodeur\",\n"
    );
    import(&conn, &csv);

    let spell = &search_spells(&conn, &SpellFilter::default()).unwrap()[0];
    assert_eq!(spell.classes, ["Occultiste", "Rôdeur"]);
}

#[test]
fn reimport_replaces_everything() {
    let conn = open_memory().unwrap();
    import(
        &conn,
        &format!("{HEADER}\nSoins,1,Évocation,Non,Non,1,action,0,,Clerc,\nLumière,0,Évocation,Non,Non,1,action,0,,Clerc,\n"),
    );
    assert_eq!(count(&conn, "spells"), 2);

    import(
        &conn,
        &format!("{HEADER}\nBouclier,1,Abjuration,Non,Non,1,réaction,0,,Magicien,\n"),
    );
    assert_eq!(count(&conn, "spells"), 1);
    let classes = list_classes(&conn).unwrap();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].name, "magicien");
}

#[test]
fn unrecognised_headers_import_as_spells() {
    let conn = open_memory().unwrap();
    let outcome = import(&conn, "Titre;Auteur\nA;B\n");
    assert_eq!(outcome.shape, CsvShape::Spells);
    // No Nom column: every row is treated as a header echo.
    assert_eq!(outcome.summary.imported, 0);
    assert_eq!(count(&conn, "spells"), 0);
}
