use grimoire_catalog::types::*;
use grimoire_db::*;

struct Fixture {
    conn: rusqlite::Connection,
    fireball: i64,
    cure: i64,
}

fn spell(name: &str, level: i64, school: &str) -> SpellRecord {
    SpellRecord {
        name: name.to_string(),
        level,
        school: school.to_string(),
        ..Default::default()
    }
}

fn monster(name: &str, monster_type: &str) -> MonsterRecord {
    MonsterRecord {
        name: name.to_string(),
        monster_type: monster_type.to_string(),
        trad_json: "[]".to_string(),
        details_json: "{}".to_string(),
        sections_json: r#"[{"title":"Actions","entries":[{"kind":"action","name":"Cimeterre","text":"Attaque."}]}]"#.to_string(),
        links_json: "[]".to_string(),
        ..Default::default()
    }
}

fn setup_db() -> Fixture {
    let conn = open_memory().unwrap();
    let magicien = insert_class(&conn, "magicien", "Magicien").unwrap();
    let clerc = insert_class(&conn, "clerc", "Clerc").unwrap();
    let rodeur = insert_class(&conn, "rodeur", "Rôdeur").unwrap();

    let fireball = insert_spell(&conn, &spell("Boule de feu", 3, "Évocation")).unwrap();
    link_spell_class(&conn, fireball, magicien).unwrap();
    let cure = insert_spell(&conn, &spell("Soins", 1, "Évocation")).unwrap();
    link_spell_class(&conn, cure, clerc).unwrap();
    link_spell_class(&conn, cure, rodeur).unwrap();
    let light = insert_spell(&conn, &spell("Lumière", 0, "Évocation")).unwrap();
    link_spell_class(&conn, light, clerc).unwrap();
    link_spell_class(&conn, light, magicien).unwrap();

    upsert_monster(&conn, &monster("Gobelin", "Humanoïde")).unwrap();
    upsert_monster(&conn, &monster("Orque", "Humanoïde")).unwrap();
    upsert_monster(&conn, &monster("Dragon rouge adulte", "Dragon")).unwrap();

    Fixture { conn, fireball, cure }
}

#[test]
fn search_spells_without_filter_orders_by_level() {
    let f = setup_db();
    let spells = search_spells(&f.conn, &SpellFilter::default()).unwrap();
    let names: Vec<&str> = spells.iter().map(|s| s.record.name.as_str()).collect();
    assert_eq!(names, ["Lumière", "Soins", "Boule de feu"]);
}

#[test]
fn search_spells_by_class_accepts_any_spelling() {
    let f = setup_db();
    let filter = SpellFilter {
        classes: vec!["Rôdeur".to_string()],
        ..Default::default()
    };
    let spells = search_spells(&f.conn, &filter).unwrap();
    assert_eq!(spells.len(), 1);
    assert_eq!(spells[0].id, f.cure);
    assert_eq!(spells[0].classes, ["Clerc", "Rôdeur"]);
}

#[test]
fn search_spells_combines_criteria() {
    let f = setup_db();
    let filter = SpellFilter {
        classes: vec!["magicien".to_string(), "clerc".to_string()],
        levels: vec![0, 3],
        search: Some("BOULE".to_string()),
    };
    let spells = search_spells(&f.conn, &filter).unwrap();
    assert_eq!(spells.len(), 1);
    assert_eq!(spells[0].id, f.fireball);
}

#[test]
fn unknown_class_filter_matches_nothing() {
    let f = setup_db();
    let filter = SpellFilter {
        classes: vec!["Nécromancien".to_string()],
        ..Default::default()
    };
    assert!(search_spells(&f.conn, &filter).unwrap().is_empty());
}

#[test]
fn spell_lookup_and_count() {
    let f = setup_db();
    let spell = spell_by_id(&f.conn, f.fireball).unwrap().unwrap();
    assert_eq!(spell.record.level, 3);
    assert_eq!(spell.classes, ["Magicien"]);
    assert!(spell_by_id(&f.conn, 999).unwrap().is_none());
    assert_eq!(spell_count(&f.conn).unwrap(), 3);
}

#[test]
fn levels_available_per_class() {
    let f = setup_db();
    let every: Vec<i64> = (0..=9).collect();
    assert_eq!(available_levels(&f.conn, &[]).unwrap(), every);
    assert_eq!(
        available_levels(&f.conn, &["Clerc".to_string()]).unwrap(),
        [0, 1]
    );
    assert_eq!(
        available_levels(&f.conn, &["Nécromancien".to_string()]).unwrap(),
        every
    );
}

#[test]
fn classes_sorted_by_display_name() {
    let f = setup_db();
    let classes = list_classes(&f.conn).unwrap();
    let names: Vec<&str> = classes.iter().map(|c| c.display_name.as_str()).collect();
    assert_eq!(names, ["Clerc", "Magicien", "Rôdeur"]);
}

#[test]
fn slots_for_subclass() {
    let f = setup_db();
    let ids = class_id_map(&f.conn).unwrap();
    let clerc = ids["clerc"];
    let sub = insert_subclass(&f.conn, clerc, "domaine_de_la_vie", "Domaine de la Vie").unwrap();
    for level in 1..=3 {
        insert_spell_slots(
            &f.conn,
            &SpellSlotRecord {
                class_id: clerc,
                subclass_id: sub,
                character_level: level,
                slots: [level + 1, 0, 0, 0, 0, 0, 0, 0, 0],
            },
        )
        .unwrap();
    }

    let subclasses = subclasses_for_class(&f.conn, "Clerc").unwrap();
    assert_eq!(subclasses.len(), 1);
    assert_eq!(subclasses[0].display_name, "Domaine de la Vie");

    let all = spell_slots(&f.conn, "clerc", "Domaine de la Vie", None).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[2].slots[0], 4);

    let one = spell_slots(&f.conn, "clerc", "domaine_de_la_vie", Some(2)).unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].character_level, 2);
}

#[test]
fn search_monsters_by_type_and_name() {
    let f = setup_db();
    let all = search_monsters(&f.conn, &MonsterFilter::default()).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].record.name, "Dragon rouge adulte");

    let humanoids = search_monsters(
        &f.conn,
        &MonsterFilter {
            types: vec!["Humanoïde".to_string()],
            search: Some("gob".to_string()),
        },
    )
    .unwrap();
    assert_eq!(humanoids.len(), 1);
    assert_eq!(humanoids[0].record.name, "Gobelin");
}

#[test]
fn monster_lookup_decodes_content() {
    let f = setup_db();
    let goblin = monster_by_name(&f.conn, "Gobelin").unwrap().unwrap();
    let same = monster_by_id(&f.conn, goblin.id).unwrap().unwrap();
    assert_eq!(same.record, goblin.record);

    let content = goblin.content();
    assert_eq!(content.sections.len(), 1);
    assert_eq!(content.sections[0].entries[0].name, "Cimeterre");
    assert_eq!(monster_count(&f.conn).unwrap(), 3);
    assert_eq!(monster_types(&f.conn).unwrap(), ["Dragon", "Humanoïde"]);
}

#[test]
fn per_user_lists() {
    let f = setup_db();
    let user = insert_user(&f.conn, "mj@example.org", "hash", None).unwrap();
    let orc = monster_by_name(&f.conn, "Orque").unwrap().unwrap();
    add_favorite_monster(&f.conn, user, orc.id).unwrap();
    assert_eq!(favorite_monster_ids(&f.conn, user).unwrap(), [orc.id]);
    assert_eq!(favorite_monsters(&f.conn, user).unwrap()[0].record.name, "Orque");

    let clerc = class_id_map(&f.conn).unwrap()["clerc"];
    let character = insert_character(&f.conn, user, "Ysolde", clerc, None, 1).unwrap();
    add_prepared_spell(&f.conn, character, f.cure).unwrap();
    assert_eq!(prepared_spell_ids(&f.conn, character).unwrap(), [f.cure]);
    let prepared = prepared_spells(&f.conn, character).unwrap();
    assert_eq!(prepared[0].classes, ["Clerc", "Rôdeur"]);
}

#[test]
fn stats_count_every_table() {
    let f = setup_db();
    let stats = catalog_stats(&f.conn).unwrap();
    assert_eq!(stats.classes, 3);
    assert_eq!(stats.spells, 3);
    assert_eq!(stats.spell_classes, 5);
    assert_eq!(stats.monsters, 3);
    assert_eq!(stats.subclasses, 0);
}
