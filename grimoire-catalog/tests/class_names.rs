use grimoire_catalog::class_names::{
    class_display_name, normalize_class_name, normalize_subclass_name, resolve_class_name,
    split_class_list,
};

#[test]
fn rodeur_spellings_share_one_identifier() {
    for spelling in ["Rôdeur", "rodeur", "RÔDEUR", "  Rodeur "] {
        let id = normalize_class_name(spelling);
        assert_eq!(id, "rodeur", "spelling {spelling:?}");
        assert_eq!(class_display_name(&id), "Rôdeur");
    }
}

#[test]
fn warlock_alias() {
    assert_eq!(normalize_class_name("Sorcier (Occultiste)"), "occultiste");
    assert_eq!(normalize_class_name("Occultiste"), "occultiste");
    assert_eq!(class_display_name("occultiste"), "Occultiste");
}

#[test]
fn normalization_is_idempotent() {
    for name in [
        "Magicien",
        "Rôdeur",
        "Sorcier (Occultiste)",
        "Nécromancien",
        "Chevalier Runique",
        "",
    ] {
        let once = normalize_class_name(name);
        assert_eq!(normalize_class_name(&once), once, "input {name:?}");
    }
}

#[test]
fn unknown_class_falls_back_to_folded_text() {
    assert_eq!(normalize_class_name("Nécromancien"), "necromancien");
    assert_eq!(class_display_name("necromancien"), "necromancien");
    assert_eq!(resolve_class_name("Nécromancien"), None);
}

#[test]
fn known_classes_resolve() {
    assert_eq!(resolve_class_name("Magicien"), Some("magicien"));
    assert_eq!(resolve_class_name("CLERC"), Some("clerc"));
    assert_eq!(resolve_class_name("sorcier (occultiste)"), Some("occultiste"));
}

#[test]
fn subclass_slugs() {
    assert_eq!(normalize_subclass_name("Chevalier occulte"), "chevalier_occulte");
    assert_eq!(
        normalize_subclass_name("  École d'Évocation  "),
        "ecole_d_evocation"
    );
    assert_eq!(normalize_subclass_name("--Voie / du -- Totem--"), "voie_du_totem");
    assert_eq!(normalize_subclass_name("Aucune"), "aucune");
    assert_eq!(normalize_subclass_name("!!!"), "");
}

#[test]
fn subclass_slug_is_idempotent() {
    let once = normalize_subclass_name("Filou arcanique (Arcane Trickster)");
    assert_eq!(once, "filou_arcanique_arcane_trickster");
    assert_eq!(normalize_subclass_name(&once), once);
}

#[test]
fn class_list_splitting() {
    let names: Vec<_> = split_class_list(" Magicien, Occultiste ,, ").collect();
    assert_eq!(names, vec!["Magicien", "Occultiste"]);
    assert_eq!(split_class_list("").count(), 0);
}
