use grimoire_catalog::clean_description;

#[test]
fn bold_title_with_stray_period() {
    assert_eq!(
        clean_description("**Effet**  \n  . La cible brûle."),
        "**Effet**. La cible brûle."
    );
}

#[test]
fn bullets_become_list_markers() {
    let raw = "• feu\nAu choix\n• froid\n•  acide";
    assert_eq!(clean_description(raw), "- feu\nAu choix\n- froid\n- acide");
}

#[test]
fn clean_text_is_untouched() {
    let clean = "Une flamme vive jaillit.\n\n- feu\n- froid\n\n**Aux niveaux supérieurs**. Les dégâts augmentent.";
    assert_eq!(clean_description(clean), clean);
}

#[test]
fn cleaner_is_idempotent() {
    let inputs = [
        "**Titre**\n. Suite\n\n\n\n• un\n• deux",
        "**Zone**\nune sphère\n\n\n\nfin",
        "Effets :• aveuglé\n• sourd",
        "  espaces autour  ",
        "",
    ];
    for raw in inputs {
        let once = clean_description(raw);
        assert_eq!(clean_description(&once), once, "input {raw:?}");
    }
}

#[test]
fn result_is_trimmed() {
    assert_eq!(clean_description("\n\nTexte\n\n"), "Texte");
}
