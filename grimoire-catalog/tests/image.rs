use grimoire_catalog::image::{
    image_slug_candidates, infer_image_url, is_npc_image_url, normalize_image_url, slugify,
};

#[test]
fn relative_urls_resolve_against_base() {
    assert_eq!(
        normalize_image_url(" images/gobelin.jpg "),
        "https://www.aidedd.org/dnd/images/gobelin.jpg"
    );
    assert_eq!(
        normalize_image_url("../img/x.png"),
        "https://www.aidedd.org/img/x.png"
    );
    assert_eq!(
        normalize_image_url("/dnd/images/a.jpg"),
        "https://www.aidedd.org/dnd/images/a.jpg"
    );
    assert_eq!(
        normalize_image_url("https://cdn.example.org/a.jpg"),
        "https://cdn.example.org/a.jpg"
    );
    assert_eq!(normalize_image_url("   "), "");
}

#[test]
fn absolute_urls_keep_their_host() {
    assert_eq!(
        normalize_image_url("HTTPS://cdn.example.org/a.jpg"),
        "https://cdn.example.org/a.jpg"
    );
    assert_eq!(normalize_image_url("ftp://x.org/a.jpg"), "ftp://x.org/a.jpg");
    assert_eq!(
        normalize_image_url("//cdn.example.org/b.png"),
        "https://cdn.example.org/b.png"
    );
}

#[test]
fn dot_segments_and_spaces_are_resolved() {
    assert_eq!(
        normalize_image_url("images/../monstres/a.jpg"),
        "https://www.aidedd.org/dnd/monstres/a.jpg"
    );
    assert_eq!(
        normalize_image_url("./images/./b.jpg"),
        "https://www.aidedd.org/dnd/images/b.jpg"
    );
    assert_eq!(
        normalize_image_url("images/Goblin Boss.jpg"),
        "https://www.aidedd.org/dnd/images/Goblin%20Boss.jpg"
    );
}

#[test]
fn npc_urls_are_detected() {
    assert!(is_npc_image_url("https://www.aidedd.org/dnd/images/PNJ/garde.jpg"));
    assert!(!is_npc_image_url("https://www.aidedd.org/dnd/images/goblin.jpg"));
}

#[test]
fn explicit_url_wins() {
    let url = infer_image_url("Gobelin", &[], Some("images/goblin.jpg"));
    assert_eq!(url.as_deref(), Some("https://www.aidedd.org/dnd/images/goblin.jpg"));
}

#[test]
fn npc_explicit_url_is_replaced_by_inference() {
    let url = infer_image_url("Garde", &["Guard".to_string()], Some("images/pnj/guard.jpg"));
    assert_eq!(url.as_deref(), Some("https://www.aidedd.org/dnd/images/guard.jpg"));
}

#[test]
fn candidates_are_ordered_and_unique() {
    let candidates = image_slug_candidates(
        "Gobelin",
        &["Goblin".to_string(), "goblin".to_string()],
        None,
    );
    assert_eq!(candidates, vec!["goblin", "gobelin"]);
}

#[test]
fn empty_name_infers_nothing() {
    assert_eq!(infer_image_url("", &[], None), None);
    assert_eq!(slugify("  --  "), "");
}
