//! Canonical identifiers for class and subclass names.
//!
//! Source files spell class names in many ways ("Rôdeur", "RODEUR",
//! "Sorcier (Occultiste)"). Every spelling is folded to lowercase without
//! diacritics, then mapped through a fixed alias table to a stable
//! identifier that the `classes.nom` column is unique on.
//!
//! ```
//! use grimoire_catalog::class_names::{class_display_name, normalize_class_name};
//!
//! assert_eq!(normalize_class_name("Rôdeur"), "rodeur");
//! assert_eq!(normalize_class_name("Sorcier (Occultiste)"), "occultiste");
//! assert_eq!(class_display_name("rodeur"), "Rôdeur");
//! ```

use unicode_normalization::UnicodeNormalization;

/// Lowercase, trim, decompose (NFD), and drop combining diacritical marks.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Map a folded name to its canonical class identifier, if it is a known class.
fn canonical_class(folded: &str) -> Option<&'static str> {
    let id = match folded {
        "artificier" => "artificier",
        "barde" => "barde",
        "clerc" => "clerc",
        "druide" => "druide",
        "ensorceleur" => "ensorceleur",
        "guerrier" => "guerrier",
        "magicien" => "magicien",
        "paladin" => "paladin",
        "roublard" => "roublard",
        // The second spelling uses a Greek omicron, which NFD leaves alone.
        "rodeur" | "r\u{03bf}deur" => "rodeur",
        "sorcier (occultiste)" | "occultiste" => "occultiste",
        _ => return None,
    };
    Some(id)
}

/// Normalize a free-text class name to its identifier.
///
/// Known aliases map to their canonical identifier; anything else becomes the
/// folded string itself. Idempotent on its own output.
pub fn normalize_class_name(name: &str) -> String {
    let folded = fold_name(name);
    match canonical_class(&folded) {
        Some(id) => id.to_string(),
        None => folded,
    }
}

/// Resolve a class name against the alias table only.
///
/// Returns `None` for names that are not a known class, where
/// [`normalize_class_name`] would fall back to the folded text.
pub fn resolve_class_name(name: &str) -> Option<&'static str> {
    canonical_class(&fold_name(name))
}

/// Display label for a class identifier. Unknown identifiers display as themselves.
pub fn class_display_name(id: &str) -> &str {
    match id {
        "artificier" => "Artificier",
        "barde" => "Barde",
        "clerc" => "Clerc",
        "druide" => "Druide",
        "ensorceleur" => "Ensorceleur",
        "guerrier" => "Guerrier",
        "magicien" => "Magicien",
        "paladin" => "Paladin",
        "roublard" => "Roublard",
        "rodeur" => "Rôdeur",
        "occultiste" => "Occultiste",
        other => other,
    }
}

/// Slug for a subclass name: folded, every non-alphanumeric run collapsed to
/// one underscore, no leading or trailing underscore.
pub fn normalize_subclass_name(name: &str) -> String {
    let folded = fold_name(name);
    let mut slug = String::with_capacity(folded.len());
    let mut pending_separator = false;

    for c in folded.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Split a comma-separated class list into trimmed, non-empty names.
pub fn split_class_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|name| !name.is_empty())
}
