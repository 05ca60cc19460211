//! Monster image URL cleanup and inference.
//!
//! Bestiary exports reference images on aidedd.org, sometimes by relative
//! path, sometimes not at all. Images live at `images/<slug>.jpg`, where the
//! slug is usually derived from the English name in the translation list.
//! NPC portraits (`/pnj/`) are generic and never kept.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::class_names::fold_name;

/// Base URL relative image paths are resolved against.
pub const IMAGE_BASE_URL: &str = "https://www.aidedd.org/dnd/";

static IMAGE_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse(IMAGE_BASE_URL).expect("static url"));

static DRAGON_EN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:adult|young|ancient|wyrmling)-(.+)-dragon$").expect("static pattern")
});

static DRAGON_FR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^dragon-([a-z0-9-]+)-(?:adulte|jeune|venerable|ancien|antique|dragonet)$")
        .expect("static pattern")
});

/// URL-safe slug: folded, non-alphanumeric runs become `-`.
///
/// ```
/// use grimoire_catalog::image::slugify;
///
/// assert_eq!(slugify("Dragon rouge  adulte"), "dragon-rouge-adulte");
/// assert_eq!(slugify("Élémentaire d'eau"), "elementaire-d-eau");
/// ```
pub fn slugify(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let folded = fold_name(&collapsed);
    let mut slug = String::with_capacity(folded.len());
    let mut pending_dash = false;

    for c in folded.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Trim an image URL and resolve it against [`IMAGE_BASE_URL`], the way a
/// browser resolves an `<img src>` on that page. Text that does not resolve
/// is kept trimmed.
///
/// ```
/// use grimoire_catalog::image::normalize_image_url;
///
/// assert_eq!(
///     normalize_image_url("images/Goblin Boss.jpg"),
///     "https://www.aidedd.org/dnd/images/Goblin%20Boss.jpg"
/// );
/// ```
pub fn normalize_image_url(raw: &str) -> String {
    let url = raw.trim();
    if url.is_empty() {
        return String::new();
    }
    IMAGE_BASE
        .join(url)
        .map(String::from)
        .unwrap_or_else(|_| url.to_string())
}

/// True for NPC portrait URLs, which are never used as monster images.
pub fn is_npc_image_url(url: &str) -> bool {
    url.to_ascii_lowercase().contains("/pnj/")
}

/// The file name of a URL without its extension (`.../images/goblin.jpg` → `goblin`).
fn file_stem(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let (_, file) = path.rsplit_once('/')?;
    let (stem, ext) = file.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        None
    } else {
        Some(stem)
    }
}

/// Slugs an aged dragon variant shares with its colour (`adult-red-dragon` → `red-dragon`).
pub fn canonical_slugs(text: &str) -> Vec<String> {
    let slug = slugify(text);
    if slug.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::new();
    if let Some(c) = DRAGON_EN.captures(&slug) {
        out.push(format!("{}-dragon", &c[1]));
    }
    if let Some(c) = DRAGON_FR.captures(&slug) {
        out.push(format!("{}-dragon", &c[1]));
    }
    out
}

/// Candidate image slugs, most likely first, without duplicates.
pub fn image_slug_candidates(
    name: &str,
    translations: &[String],
    explicit_url: Option<&str>,
) -> Vec<String> {
    let mut values = Vec::new();
    if let Some(stem) = explicit_url.and_then(file_stem) {
        values.push(stem.to_string());
    }
    for translation in translations {
        values.extend(canonical_slugs(translation));
        values.push(slugify(translation));
    }
    values.extend(canonical_slugs(name));
    values.push(slugify(name));

    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|v| !v.is_empty() && seen.insert(v.clone()))
        .collect()
}

/// Best image URL for a monster: the explicit URL when usable, otherwise the
/// first inferred candidate.
///
/// ```
/// use grimoire_catalog::image::infer_image_url;
///
/// let url = infer_image_url("Dragon rouge adulte", &["Adult Red Dragon".to_string()], None);
/// assert_eq!(url.as_deref(), Some("https://www.aidedd.org/dnd/images/red-dragon.jpg"));
/// ```
pub fn infer_image_url(
    name: &str,
    translations: &[String],
    explicit_url: Option<&str>,
) -> Option<String> {
    let explicit = explicit_url
        .map(normalize_image_url)
        .filter(|url| !url.is_empty() && !is_npc_image_url(url));
    if explicit.is_some() {
        return explicit;
    }

    image_slug_candidates(name, translations, explicit_url)
        .into_iter()
        .map(|slug| format!("{IMAGE_BASE_URL}images/{slug}.jpg"))
        .find(|url| !is_npc_image_url(url))
}
