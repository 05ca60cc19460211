//! Cleanup of long-form description text.
//!
//! Spell descriptions are pasted from rich-text sources and carry a few
//! recurring artifacts: a line break between a bold title and its trailing
//! period, a line break between a bold title and its lowercase continuation,
//! `•` bullets instead of Markdown list markers, and runs of blank lines.

use std::sync::LazyLock;

use regex::Regex;

static BOLD_THEN_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*\s*\n\s*\.").expect("static pattern"));

static BOLD_THEN_LOWERCASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*([^*]+)\*\*\s*\n\s*([a-zàâäéèêëïîôùûüÿç])").expect("static pattern")
});

static BULLET_AFTER_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n•\s*").expect("static pattern"));

static BULLET_AT_LINE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^•\s*").expect("static pattern"));

static BULLET_AFTER_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.:])\s*\n?•\s*").expect("static pattern"));

static EXTRA_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("static pattern"));

/// Apply the rewrites in order and trim the result.
///
/// Empty input is returned unchanged. Running the cleaner on its own output
/// is a no-op.
///
/// ```
/// use grimoire_catalog::clean_description;
///
/// assert_eq!(
///     clean_description("**Portée**\n. 9 mètres"),
///     "**Portée**. 9 mètres",
/// );
/// assert_eq!(clean_description("Choix :\n• feu\n• froid"), "Choix :\n- feu\n- froid");
/// ```
pub fn clean_description(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let cleaned = BOLD_THEN_PERIOD.replace_all(text, "**${1}**.");
    let cleaned = BOLD_THEN_LOWERCASE.replace_all(&cleaned, "**${1}**. ${2}");
    let cleaned = BULLET_AFTER_BREAK.replace_all(&cleaned, "\n- ");
    let cleaned = BULLET_AT_LINE_START.replace_all(&cleaned, "- ");
    let cleaned = BULLET_AFTER_PUNCTUATION.replace_all(&cleaned, "${1}\n- ");
    let cleaned = EXTRA_BREAKS.replace_all(&cleaned, "\n\n");

    cleaned.trim().to_string()
}

/// [`clean_description`] for an optional column: empty in, `None` out.
pub fn clean_optional(text: &str) -> Option<String> {
    let cleaned = clean_description(text);
    if cleaned.is_empty() { None } else { Some(cleaned) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_passthrough() {
        assert_eq!(clean_description(""), "");
        assert_eq!(clean_optional("   "), None);
    }

    #[test]
    fn lowercase_continuation_joins_with_period() {
        assert_eq!(
            clean_description("**Zone**\nune sphère de 6 mètres"),
            "**Zone**. une sphère de 6 mètres"
        );
    }

    #[test]
    fn uppercase_continuation_keeps_break() {
        assert_eq!(clean_description("**Zone**\nUne sphère"), "**Zone**\nUne sphère");
    }

    #[test]
    fn bullet_glued_to_colon() {
        assert_eq!(
            clean_description("les effets suivants :• aveuglé"),
            "les effets suivants :\n- aveuglé"
        );
    }

    #[test]
    fn collapses_blank_runs() {
        assert_eq!(clean_description("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(clean_description("a\n\nb"), "a\n\nb");
    }
}
