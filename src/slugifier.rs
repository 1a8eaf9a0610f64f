/*!
 * Slug normalization.
 *
 * Turns arbitrary text into the `[a-z0-9-]` alphabet used for content URLs.
 * Characters outside ASCII are dropped rather than transliterated, so a title
 * that was not translated into a Latin-script language may normalize to an
 * empty string. Callers treat an empty result as "no slug produced".
 *
 * Unicode whitespace such as U+00A0 or U+3000 is not dropped with the other
 * non-ASCII characters: it counts as a separator and becomes a hyphen.
 */

use once_cell::sync::Lazy;
use regex::Regex;

// Anything that is not a lowercase ASCII letter, digit, whitespace or hyphen
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").unwrap());

static SEPARATOR_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s-]+").unwrap());

/// Normalize text into a slug.
///
/// Steps: ASCII lowercase, drop disallowed characters, trim, then collapse
/// each run of whitespace and hyphens into one hyphen. A hyphen left at either
/// end is removed.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_ascii_lowercase();
    let filtered = DISALLOWED.replace_all(&lowered, "");
    let collapsed = SEPARATOR_RUN.replace_all(filtered.trim(), "-");
    collapsed.trim_matches('-').to_string()
}

/// Check that a string is a well-formed slug: non-empty, lowercase ASCII
/// letters and digits separated by single hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
