use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered substitution cascade. Later rules rely on earlier ones having run:
/// accents must be folded before the strip rule, or the letters would vanish.
/// Only `à`/`â` fold to `a`; a comma is plain punctuation and is stripped.
static SLUG_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"[éèêë]", "e"),
        (r"[àâ]", "a"),
        (r"[^a-z0-9\s_]", ""),
        // no-op: the strip rule above already removed every hyphen
        (r"-+", "-"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        let re = Regex::new(pattern).expect("slug rule is a valid regex");
        (re, replacement)
    })
    .collect()
});

/// Lowercase, fold French accents, strip punctuation, spaces → underscores.
///
/// `slugify("Étiquette DPE") == "etiquette_dpe"`
pub fn slugify(text: &str) -> String {
    let mut slug = text.to_lowercase();
    for (re, replacement) in SLUG_RULES.iter() {
        slug = re.replace_all(&slug, *replacement).into_owned();
    }
    slug.replace(' ', "_")
}
