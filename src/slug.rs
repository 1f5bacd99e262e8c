//! Slug derivation for prepopulated slug fields.
//!
//! Folds the input to NFKD and drops what is left outside ASCII, so
//! accented letters keep their base letter. Then it lower-cases, drops
//! everything that is not a word character, whitespace or `-`, collapses
//! whitespace/hyphen runs into a single `-` and trims `-`/`_` at the edges.

use unicode_normalization::UnicodeNormalization;

use crate::error::{AppError, AppResult};

/// Width of every `slug` column.
pub const SLUG_MAX_LEN: usize = 50;

pub fn slugify(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_sep = false;

    for ch in value.nfkd().filter(char::is_ascii).map(|c| c.to_ascii_lowercase()) {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(ch);
        } else if ch == '-' || ch.is_ascii_whitespace() {
            pending_sep = true;
        }
    }

    out.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Slug derived from a name, cut to fit the column.
pub fn derive_slug(source: &str) -> String {
    let mut slug = slugify(source);
    if slug.len() > SLUG_MAX_LEN {
        // slugify output is ASCII, any byte index is a char boundary
        slug.truncate(SLUG_MAX_LEN);
        let kept = slug.trim_end_matches(|c| c == '-' || c == '_').len();
        slug.truncate(kept);
    }
    slug
}

/// Slugify an explicitly supplied slug. Too long is an error, not a cut.
pub fn explicit_slug(slug: &str) -> AppResult<String> {
    let slug = slugify(slug.trim());
    if slug.len() > SLUG_MAX_LEN {
        return Err(AppError::BadRequest(format!(
            "slug must be at most {SLUG_MAX_LEN} characters"
        )));
    }
    Ok(slug)
}

/// Use the supplied slug when it is non-blank, otherwise derive one from `source`.
pub fn slug_or_derive(slug: Option<&str>, source: &str) -> AppResult<String> {
    match slug.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => explicit_slug(s),
        None => Ok(derive_slug(source)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_names() {
        assert_eq!(slugify("Blue Pottery Vase"), "blue-pottery-vase");
        assert_eq!(slugify("West Bengal"), "west-bengal");
        assert_eq!(slugify("Kantha: Stories in Stitches"), "kantha-stories-in-stitches");
    }

    #[test]
    fn punctuation_is_dropped_without_adding_separators() {
        assert_eq!(slugify("Meera's  Studio -- Jaipur!"), "meeras-studio-jaipur");
        assert_eq!(slugify("A.B"), "ab");
    }

    #[test]
    fn edges_are_trimmed() {
        assert_eq!(slugify("  --Hello_ "), "hello");
        assert_eq!(slugify("_x_"), "x");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn diacritics_fold_to_base_letters() {
        assert_eq!(slugify("Kalā Kṛti"), "kala-krti");
        assert_eq!(slugify("Café Crème"), "cafe-creme");
        assert_eq!(slugify("Ｆｕｌｌ Width"), "full-width");
    }

    #[test]
    fn scripts_without_ascii_fold_are_dropped() {
        assert_eq!(slugify("कला Craft"), "craft");
        assert_eq!(slugify("कला"), "");
    }

    #[test]
    fn long_names_are_cut_to_the_column() {
        let name = "Hand Painted Madhubani Wedding Scroll From Darbhanga District";
        assert_eq!(slugify(name).len(), 61);

        let slug = derive_slug(name);
        assert_eq!(slug, "hand-painted-madhubani-wedding-scroll-from-darbhan");
        assert_eq!(slug.len(), SLUG_MAX_LEN);

        // a cut landing on a separator leaves no trailing hyphen
        let slug = derive_slug(&format!("{} tail", "a".repeat(SLUG_MAX_LEN - 1)));
        assert_eq!(slug, "a".repeat(SLUG_MAX_LEN - 1));
    }

    #[test]
    fn long_explicit_slug_is_rejected() {
        let too_long = "x".repeat(SLUG_MAX_LEN + 1);
        assert!(matches!(
            slug_or_derive(Some(&too_long), "Fine"),
            Err(AppError::BadRequest(_))
        ));
        let exact = "x".repeat(SLUG_MAX_LEN);
        assert_eq!(slug_or_derive(Some(&exact), "Fine").unwrap(), exact);
    }

    #[test]
    fn explicit_slug_wins_over_name() {
        assert_eq!(slug_or_derive(Some("My Slug"), "Ignored").unwrap(), "my-slug");
        assert_eq!(
            slug_or_derive(Some("   "), "Terracotta Lamp").unwrap(),
            "terracotta-lamp"
        );
        assert_eq!(slug_or_derive(None, "Terracotta Lamp").unwrap(), "terracotta-lamp");
    }
}
