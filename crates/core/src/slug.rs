//! URL slug generation for categories, tags, posts, and services.

use crate::error::CoreError;

/// Maximum slug length accepted by the content tables.
pub const MAX_SLUG_LENGTH: usize = 120;

/// Generate a URL slug from a display name.
///
/// Lowercases ASCII letters, keeps digits, and collapses every other run of
/// characters into a single `-`. Leading and trailing separators are dropped.
///
/// # Examples
///
/// ```
/// use folio_core::slug::slugify;
///
/// assert_eq!(slugify("Company News"), "company-news");
/// assert_eq!(slugify("  Rust & Postgres!  "), "rust-postgres");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Validate that `slug` is non-empty, within length limits, and only contains
/// lowercase ASCII letters, digits, and single interior hyphens.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".to_string()));
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Slug '{slug}' exceeds {MAX_SLUG_LENGTH} characters"
        )));
    }
    let well_formed = slug.split('-').all(|part| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    });
    if !well_formed {
        return Err(CoreError::Validation(format!(
            "Slug '{slug}' must contain only lowercase letters, digits, and single hyphens"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_punctuation_runs() {
        assert_eq!(slugify("UI / UX -- Design"), "ui-ux-design");
    }

    #[test]
    fn slugify_drops_non_ascii() {
        assert_eq!(slugify("Café Menu"), "caf-menu");
    }

    #[test]
    fn slugify_of_symbols_only_is_empty() {
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn generated_slugs_validate() {
        for name in ["Engineering", "Company News", "Rust 2024 Edition"] {
            assert!(validate_slug(&slugify(name)).is_ok(), "{name}");
        }
    }

    #[test]
    fn empty_slug_rejected() {
        let err = validate_slug("").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn double_hyphen_rejected() {
        assert!(validate_slug("rust--postgres").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("Upper").is_err());
    }

    #[test]
    fn overlong_slug_rejected() {
        let slug = "a".repeat(MAX_SLUG_LENGTH + 1);
        let err = validate_slug(&slug).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }
}
