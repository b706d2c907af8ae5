//! Slug derivation for post titles.
//!
//! A slug is the stable public lookup key for a post: lowercase,
//! URL-safe, hyphen-separated. Derivation is deterministic, so the same
//! title always yields the same slug; uniqueness is enforced by the store.

/// Derive a slug from a title.
///
/// Non-alphanumeric runs collapse to a single hyphen; leading and
/// trailing hyphens are trimmed.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_title() {
        assert_eq!(slugify("Hello World!"), "hello-world");
    }

    #[test]
    fn deterministic_for_same_title() {
        assert_eq!(slugify("My First Post"), slugify("My First Post"));
        assert_eq!(slugify("My First Post"), "my-first-post");
    }

    #[test]
    fn collapses_and_trims_separators() {
        assert_eq!(slugify("  Rust -- & -- Blogs  "), "rust-blogs");
        assert_eq!(slugify("...leading and trailing..."), "leading-and-trailing");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(slugify("Top 10 Crates of 2026"), "top-10-crates-of-2026");
    }

    #[test]
    fn empty_and_symbol_only_titles() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
