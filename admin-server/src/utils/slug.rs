//! Slug derivation
//!
//! URL-safe identifiers derived from category names when the client
//! does not supply one.

/// Derive a URL-safe slug from a display name.
///
/// Lowercases, replaces runs of non-alphanumeric characters with a
/// single `-`, and trims leading/trailing dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true; // suppress leading dash

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}
