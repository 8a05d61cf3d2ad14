//! Slug and list helpers for free-text form input.

/// Turn free text into a URL slug.
///
/// Lower-cases the input, collapses every run of characters outside
/// `[a-z0-9]` into a single `-`, and trims dashes from both ends.
///
/// ```
/// use storeroom_core::slugify;
///
/// assert_eq!(slugify("Premium T-Shirt (HK)"), "premium-t-shirt-hk");
/// assert_eq!(slugify(""), "");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars().flat_map(char::to_lowercase) {
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

/// Split a comma-separated input into trimmed, non-empty entries.
///
/// ```
/// use storeroom_core::split_list;
///
/// assert_eq!(split_list(" cotton, ,tee,"), vec!["cotton", "tee"]);
/// ```
#[must_use]
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}
