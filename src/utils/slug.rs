//! # Company Code Slugs
//!
//! When a company is created without an explicit `code`, one is derived
//! from its name.

use std::sync::LazyLock;

use regex::Regex;

/// Runs of characters that are not ASCII letters or digits.
static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("Failed to compile slug regex"));

/// Lowercases `name` and joins its alphanumeric runs with `-`.
///
/// # Examples
///
/// - `"Apple Inc."` → `"apple-inc"`
/// - `"  IBM  "` → `"ibm"`
/// - `"!!!"` → `""`
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_owned()
}
