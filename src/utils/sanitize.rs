// src/utils/sanitize.rs

use regex::Regex;
use std::sync::LazyLock;

/// Characters the results store does not allow in path segment keys.
static RESERVED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.#$/\[\]]").expect("reserved character class is valid"));

/// Replaces every store-reserved character (`. # $ / [ ]`) with `-` so the
/// string can be used as a path segment. No other character is altered.
pub fn sanitize_key(raw: &str) -> String {
    RESERVED.replace_all(raw, "-").into_owned()
}
