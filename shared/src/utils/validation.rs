//! Role name validation

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length of a role name
pub const ROLE_NAME_MAX_LENGTH: usize = 64;

/// No surrounding whitespace, no commas, no control characters.
/// Commas are reserved as the separator of joined role lists.
static ROLE_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s,\p{Cc}](?:[^,\p{Cc}]*[^\s,\p{Cc}])?$").expect("valid role name pattern")
});

/// Check whether `name` is an acceptable role name
///
/// Length is counted in characters.
pub fn is_valid_role_name(name: &str) -> bool {
    let length = name.chars().count();
    length > 0 && length <= ROLE_NAME_MAX_LENGTH && ROLE_NAME_PATTERN.is_match(name)
}
