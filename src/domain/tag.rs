//! Tag discovery ordering.
//!
//! Build numbers only ever grow within a repository, so the tag with the
//! highest build number is the most recent build regardless of when the tag
//! object was created.

use crate::domain::BuildType;
use std::cmp::Reverse;

/// Number of candidate tags kept when no lookback is configured
pub const DEFAULT_LOOKBACK: usize = 8;

/// Whether a tag carries one of the build type markers anywhere in its name
pub fn has_build_marker(tag: &str) -> bool {
    BuildType::ALL
        .iter()
        .any(|build_type| tag.contains(build_type.as_str()))
}

/// Sort key for a tag: the number in the second-to-last `.`/`-` field.
///
/// For both `v1.2.34-dev` and `v1.2.3.34-dev` that field is the build
/// number. Fields that are not numeric give 0.
///
/// # Example
/// ```
/// # use tag_next_build::domain::tag::build_number_key;
/// assert_eq!(build_number_key("v4.14.1.384-internal"), 384);
/// assert_eq!(build_number_key("v1.0.12-dev"), 12);
/// assert_eq!(build_number_key("dev"), 0);
/// ```
pub fn build_number_key(tag: &str) -> u64 {
    let fields: Vec<&str> = tag.split(['.', '-']).collect();
    if fields.len() < 2 {
        return 0;
    }
    leading_number(fields[fields.len() - 2])
}

// numeric prefix of a field, like `sort -n` reads it
fn leading_number(field: &str) -> u64 {
    let digits: String = field.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Filter tags to build tags and rank them by build number, highest first.
///
/// Ties are broken by tag name, descending. At most `lookback` tags are
/// returned; a `lookback` of 0 still returns the top candidate.
pub fn select_recent_tags<I, S>(tags: I, lookback: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut candidates: Vec<String> = tags
        .into_iter()
        .map(Into::into)
        .filter(|tag| has_build_marker(tag))
        .collect();

    candidates.sort_by_cached_key(|tag| Reverse((build_number_key(tag), tag.clone())));
    candidates.truncate(lookback.max(1));
    candidates
}
