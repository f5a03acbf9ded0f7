//! Allow-list pattern matching
//!
//! Glob-style matching of a resource key (repository name, channel name)
//! against user-supplied allow patterns. Both key and pattern are split
//! on `/`; a match requires the same part count and every part to pass
//! the single-`*` wildcard rule. Implemented with explicit string
//! slicing — no regex engine is involved, so pattern input can never
//! trigger pathological backtracking.
//!
//! An empty pattern list means "no restriction configured": every key
//! matches.

use crate::error::{Error, Result};

/// Check if a key matches any of the allow patterns.
///
/// With an empty `patterns` slice every key matches.
pub fn matches_any_pattern(key: &str, patterns: &[String]) -> bool {
    if patterns.is_empty() {
        return true;
    }
    patterns.iter().any(|pattern| matches_pattern(key, pattern))
}

/// Check if a key matches a single pattern.
///
/// Key and pattern must have the same number of `/`-separated parts,
/// and each part must pass [`matches_wildcard`].
pub fn matches_pattern(key: &str, pattern: &str) -> bool {
    let key_parts: Vec<&str> = split_parts(key);
    let pattern_parts: Vec<&str> = split_parts(pattern);

    if key_parts.len() != pattern_parts.len() {
        return false;
    }

    key_parts
        .iter()
        .zip(pattern_parts.iter())
        .all(|(part, pat)| matches_wildcard(part, pat))
}

/// Validate allow patterns at configuration time.
///
/// Segments with more than one `*` are rejected — the matcher only
/// defines single-wildcard semantics.
pub fn validate_patterns(patterns: &[String]) -> Result<()> {
    for pattern in patterns {
        for segment in split_parts(pattern) {
            if segment.matches('*').count() > 1 {
                return Err(Error::InvalidPattern {
                    pattern: pattern.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Split on `/`, dropping empty parts (leading/trailing slashes).
fn split_parts(value: &str) -> Vec<&str> {
    value.split('/').filter(|part| !part.is_empty()).collect()
}

/// Match one segment against a pattern segment with at most one `*`.
///
/// `*` matches any non-empty segment; a trailing `*` is a prefix match,
/// a leading `*` a suffix match, and an interior `*` requires the
/// segment to carry both the prefix and the suffix without overlap.
/// Additional wildcards are not interpreted; [`validate_patterns`]
/// rejects them up front, and if one slips through only the first `*`
/// splits the pattern.
fn matches_wildcard(segment: &str, pattern: &str) -> bool {
    if pattern == segment {
        return true;
    }

    let Some(star) = pattern.find('*') else {
        return false;
    };

    if pattern == "*" {
        return !segment.is_empty();
    }

    let prefix = &pattern[..star];
    let suffix = &pattern[star + 1..];

    if suffix.is_empty() {
        return segment.len() >= prefix.len() && segment.starts_with(prefix);
    }
    if prefix.is_empty() {
        return segment.len() >= suffix.len() && segment.ends_with(suffix);
    }

    segment.len() >= prefix.len() + suffix.len()
        && segment.starts_with(prefix)
        && segment.ends_with(suffix)
}
