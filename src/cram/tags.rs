//! Tag normalization.
//!
//! Tags are free-form labels, stored lowercase and duplicate-free within a
//! record. All additions funnel through [`add_tag`] so the rules live in one
//! place; data arriving through import bypasses them on purpose.

/// Normalizes raw user input into stored tag form: trimmed, lowercased.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Appends a tag. Entries that are empty after trimming, or already present
/// after normalization, are silently dropped.
pub fn add_tag(tags: &mut Vec<String>, raw: &str) {
    let tag = normalize(raw);
    if !tag.is_empty() && !tags.contains(&tag) {
        tags.push(tag);
    }
}

/// Removes a tag by its stored (normalized) form.
pub fn remove_tag(tags: &mut Vec<String>, tag: &str) {
    tags.retain(|t| t != tag);
}
