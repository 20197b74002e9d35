//! Local file names for remote references.
//!
//! Names come from the last `/` segment of the reference. Two references
//! that share a last segment get the same name and overwrite each other in
//! the output directory.

/// Extension used for synthetic names when the reference carries none.
const DEFAULT_EXTENSION: &str = ".png";

/// Hex characters of the digest kept in a synthetic name.
const HASH_PREFIX_LEN: usize = 8;

/// Derive the local file name for a reference. Pure and total.
///
/// The text after the last `/` is used as-is. When that is empty or only
/// whitespace, the name is the first 8 hex characters of the MD5 of the whole
/// reference followed by the reference's own extension, or `.png`.
pub fn resolve_name(reference: &str) -> String {
    let candidate = reference.rsplit('/').next().unwrap_or_default();
    if !candidate.trim().is_empty() {
        return candidate.to_string();
    }

    let extension = trailing_extension(reference).unwrap_or(DEFAULT_EXTENSION);
    let digest = format!("{:x}", md5::compute(reference.as_bytes()));
    let stem: String = digest.chars().take(HASH_PREFIX_LEN).collect();
    return format!("{stem}{extension}");
}

/// Extension (with dot) of the last non-empty path segment, ignoring trailing
/// slashes. A segment whose only dot is its first character has none.
fn trailing_extension(reference: &str) -> Option<&str> {
    let trimmed = reference.trim_end_matches('/');
    let segment = trimmed.rsplit('/').next().unwrap_or_default();
    let dot = segment.rfind('.')?;
    if dot == 0 {
        return None;
    }
    return segment.get(dot..);
}
