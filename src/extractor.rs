//! Embedded image reference extraction from markdown text.

use std::sync::LazyLock;

use regex::Regex;

/// `![alt](reference)` with non-greedy alt and reference segments.
/// Neither segment crosses a line terminator, `\r` included.
#[allow(clippy::expect_used, reason = "hardcoded pattern, checked by tests")]
static IMAGE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"!\[[^\r\n\x{2028}\x{2029}]*?\]\(([^\r\n\x{2028}\x{2029}]*?)\)")
        .expect("valid regex");
});

/// Schemes a reference must start with to be downloaded.
const REMOTE_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Return the reference segment of every image link in `text`, in order of appearance.
///
/// Unbalanced or partial syntax does not match and is skipped silently.
/// Local and remote references are both returned.
pub fn extract(text: &str) -> Vec<String> {
    return IMAGE_LINK
        .captures_iter(text)
        .filter_map(|cap| return cap.get(1))
        .map(|m| return m.as_str().to_string())
        .collect();
}

/// Whether a reference points at a remote asset.
pub fn is_remote(reference: &str) -> bool {
    return REMOTE_SCHEMES.iter().any(|scheme| return reference.starts_with(scheme));
}
