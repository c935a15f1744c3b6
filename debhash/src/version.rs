//! Debian revision handling
//!
//! A Debian version may carry a trailing revision (`4.2.2-1`). When the
//! revision is the only difference between two versions they can be treated
//! as the same upstream release.

/// Strip a trailing Debian revision (`-<digits>`) if present.
///
/// Only the part after the last `-` is considered, and only when it is made
/// entirely of ASCII digits. Anything else is returned unchanged.
pub fn strip_revision(version: &str) -> &str {
    match version.rsplit_once('-') {
        Some((base, revision))
            if !revision.is_empty() && revision.bytes().all(|b| b.is_ascii_digit()) =>
        {
            base
        }
        _ => version,
    }
}

/// Whether two versions differ at most in their Debian revision.
pub fn revision_equivalent(a: &str, b: &str) -> bool {
    strip_revision(a) == strip_revision(b)
}
