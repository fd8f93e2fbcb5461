//! Marker matching against known script-injection vectors
//!
//! Advisory defense-in-depth, not sanitization: rendering contexts must still
//! escape output. Deterministic, no side effects.

use regex::RegexSet;
use std::sync::LazyLock;

/// Markers associated with script-injection vectors: tag openers, inline
/// event-handler attributes, script-URI schemes, and DOM-manipulation call
/// patterns. Matched case-insensitively anywhere in the text; a single hit
/// flags the whole text.
const SUSPICIOUS_MARKERS: [&str; 13] = [
    r"<script",
    r"javascript:",
    r"onerror=",
    r"onclick=",
    r"onload=",
    r"<iframe",
    r"<button",
    r"document\.write",
    r"eval\(",
    r"alert\(",
    r"document\.cookie",
    r"document\.title",
    r"new Audio\(",
];

static MARKER_SET: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(SUSPICIOUS_MARKERS.map(|marker| format!("(?i){marker}")))
        .expect("suspicious-marker patterns are valid regexes")
});

/// Check whether text matches any known script-injection marker
pub fn is_suspicious(text: &str) -> bool {
    MARKER_SET.is_match(text)
}

/// Inverse of [`is_suspicious`]
#[inline]
pub fn is_safe(text: &str) -> bool {
    !is_suspicious(text)
}
