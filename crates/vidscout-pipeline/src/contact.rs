use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid email regex")
});

/// First e-mail-looking substring of a free-text bio, or an empty string.
///
/// `None` (no bio at all) also yields an empty string; the caller decides
/// whether that differs from "no row".
#[must_use]
pub fn extract_contact(bio: Option<&str>) -> String {
    bio.and_then(|text| EMAIL_RE.find(text))
        .map(|m| m.as_str().to_owned())
        .unwrap_or_default()
}
