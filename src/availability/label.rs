//! Brand name to domain label normalization

use regex::Regex;
use std::sync::OnceLock;

/// Longest label a registry accepts
const MAX_LABEL_LEN: usize = 63;

fn disallowed() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9-]+").expect("static regex"))
}

/// Turn a brand name into a registrable label.
///
/// Lowercases, strips everything outside `[a-z0-9-]` and trims hyphens from
/// both ends. Returns `None` if nothing usable is left.
pub fn domain_label(name: &str) -> Option<String> {
    let lowered = name.trim().to_lowercase();
    let stripped = disallowed().replace_all(&lowered, "");
    let label = stripped.trim_matches('-');

    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        None
    } else {
        Some(label.to_string())
    }
}
