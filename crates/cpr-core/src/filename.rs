//! Display-name sanitization for cache file creation.
//!
//! Display names come from provider metadata and are untrusted; the
//! sanitized name must stay inside the cache directory.

/// Sanitize a provider display name for use as a cache filename.
///
/// - Replaces NUL, `/`, `\`, control characters, and whitespace with `_`
///   (consecutive replacements collapsed)
/// - Trims leading/trailing spaces, dots, and underscores
/// - Limits length to 255 bytes (NAME_MAX)
///
/// Returns `None` when nothing usable remains (empty, `.`/`..`-like names).
pub fn sanitize_display_name(name: &str) -> Option<String> {
    const NAME_MAX: usize = 255;

    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let keep = !(c == '\0' || c == '/' || c == '\\' || c.is_control() || c.is_whitespace());
        if keep {
            out.push(c);
            prev_underscore = false;
        } else if !prev_underscore {
            out.push('_');
            prev_underscore = true;
        }
    }

    let trimmed = out.trim_matches(|c| c == ' ' || c == '.' || c == '_');
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        Some(trimmed[..take].to_string())
    } else {
        Some(trimmed.to_string())
    }
}
