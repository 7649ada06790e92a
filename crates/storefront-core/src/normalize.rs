//! Tag normalization.
//!
//! Product files carry free-form tag strings ("AI Tools", "ai_tools"); the tag
//! metadata map is keyed by canonical ids ("ai-tools"). [`normalize_tag`] is the
//! join key between the two and is applied before every tag lookup or count.

/// Lowercase the tag and collapse every run of characters outside `[a-z0-9]`
/// into a single `-`.
///
/// Idempotent: the output only contains `[a-z0-9-]` with no repeated dashes.
#[must_use]
pub fn normalize_tag(tag: &str) -> String {
    let mut out = String::with_capacity(tag.len());
    let mut in_run = false;

    for c in tag.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('-');
            in_run = true;
        }
    }

    out
}
