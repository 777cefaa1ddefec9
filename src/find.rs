//! Find/replace over the content text.

use std::ops::Range;

/// Byte range of the next occurrence of `needle` at or after `from`,
/// wrapping around to the start of `text`.
pub fn find_next(text: &str, needle: &str, from: usize) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }
    let from = (0..=from.min(text.len()))
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0);
    text[from..]
        .find(needle)
        .map(|i| from + i)
        .or_else(|| text.find(needle))
        .map(|start| start..start + needle.len())
}

/// Replace the next occurrence at or after `from` (wrapping, like
/// [`find_next`]). Returns the new text and the span of the inserted
/// replacement, or `None` when there is nothing to replace.
pub fn replace_next(
    text: &str,
    needle: &str,
    replacement: &str,
    from: usize,
) -> Option<(String, Range<usize>)> {
    let hit = find_next(text, needle, from)?;
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..hit.start]);
    out.push_str(replacement);
    out.push_str(&text[hit.end..]);
    Some((out, hit.start..hit.start + replacement.len()))
}

/// Replace every occurrence, returning the new text and how many were replaced.
pub fn replace_all(text: &str, needle: &str, replacement: &str) -> (String, usize) {
    if needle.is_empty() {
        return (text.to_string(), 0);
    }
    let count = text.matches(needle).count();
    if count == 0 {
        return (text.to_string(), 0);
    }
    (text.replace(needle, replacement), count)
}
