//! Small text helpers shared by shells: list labels, timestamps and toolbar
//! markup insertion.

use std::ops::Range;

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Characters dropped from list previews so Markdown markers don't show.
const MARKDOWN_MARKERS: &[char] = &['#', '*', '`', '>', '-', '_', '[', ']'];

/// Placeholder wrapped by [`insert_markup`] when the selection is empty.
pub const SELECTION_PLACEHOLDER: &str = "text";

/// Formats the age of `timestamp` relative to `now` (both Unix millis).
///
/// ```rust
/// use notecraft_core::relative_time;
///
/// assert_eq!(relative_time(0, 30_000), "just now");
/// assert_eq!(relative_time(0, 5 * 60_000), "5m ago");
/// ```
pub fn relative_time(timestamp: i64, now: i64) -> String {
    let age = now - timestamp;
    if age < MINUTE_MS {
        "just now".to_string()
    } else if age < HOUR_MS {
        format!("{}m ago", age / MINUTE_MS)
    } else if age < DAY_MS {
        format!("{}h ago", age / HOUR_MS)
    } else {
        format!("{}d ago", age / DAY_MS)
    }
}

/// Plain-text preview of `content` for note lists, at most `max_chars` long.
pub fn preview_snippet(content: &str, max_chars: usize) -> String {
    let snippet: String = content
        .chars()
        .filter(|c| !MARKDOWN_MARKERS.contains(c))
        .take(max_chars)
        .collect();
    if snippet.is_empty() {
        "Empty".to_string()
    } else {
        snippet
    }
}

pub fn display_title(title: &str) -> &str {
    if title.is_empty() {
        "Untitled"
    } else {
        title
    }
}

/// Wraps the selected range of `text` in `before`/`after` markers.
///
/// `selection` is in chars and is clamped to the text. An empty selection
/// wraps [`SELECTION_PLACEHOLDER`]. Returns the new text and the char range
/// of the wrapped content, so the shell can keep it selected.
///
/// ```rust
/// use notecraft_core::insert_markup;
///
/// let (text, sel) = insert_markup("make this bold", 10..14, "**", "**");
/// assert_eq!(text, "make this **bold**");
/// assert_eq!(sel, 12..16);
/// ```
pub fn insert_markup(
    text: &str,
    selection: Range<usize>,
    before: &str,
    after: &str,
) -> (String, Range<usize>) {
    let chars: Vec<char> = text.chars().collect();
    let end = selection.end.min(chars.len());
    let start = selection.start.min(end);

    let selected: String = chars[start..end].iter().collect();
    let inner = if selected.is_empty() {
        SELECTION_PLACEHOLDER.to_string()
    } else {
        selected
    };

    let mut out: String = chars[..start].iter().collect();
    out.push_str(before);
    out.push_str(&inner);
    out.push_str(after);
    out.extend(&chars[end..]);

    let sel_start = start + before.chars().count();
    let sel_end = sel_start + inner.chars().count();
    (out, sel_start..sel_end)
}
