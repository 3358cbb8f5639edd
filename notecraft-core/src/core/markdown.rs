//! Markdown preview renderer for a fixed subset of constructs.
//!
//! The transform runs as an ordered pipeline over line fragments:
//!
//! 1. escape `&`, `<`, `>` in the whole input;
//! 2. block lines: headings (`###`, `##`, `#`), blockquotes, horizontal rules;
//! 3. list lines: checked task, unchecked task, plain bullet;
//! 4. adjacent list items grouped into one list;
//! 5. fenced code blocks collapsed back to their raw (escaped) lines;
//!    a fence opened and closed inside one line is rendered in place;
//! 6. inline bold, italic, code and links, in that order;
//! 7. blank-line separated blocks wrapped in paragraphs unless they start
//!    with a structural element.
//!
//! Nested constructs (lists in quotes, emphasis spanning lines, …) are outside
//! the subset. A multi-line fence must open at the start of a line.
//! Unterminated delimiters stay as literal escaped text.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Markup returned for blank input.
pub const EMPTY_PREVIEW: &str = "<p class=\"nc-preview-empty\">Nothing to preview yet…</p>";

const FENCE: &str = "```";
const CHECKED_GLYPH: &str = "✅ ";
const UNCHECKED_GLYPH: &str = "☐ ";

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static INLINE_FENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```(.+?)```").unwrap());
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.+?)\]\((.+?)\)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Check {
    Done,
    Open,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ListItem {
    check: Option<Check>,
    text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    Heading(u8, String),
    Quote(String),
    Rule,
    Item(ListItem),
    List(Vec<ListItem>),
    Code(String),
    Text(String),
    Blank,
}

impl Kind {
    /// Whether a block starting with this fragment is left unwrapped.
    fn is_structural(&self) -> bool {
        !matches!(self, Self::Text(_) | Self::Blank)
    }
}

/// A classified piece of the document plus the escaped source lines it came
/// from, kept so a later code fence can restore them verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Fragment {
    kind: Kind,
    raw: Vec<String>,
}

type LineMatcher = fn(&str) -> Option<Kind>;

// Longest construct first: `###` must be tried before `##` and `#`.
const BLOCK_MATCHERS: &[LineMatcher] = &[heading3, heading2, heading1, blockquote, rule];

// Task variants before the plain bullet that would otherwise swallow them.
const LIST_MATCHERS: &[LineMatcher] = &[checked_task, open_task, bullet];

fn heading3(line: &str) -> Option<Kind> {
    after(line, "### ").map(|t| Kind::Heading(3, t.to_string()))
}

fn heading2(line: &str) -> Option<Kind> {
    after(line, "## ").map(|t| Kind::Heading(2, t.to_string()))
}

fn heading1(line: &str) -> Option<Kind> {
    after(line, "# ").map(|t| Kind::Heading(1, t.to_string()))
}

/// The `>` marker has already been escaped by the time lines are classified.
fn blockquote(line: &str) -> Option<Kind> {
    after(line, "&gt; ").map(|t| Kind::Quote(t.to_string()))
}

fn rule(line: &str) -> Option<Kind> {
    (line.len() >= 3 && line.bytes().all(|b| b == b'-')).then_some(Kind::Rule)
}

fn checked_task(line: &str) -> Option<Kind> {
    after(line, "- [x] ").map(|t| item(Some(Check::Done), t))
}

fn open_task(line: &str) -> Option<Kind> {
    after(line, "- [ ] ").map(|t| item(Some(Check::Open), t))
}

fn bullet(line: &str) -> Option<Kind> {
    after(line, "- ").map(|t| item(None, t))
}

fn after<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.strip_prefix(prefix).filter(|rest| !rest.is_empty())
}

fn item(check: Option<Check>, text: &str) -> Kind {
    Kind::Item(ListItem {
        check,
        text: text.to_string(),
    })
}

/// Renders `text` to preview markup. Never fails; blank input yields
/// [`EMPTY_PREVIEW`].
///
/// ```rust
/// use notecraft_core::render_markdown;
///
/// assert_eq!(render_markdown("# Hi"), "<h1>Hi</h1>");
/// assert_eq!(
///     render_markdown("<b>not bold</b>"),
///     "<p>&lt;b&gt;not bold&lt;/b&gt;</p>"
/// );
/// ```
pub fn render_markdown(text: &str) -> String {
    if text.trim().is_empty() {
        return EMPTY_PREVIEW.to_string();
    }
    let escaped = escape_html(text);
    let fragments = escaped.lines().map(classify_line).collect();
    let fragments = group_list_items(fragments);
    let fragments = collapse_code_fences(fragments);
    render_fragments(&fragments)
}

/// Escapes the three characters that could open or close markup.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// ── Passes 2–3: line classification ─────────────────────────────────────────

fn classify_line(line: &str) -> Fragment {
    let kind = if line.trim().is_empty() {
        Kind::Blank
    } else {
        BLOCK_MATCHERS
            .iter()
            .chain(LIST_MATCHERS)
            .find_map(|m| m(line))
            .unwrap_or_else(|| Kind::Text(line.to_string()))
    };
    Fragment {
        kind,
        raw: vec![line.to_string()],
    }
}

// ── Pass 4: list grouping ────────────────────────────────────────────────────

fn group_list_items(fragments: Vec<Fragment>) -> Vec<Fragment> {
    let mut out: Vec<Fragment> = Vec::with_capacity(fragments.len());
    for Fragment { kind, raw } in fragments {
        let Kind::Item(li) = kind else {
            out.push(Fragment { kind, raw });
            continue;
        };
        if let Some(Fragment {
            kind: Kind::List(items),
            raw: list_raw,
        }) = out.last_mut()
        {
            items.push(li);
            list_raw.extend(raw);
            continue;
        }
        out.push(Fragment {
            kind: Kind::List(vec![li]),
            raw,
        });
    }
    out
}

// ── Pass 5: fenced code ──────────────────────────────────────────────────────

fn collapse_code_fences(fragments: Vec<Fragment>) -> Vec<Fragment> {
    let mut out = Vec::with_capacity(fragments.len());
    let mut i = 0;
    while i < fragments.len() {
        let Some(opener) = fence_opener(&fragments[i]) else {
            out.push(fragments[i].clone());
            i += 1;
            continue;
        };

        if let Some(inline) = single_line_fence(opener) {
            out.push(code_fragment(inline.to_string(), opener));
            i += 1;
            continue;
        }

        match (i + 1..fragments.len()).find(|&j| fence_closer(&fragments[j]).is_some()) {
            Some(close) => {
                let mut lines: Vec<&str> = fragments[i + 1..close]
                    .iter()
                    .flat_map(|f| f.raw.iter().map(String::as_str))
                    .collect();
                if let Some(tail) = fence_closer(&fragments[close]) {
                    if !tail.trim().is_empty() {
                        lines.push(tail);
                    }
                }
                out.push(code_fragment(lines.join("\n"), opener));
                i = close + 1;
            }
            // Unclosed fence: leave the delimiter as literal text.
            None => {
                out.push(fragments[i].clone());
                i += 1;
            }
        }
    }
    out
}

fn fence_opener(fragment: &Fragment) -> Option<&str> {
    match (&fragment.kind, fragment.raw.as_slice()) {
        (Kind::Text(_), [line]) if line.starts_with(FENCE) => Some(line.as_str()),
        _ => None,
    }
}

/// Returns the text preceding the closing delimiter.
fn fence_closer(fragment: &Fragment) -> Option<&str> {
    if matches!(fragment.kind, Kind::List(_)) {
        return None;
    }
    match fragment.raw.as_slice() {
        [line] => line.trim_end().strip_suffix(FENCE),
        _ => None,
    }
}

fn single_line_fence(line: &str) -> Option<&str> {
    let line = line.trim_end();
    if line.len() >= 2 * FENCE.len() {
        line.strip_prefix(FENCE)?.strip_suffix(FENCE)
    } else {
        None
    }
}

fn code_fragment(code: String, opener: &str) -> Fragment {
    Fragment {
        kind: Kind::Code(code),
        raw: vec![opener.to_string()],
    }
}

// ── Passes 6–7: inline and paragraphs ────────────────────────────────────────

fn render_fragments(fragments: &[Fragment]) -> String {
    fragments
        .split(|f| f.kind == Kind::Blank)
        .filter(|block| !block.is_empty())
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_block(block: &[Fragment]) -> String {
    let parts: Vec<String> = block.iter().map(|f| render_kind(&f.kind)).collect();
    if block[0].kind.is_structural() {
        parts.join("\n")
    } else {
        format!("<p>{}</p>", parts.join("<br/>"))
    }
}

fn render_kind(kind: &Kind) -> String {
    match kind {
        Kind::Heading(level, text) => format!("<h{level}>{}</h{level}>", render_inline(text)),
        Kind::Quote(text) => format!("<blockquote>{}</blockquote>", render_inline(text)),
        Kind::Rule => "<hr/>".to_string(),
        Kind::Item(li) => render_list(std::slice::from_ref(li)),
        Kind::List(items) => render_list(items),
        Kind::Code(code) => format!("<pre><code>{code}</code></pre>"),
        Kind::Text(text) => render_inline(text),
        Kind::Blank => String::new(),
    }
}

fn render_list(items: &[ListItem]) -> String {
    let mut out = String::from("<ul>");
    for li in items {
        let glyph = match li.check {
            Some(Check::Done) => CHECKED_GLYPH,
            Some(Check::Open) => UNCHECKED_GLYPH,
            None => "",
        };
        out.push_str(&format!("<li>{glyph}{}</li>", render_inline(&li.text)));
    }
    out.push_str("</ul>");
    out
}

/// Renders one line of text. Fence spans inside the line become preformatted
/// code and are kept out of the inline passes.
fn render_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for span in INLINE_FENCE_RE.find_iter(text) {
        out.push_str(&render_spans(&text[last..span.start()]));
        let code = &span.as_str()[FENCE.len()..span.len() - FENCE.len()];
        out.push_str(&format!("<pre><code>{code}</code></pre>"));
        last = span.end();
    }
    out.push_str(&render_spans(&text[last..]));
    out
}

fn render_spans(text: &str) -> String {
    let text = BOLD_RE.replace_all(text, "<strong>$1</strong>");
    let text = ITALIC_RE.replace_all(&text, "<em>$1</em>");
    let text = CODE_RE.replace_all(&text, "<code>$1</code>");
    LINK_RE
        .replace_all(&text, |caps: &Captures| {
            format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                safe_href(&caps[2]),
                &caps[1]
            )
        })
        .into_owned()
}

/// Quotes are escaped so the URL cannot leave the attribute; script-capable
/// schemes are replaced by an inert anchor.
///
/// Browsers drop tabs and newlines anywhere in a URL and leading control
/// characters before reading the scheme, so those are removed before the check.
fn safe_href(url: &str) -> String {
    let scheme: String = url
        .chars()
        .filter(|c| !c.is_ascii_control() && !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    if ["javascript:", "vbscript:", "data:"]
        .iter()
        .any(|s| scheme.starts_with(s))
    {
        return "#".to_string();
    }
    url.replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_renders_placeholder() {
        assert_eq!(render_markdown(""), EMPTY_PREVIEW);
        assert_eq!(render_markdown("  \n\t\n "), EMPTY_PREVIEW);
    }

    #[test]
    fn test_script_tag_is_escaped_inside_paragraph() {
        let html = render_markdown("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert_eq!(html, "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>");
    }

    #[test]
    fn test_ampersand_escaped_once() {
        assert_eq!(render_markdown("a & b"), "<p>a &amp; b</p>");
        assert_eq!(render_markdown("&lt;"), "<p>&amp;lt;</p>");
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(
            render_markdown("# A\n## B\n### C"),
            "<h1>A</h1>\n<h2>B</h2>\n<h3>C</h3>"
        );
    }

    #[test]
    fn test_unsupported_heading_level_stays_text() {
        assert_eq!(render_markdown("#### deep"), "<p>#### deep</p>");
        assert_eq!(render_markdown("#nospace"), "<p>#nospace</p>");
    }

    #[test]
    fn test_heading_content_is_escaped() {
        assert_eq!(render_markdown("# <b>"), "<h1>&lt;b&gt;</h1>");
    }

    #[test]
    fn test_blockquote_and_rule() {
        assert_eq!(render_markdown("> wise words"), "<blockquote>wise words</blockquote>");
        assert_eq!(render_markdown("---"), "<hr/>");
        assert_eq!(render_markdown("-----"), "<hr/>");
        assert_eq!(render_markdown("--"), "<p>--</p>");
    }

    #[test]
    fn test_task_and_bullet_items() {
        assert_eq!(
            render_markdown("- [x] done\n- [ ] todo\n- plain"),
            "<ul><li>✅ done</li><li>☐ todo</li><li>plain</li></ul>"
        );
    }

    #[test]
    fn test_separated_lists_are_not_merged() {
        let html = render_markdown("- a\n- b\n\n- c");
        assert_eq!(html, "<ul><li>a</li><li>b</li></ul>\n<ul><li>c</li></ul>");
        assert_eq!(html.matches("<ul>").count(), 2);
    }

    #[test]
    fn test_list_interrupted_by_text_line_splits() {
        let html = render_markdown("- a\nbetween\n- b");
        assert_eq!(html.matches("<ul>").count(), 2);
    }

    #[test]
    fn test_code_fence_contents_are_not_reinterpreted() {
        assert_eq!(
            render_markdown("```\n# not heading\n**x**\n- y\n```"),
            "<pre><code># not heading\n**x**\n- y</code></pre>"
        );
    }

    #[test]
    fn test_code_fence_keeps_blank_lines_and_drops_info_string() {
        assert_eq!(
            render_markdown("```rust\nlet a = 1;\n\nlet b = a < 2;\n```"),
            "<pre><code>let a = 1;\n\nlet b = a &lt; 2;</code></pre>"
        );
    }

    #[test]
    fn test_single_line_fence() {
        assert_eq!(render_markdown("```let x```"), "<pre><code>let x</code></pre>");
    }

    #[test]
    fn test_fence_inside_a_line() {
        assert_eq!(
            render_markdown("see ```x``` here"),
            "<p>see <pre><code>x</code></pre> here</p>"
        );
        assert_eq!(
            render_markdown("a ```**b**``` c"),
            "<p>a <pre><code>**b**</code></pre> c</p>"
        );
        assert_eq!(
            render_markdown("- run ```make```"),
            "<ul><li>run <pre><code>make</code></pre></li></ul>"
        );
    }

    #[test]
    fn test_multiline_fence_opened_mid_line_stays_literal() {
        assert_eq!(
            render_markdown("see ```\ncode\n```"),
            "<p>see ```<br/>code<br/>```</p>"
        );
    }

    #[test]
    fn test_unclosed_fence_stays_literal() {
        assert_eq!(render_markdown("```\ncode"), "<p>```<br/>code</p>");
    }

    #[test]
    fn test_inline_constructs() {
        assert_eq!(
            render_markdown("**b** and *i* and `c`"),
            "<p><strong>b</strong> and <em>i</em> and <code>c</code></p>"
        );
    }

    #[test]
    fn test_emphasis_applies_inside_code_spans() {
        assert_eq!(
            render_markdown("`**x**`"),
            "<p><code><strong>x</strong></code></p>"
        );
    }

    #[test]
    fn test_unmatched_inline_markers_stay_literal() {
        assert_eq!(render_markdown("2 * 3 and `open"), "<p>2 * 3 and `open</p>");
    }

    #[test]
    fn test_link_opens_new_context() {
        assert_eq!(
            render_markdown("[site](https://example.com)"),
            "<p><a href=\"https://example.com\" target=\"_blank\" rel=\"noopener noreferrer\">site</a></p>"
        );
    }

    #[test]
    fn test_link_cannot_break_out_of_attribute() {
        let html = render_markdown("[x](a\" onclick=\"evil)");
        assert!(!html.contains("\" onclick"));
        assert!(html.contains("a&quot; onclick=&quot;evil"));
    }

    #[test]
    fn test_script_scheme_links_are_neutralised() {
        let html = render_markdown("[x](javascript:alert(1))");
        assert!(html.contains("href=\"#\""));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn test_script_scheme_split_by_tab_is_neutralised() {
        let html = render_markdown("[x](java\tscript:alert(1))");
        assert!(html.contains("href=\"#\""));
        assert!(!html.contains("script:alert"));
    }

    #[test]
    fn test_script_scheme_behind_control_character_is_neutralised() {
        let html = render_markdown("[x](\u{1}javascript:alert(1))");
        assert!(html.contains("href=\"#\""));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn test_paragraphs_and_line_breaks() {
        assert_eq!(
            render_markdown("line1\nline2\n\npara2"),
            "<p>line1<br/>line2</p>\n<p>para2</p>"
        );
    }

    #[test]
    fn test_multiple_blank_lines_do_not_create_empty_paragraphs() {
        assert_eq!(render_markdown("a\n\n\n\nb"), "<p>a</p>\n<p>b</p>");
    }

    #[test]
    fn test_structural_block_is_not_wrapped() {
        let html = render_markdown("## Things\n\n- [ ] Export\n\n> quote");
        assert_eq!(
            html,
            "<h2>Things</h2>\n<ul><li>☐ Export</li></ul>\n<blockquote>quote</blockquote>"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let input = "# T\n\n- [x] a\n- b\n\n```\nc\n```\n\n**d** [e](f)";
        assert_eq!(render_markdown(input), render_markdown(input));
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(render_markdown("# A\r\n\r\ntext"), "<h1>A</h1>\n<p>text</p>");
    }
}
