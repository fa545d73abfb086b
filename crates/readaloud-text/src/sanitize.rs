//! Raw page text to speakable markup.
//!
//! ```text
//!   raw ─▶ decode refs ─▶ drop controls ─▶ strip blocks/tags ─▶ escape ─▶ collapse ─▶ trim
//! ```
//!
//! A complete `<speak>` document skips the pipeline and is returned as-is.

use std::sync::LazyLock;

use readaloud_core::{SpeakableMarkup, is_document};
use regex::{Captures, Regex};

use crate::entities::decode_entities;

/// Elements whose content is never spoken.
const SILENT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "iframe", "object"];

/// Elements that separate words when removed.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "li", "main", "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

// `<` must be followed by a name, `/`, `!` or `?` to count as a tag, so
// "a < b" is left for escaping.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<(?:/?([A-Za-z][A-Za-z0-9:_-]*)(?:"[^"<]*"|'[^'<]*'|[^<>])*|![^<>]*|\?[^<>]*)>"#,
    )
    .expect("tag pattern is valid")
});

/// Convert raw captured text into speakable markup.
///
/// Never fails. Input that is already a `<speak>` document is trusted and
/// returned unchanged; anything else comes back as plain text with every
/// XML-special character escaped as a hex reference.
pub fn sanitize(raw: &str) -> SpeakableMarkup {
    if raw.is_empty() {
        return SpeakableMarkup::default();
    }

    if is_document(raw) {
        return SpeakableMarkup::new(raw);
    }

    let decoded = decode_entities(raw);

    // Before stripping, so a removed control char cannot complete a tag
    let visible: String = decoded
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect();

    let text = strip_markup(&visible);
    let escaped = escape_xml(&text);
    SpeakableMarkup::new(collapse_whitespace(&escaped))
}

/// Escape the five XML-special characters as hex character references.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&#x26;"),
            '<' => out.push_str("&#x3C;"),
            '>' => out.push_str("&#x3E;"),
            '"' => out.push_str("&#x22;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Passes of [`strip_markup`]. Each pass removes one layer of tags rebuilt
/// from the pieces of removed ones; anything deeper is left for escaping.
const MAX_STRIP_PASSES: usize = 8;

/// Remove comments, silent blocks and tags until nothing changes or the
/// pass limit is reached, so tags assembled from the pieces of removed ones
/// are caught too.
///
/// Blocks go first on every pass: stripping a tag can complete a
/// `<script>` whose content must not survive as text.
fn strip_markup(text: &str) -> String {
    let mut current = text.to_string();

    for _ in 0..MAX_STRIP_PASSES {
        let mut next = strip_comments(&current);
        for name in SILENT_ELEMENTS {
            next = strip_element_block(&next, name);
        }
        if next != current {
            current = next;
            continue;
        }

        let next = TAG
            .replace_all(&current, |caps: &Captures<'_>| {
                let is_block = caps.get(1).is_some_and(|m| {
                    BLOCK_ELEMENTS.contains(&m.as_str().to_ascii_lowercase().as_str())
                });
                if is_block { " " } else { "" }
            })
            .into_owned();

        if next == current {
            return current;
        }
        current = next;
    }

    tracing::debug!(
        remaining_len = current.len(),
        "Markup still nested after {MAX_STRIP_PASSES} passes, escaping the rest"
    );
    current
}

/// Remove `<!-- … -->`. An unterminated comment runs to the end.
fn strip_comments(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(start) = text[cursor..].find("<!--") {
        let abs_start = cursor + start;
        result.push_str(&text[cursor..abs_start]);

        match text[abs_start + 4..].find("-->") {
            Some(end) => cursor = abs_start + 4 + end + 3,
            None => return result,
        }
    }

    result.push_str(&text[cursor..]);
    result
}

/// Remove every `<name …>…</name>` block, matching the name
/// case-insensitively. An unclosed block runs to the end of the text.
fn strip_element_block(text: &str, name: &str) -> String {
    let haystack = text.to_ascii_lowercase();
    let open_prefix = format!("<{name}");
    let close_prefix = format!("</{name}");

    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(found) = find_tag_start(&haystack, &open_prefix, cursor) {
        result.push_str(&text[cursor..found]);

        let Some(open_end) = readaloud_core::domain::find_tag_end(&haystack, found) else {
            return result;
        };
        let Some(close_start) = find_tag_start(&haystack, &close_prefix, open_end) else {
            return result;
        };
        let Some(close_end) = haystack[close_start..].find('>') else {
            return result;
        };

        cursor = close_start + close_end + 1;
    }

    result.push_str(&text[cursor..]);
    result
}

/// Find `prefix` at or after `from` where it is followed by a tag
/// delimiter, so `<script` does not match `<scripts>`.
fn find_tag_start(haystack: &str, prefix: &str, from: usize) -> Option<usize> {
    let mut cursor = from;

    while let Some(offset) = haystack[cursor..].find(prefix) {
        let start = cursor + offset;
        let after = start + prefix.len();
        match haystack[after..].chars().next() {
            Some(c) if c == '>' || c == '/' || c.is_whitespace() => return Some(start),
            None => return Some(start),
            Some(_) => cursor = after,
        }
    }

    None
}

fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_space = false;

    for c in text.chars() {
        if c.is_whitespace() {
            if !prev_space {
                result.push(' ');
                prev_space = true;
            }
        } else {
            result.push(c);
            prev_space = false;
        }
    }

    result.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(raw: &str) -> String {
        sanitize(raw).into_string()
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(clean(""), "");
    }

    #[test]
    fn escapes_all_five_specials() {
        assert_eq!(
            clean(r#"Test & < > " '"#),
            "Test &#x26; &#x3C; &#x3E; &#x22; &#x27;"
        );
    }

    #[test]
    fn decoded_and_literal_ampersands_escape_alike() {
        let out = clean("&amp; and & both present");
        assert_eq!(out.matches("&#x26;").count(), 2);
        assert_eq!(out, "&#x26; and &#x26; both present");
    }

    #[test]
    fn strips_tags_keeps_text() {
        let out = clean("<div>Hello <strong>world</strong></div>");
        assert_eq!(out, "Hello world");
    }

    #[test]
    fn block_tags_separate_words() {
        let out = clean("<div><p>Hello <strong>world</strong></p><ul><li>Item</li></ul></div>");
        assert_eq!(out, "Hello world Item");
        assert!(!out.contains('<') && !out.contains('>'));
    }

    #[test]
    fn script_and_style_contents_are_removed() {
        let out = clean(
            "Before<script type=\"text/javascript\">alert('x')</script> middle \
             <STYLE>p { color: red }</STYLE>after",
        );
        assert_eq!(out, "Before middle after");
    }

    #[test]
    fn encoded_script_is_neutralised() {
        let out = clean("Safe &lt;script&gt;alert(1)&lt;/script&gt; text");
        assert_eq!(out, "Safe text");
    }

    #[test]
    fn unclosed_script_drops_the_rest() {
        assert_eq!(clean("Keep this <script>var a = 1;"), "Keep this");
    }

    #[test]
    fn reassembled_tags_are_stripped() {
        let out = clean("a<scr<script>x</script>ipt>evil()</script>b");
        assert!(!out.contains("evil"));
        assert!(!out.contains("&#x3C;"));
    }

    #[test]
    fn deeply_nested_fragments_are_bounded() {
        let depth = 20_000;
        let raw = format!("{}{}", "<b".repeat(depth), ">".repeat(depth));

        let started = std::time::Instant::now();
        let out = clean(&raw);
        assert!(
            started.elapsed() < std::time::Duration::from_secs(5),
            "took {:?}",
            started.elapsed()
        );

        assert!(!out.contains('<') && !out.contains('>'));
        let left = out.matches("&#x3C;b").count();
        assert!(left > 0 && left < depth);
        assert_eq!(out.matches("&#x3E;").count(), left);
    }

    #[test]
    fn shallow_nesting_is_fully_stripped() {
        assert_eq!(clean("x<b<b<b>>>y"), "xy");
    }

    #[test]
    fn comments_are_removed() {
        assert_eq!(clean("one <!-- hidden > text --> two"), "one two");
    }

    #[test]
    fn quoted_attribute_with_angle_bracket() {
        assert_eq!(clean(r#"<a title="x>y">link</a> text"#), "link text");
    }

    #[test]
    fn whitespace_is_collapsed_and_trimmed() {
        assert_eq!(clean("   Hello world   "), "Hello world");
        assert_eq!(clean("line one\n\n\tline   two"), "line one line two");
        assert_eq!(clean("non&nbsp;breaking"), "non breaking");
    }

    #[test]
    fn control_characters_are_dropped() {
        assert_eq!(clean("bell\u{7}ring <\u{0}b>bold</b>"), "bellring bold");
    }

    #[test]
    fn documents_pass_through_unchanged() {
        let doc = "  <speak version=\"1.0\"><p>Hi &amp; bye</p></speak>\n";
        assert_eq!(clean(doc), doc);
    }

    #[test]
    fn partial_document_is_treated_as_text() {
        assert_eq!(clean("<speak>Hello world"), "Hello world");
    }

    #[test]
    fn output_is_idempotent() {
        let inputs = [
            "Test & < > \" '",
            "&amp;lt;b&amp;gt; literal",
            "x <b",
            "a < b > c",
            "<p>Tom &amp; Jerry's \"show\"</p>",
            "&#x26;#x3C;",
        ];
        for input in inputs {
            let once = clean(input);
            let twice = clean(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }
}
