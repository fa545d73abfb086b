//! Rule-based sentence segmentation.

use readaloud_core::SentenceTokenizer;

/// Abbreviations that end in a period without ending a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "inc", "ltd",
    "co", "no", "fig", "approx", "dept", "est", "mt",
];

/// Escaped quotes the sanitizer produces; they may follow terminal punctuation.
const QUOTE_REFS: &[&str] = &["&#x22;", "&#x27;", "&quot;", "&apos;"];

/// Splits at `.`, `!`, `?` and `…` followed by whitespace, and right after
/// the CJK full stops `。！？`.
///
/// Closing quotes and brackets after the punctuation stay with the sentence.
/// Decimals, single-letter initials and common abbreviations do not split.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleTokenizer;

impl RuleTokenizer {
    pub const fn new() -> Self {
        Self
    }
}

impl SentenceTokenizer for RuleTokenizer {
    fn sentences(&self, text: &str) -> Vec<String> {
        split_sentences(text)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

/// Sentence slices of `text`, trimmed, in order.
pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut iter = text.char_indices().peekable();

    while let Some((i, c)) = iter.next() {
        let cjk = matches!(c, '。' | '！' | '？');
        if !cjk && !matches!(c, '.' | '!' | '?' | '…') {
            continue;
        }

        // Swallow runs like "?!" or "..."
        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = iter.peek() {
            if matches!(next, '.' | '!' | '?' | '…' | '。' | '！' | '？') {
                end = j + next.len_utf8();
                iter.next();
            } else {
                break;
            }
        }

        let single_period = c == '.' && end == i + 1;
        end = skip_closers(text, end);

        let at_boundary = cjk
            || text[end..]
                .chars()
                .next()
                .is_none_or(char::is_whitespace);

        if !at_boundary || (single_period && is_abbreviation(&text[start..i])) {
            continue;
        }

        push_trimmed(&mut sentences, &text[start..end]);
        start = end;

        // Resync the iterator past any closers we skipped
        while iter.peek().is_some_and(|&(j, _)| j < end) {
            iter.next();
        }
    }

    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, s: &'a str) {
    let s = s.trim();
    if !s.is_empty() {
        out.push(s);
    }
}

/// Advance past closing quotes, brackets and escaped quote references.
fn skip_closers(text: &str, mut pos: usize) -> usize {
    loop {
        let rest = &text[pos..];
        if let Some(c) = rest
            .chars()
            .next()
            .filter(|c| matches!(c, '"' | '\'' | ')' | ']' | '”' | '’' | '»' | '」' | '』'))
        {
            pos += c.len_utf8();
        } else if let Some(r) = QUOTE_REFS.iter().find(|r| rest.starts_with(*r)) {
            pos += r.len();
        } else {
            return pos;
        }
    }
}

/// Whether the word before a period is an abbreviation or an initial.
fn is_abbreviation(before: &str) -> bool {
    let word = before
        .rsplit(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or("");

    let mut chars = word.chars();
    if let (Some(first), None) = (chars.next(), chars.next()) {
        // "J. K. Rowling"
        return first.is_uppercase();
    }

    let lower = word.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
}
