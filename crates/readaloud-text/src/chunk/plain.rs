//! Sentence packing for plain text and text nodes.

use std::ops::Range;

/// Clause punctuation an oversized sentence may be split after.
const CLAUSE_MARKS: &[char] = &[',', ';', ':', '—', '–'];

/// Longest character reference the hard splitter avoids cutting through.
const MAX_REF_LEN: usize = 12;

/// Pack `text` into ordered, non-overlapping byte ranges of at most
/// `budget` bytes, each trimmed of surrounding whitespace. `sentences` is
/// the tokenizer output for `text`.
///
/// Consecutive sentences are packed greedily; a sentence larger than the
/// budget is split at clause marks, then whitespace, then anywhere that is
/// not inside a character or character reference.
pub(super) fn pack(text: &str, budget: usize, sentences: &[String]) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut current: Option<Range<usize>> = None;

    for unit in sentence_spans(text, sentences) {
        if unit.len() > budget {
            ranges.extend(current.take());
            ranges.extend(split_oversized(text, unit, budget));
            continue;
        }

        current = match current.take() {
            Some(r) if unit.end - r.start <= budget => Some(r.start..unit.end),
            Some(r) => {
                ranges.push(r);
                Some(unit)
            }
            None => Some(unit),
        };
    }

    ranges.extend(current);
    ranges
}

/// Map sentences back onto byte ranges of `text`.
///
/// Each range runs from the end of the previous one to the end of the
/// sentence, so text the tokenizer skipped is never lost. If a sentence
/// cannot be found, the rest of the input becomes one range.
fn sentence_spans(text: &str, sentences: &[String]) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for sentence in sentences {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }

        let Some(offset) = text[cursor..].find(sentence) else {
            tracing::debug!(
                sentence_len = sentence.len(),
                "Sentence not found in input, keeping the remainder whole"
            );
            break;
        };

        let end = cursor + offset + sentence.len();
        push_trimmed(text, cursor..end, &mut spans);
        cursor = end;
    }

    push_trimmed(text, cursor..text.len(), &mut spans);
    spans
}

fn push_trimmed(text: &str, range: Range<usize>, out: &mut Vec<Range<usize>>) {
    let trimmed = trim_range(text, range);
    if !trimmed.is_empty() {
        out.push(trimmed);
    }
}

fn trim_range(text: &str, range: Range<usize>) -> Range<usize> {
    let slice = &text[range.clone()];
    let start = range.start + (slice.len() - slice.trim_start().len());
    let end = range.end - (slice.len() - slice.trim_end().len());
    start..end.max(start)
}

fn split_oversized(text: &str, range: Range<usize>, budget: usize) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut pos = range.start;

    while pos < range.end {
        pos += text[pos..range.end].len() - text[pos..range.end].trim_start().len();
        if pos >= range.end {
            break;
        }
        if range.end - pos <= budget {
            push_trimmed(text, pos..range.end, &mut out);
            break;
        }

        let limit = floor_char_boundary(text, pos + budget).max(next_char_boundary(text, pos));
        let window = &text[pos..limit];

        let cut = clause_cut(window)
            .or_else(|| space_cut(window))
            .map_or_else(|| hard_cut(text, pos, limit), |offset| pos + offset);

        push_trimmed(text, pos..cut, &mut out);
        pos = cut;
    }

    out
}

/// Offset just past the last clause mark that is followed by whitespace.
fn clause_cut(window: &str) -> Option<usize> {
    window
        .char_indices()
        .rev()
        .filter(|&(_, c)| CLAUSE_MARKS.contains(&c))
        .map(|(i, c)| i + c.len_utf8())
        .find(|&after| {
            window[after..]
                .chars()
                .next()
                .is_some_and(char::is_whitespace)
        })
}

fn space_cut(window: &str) -> Option<usize> {
    window
        .char_indices()
        .rev()
        .find(|&(i, c)| i > 0 && c.is_whitespace())
        .map(|(i, _)| i)
}

/// Cut at `limit`, or just before a character reference that would
/// otherwise be cut in half.
fn hard_cut(text: &str, pos: usize, limit: usize) -> usize {
    let window = &text[pos..limit];
    if let Some(amp) = window.rfind('&') {
        let open_ref = !window[amp..].contains(';') && window.len() - amp < MAX_REF_LEN;
        let looks_like_ref = text[pos + amp + 1..]
            .chars()
            .next()
            .is_some_and(|c| c == '#' || c.is_ascii_alphabetic());
        if amp > 0 && open_ref && looks_like_ref {
            return pos + amp;
        }
    }
    limit
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut i = index.min(text.len());
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn next_char_boundary(text: &str, index: usize) -> usize {
    text[index..]
        .chars()
        .next()
        .map_or(text.len(), |c| index + c.len_utf8())
}
