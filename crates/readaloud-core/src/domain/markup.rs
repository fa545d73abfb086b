//! Speakable markup: plain sanitized text or a single `<speak>` document.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the root element every synthesis markup document is wrapped in.
pub const ROOT_TAG: &str = "speak";

const CLOSE_ROOT: &str = "</speak>";

/// Text that is safe to hand to the chunker.
///
/// Either plain text with every XML-special character escaped, or one
/// complete `<speak>…</speak>` document. The sanitizer is the only producer
/// in the pipeline; [`SpeakableMarkup::new`] exists for callers that already
/// hold trusted markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeakableMarkup(String);

impl SpeakableMarkup {
    /// Wrap text the caller vouches for.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this is a root-tagged markup document rather than plain text.
    pub fn is_document(&self) -> bool {
        is_document(&self.0)
    }
}

impl fmt::Display for SpeakableMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SpeakableMarkup {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One unit of speakable markup sized for a single synthesis request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chunk(String);

impl Chunk {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Size in bytes, the unit the request budget is measured in.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_document(&self) -> bool {
        is_document(&self.0)
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Chunk {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The three slices of a root-tagged document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentParts<'a> {
    /// The opening root tag including its attributes, e.g. `<speak version="1.0">`.
    pub open_tag: &'a str,
    /// Everything between the root tags.
    pub inner: &'a str,
    /// The closing root tag exactly as written.
    pub close_tag: &'a str,
}

/// Check whether `text`, once trimmed, is a single `<speak>…</speak>` document.
///
/// This is an envelope check only: the tag names are compared
/// case-insensitively and the inner structure is not validated.
pub fn is_document(text: &str) -> bool {
    split_document(text).is_some()
}

/// Split a root-tagged document into its opening tag, inner content and
/// closing tag. Surrounding whitespace is ignored.
pub fn split_document(text: &str) -> Option<DocumentParts<'_>> {
    let trimmed = text.trim();
    let name_end = 1 + ROOT_TAG.len();

    let head = trimmed.get(..name_end)?;
    if !head.eq_ignore_ascii_case("<speak") {
        return None;
    }

    // `<speaker>` is not the root element
    let after_name = trimmed[name_end..].chars().next()?;
    if after_name != '>' && !after_name.is_whitespace() {
        return None;
    }

    let close_start = trimmed.len().checked_sub(CLOSE_ROOT.len())?;
    let close_tag = trimmed.get(close_start..)?;
    if !close_tag.eq_ignore_ascii_case(CLOSE_ROOT) {
        return None;
    }

    let open_end = find_tag_end(trimmed, 0)?;
    if open_end > close_start {
        return None;
    }

    Some(DocumentParts {
        open_tag: &trimmed[..open_end],
        inner: &trimmed[open_end..close_start],
        close_tag,
    })
}

/// Find the byte offset just past the `>` that closes the tag starting at
/// `start`. Quoted attribute values may contain `>`.
pub fn find_tag_end(text: &str, start: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;

    for (offset, &byte) in text.as_bytes().get(start..)?.iter().enumerate() {
        match (quote, byte) {
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(byte),
            (None, b'>') => return Some(start + offset + 1),
            (None, _) => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_plain_speak_document() {
        assert!(is_document("<speak>Hello world</speak>"));
    }

    #[test]
    fn recognises_document_with_surrounding_whitespace() {
        assert!(is_document("  \n<speak>Hello world</speak>\t "));
    }

    #[test]
    fn root_tag_check_is_case_insensitive() {
        assert!(is_document("<SPEAK version=\"1.0\">Hi</Speak>"));
    }

    #[test]
    fn rejects_html_and_partial_documents() {
        assert!(!is_document("<div>Hello world</div>"));
        assert!(!is_document("<speak>Hello world"));
        assert!(!is_document("Hello world</speak>"));
        assert!(!is_document(""));
        assert!(!is_document("<speaker>Hi</speak>"));
    }

    #[test]
    fn split_preserves_root_attributes() {
        let doc = r#"<speak version="1.0" xml:lang="en-US"><p>Hi</p></speak>"#;
        let parts = split_document(doc).unwrap();
        assert_eq!(parts.open_tag, r#"<speak version="1.0" xml:lang="en-US">"#);
        assert_eq!(parts.inner, "<p>Hi</p>");
        assert_eq!(parts.close_tag, "</speak>");
    }

    #[test]
    fn tag_end_skips_quoted_angle_brackets() {
        let doc = r#"<speak data-x="a>b">text</speak>"#;
        let parts = split_document(doc).unwrap();
        assert_eq!(parts.inner, "text");
    }

    #[test]
    fn empty_document_has_empty_inner() {
        let parts = split_document("<speak></speak>").unwrap();
        assert_eq!(parts.inner, "");
    }

    #[test]
    fn non_ascii_tail_does_not_panic() {
        assert!(!is_document("<speak>héllo wörld ✓"));
    }
}
