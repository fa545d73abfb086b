//! Outgoing synthesis markup.

use readaloud_core::{SynthesisRequest, split_document};
use readaloud_text::escape_xml;

const SPEAK_OPEN: &str =
    r#"<speak version="1.0" xmlns="http://www.w3.org/2001/10/synthesis" xml:lang="en-US">"#;
const SPEAK_CLOSE: &str = "</speak>";

/// Wrap a chunk in the document Azure expects: a root element, a `<voice>`
/// and, when any adjustment is requested, a `<prosody>` element.
///
/// A chunk that is already a document contributes only its inner content,
/// so existing markup ends up nested inside the prosody adjustments.
pub fn build_ssml(request: &SynthesisRequest) -> String {
    let chunk = request.chunk().as_str();
    let content = split_document(chunk).map_or(chunk, |parts| parts.inner);
    let attributes = request.prosody().attributes();

    let mut ssml = String::with_capacity(SPEAK_OPEN.len() + content.len() + 128);
    ssml.push_str(SPEAK_OPEN);
    ssml.push_str("<voice name=\"");
    ssml.push_str(&escape_xml(request.voice()));
    ssml.push_str("\">");

    if attributes.is_empty() {
        ssml.push_str(content);
    } else {
        ssml.push_str("<prosody ");
        ssml.push_str(&attributes.join(" "));
        ssml.push('>');
        ssml.push_str(content);
        ssml.push_str("</prosody>");
    }

    ssml.push_str("</voice>");
    ssml.push_str(SPEAK_CLOSE);
    ssml
}
