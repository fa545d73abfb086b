//! End-to-end checks on sanitized and chunked output.

use quick_xml::Reader;
use quick_xml::events::Event;
use readaloud_core::SpeakableMarkup;
use readaloud_text::{Chunker, sanitize};

/// Parse `doc` and return its text content, failing on unbalanced tags.
fn text_of(doc: &str) -> String {
    let mut reader = Reader::from_str(doc);
    let mut depth = 0usize;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                assert!(depth > 0, "closing tag without opener in {doc}");
                depth -= 1;
            }
            Ok(Event::Text(t)) => text.push_str(&String::from_utf8_lossy(&t)),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("malformed chunk {doc}: {e}"),
        }
    }

    assert_eq!(depth, 0, "unclosed tags in {doc}");
    text
}

fn squash(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[test]
fn nested_document_chunks_are_balanced_and_in_order() {
    let mut body = String::new();
    for i in 0..40 {
        body.push_str(&format!(
            r#"<p><s>Paragraph {i} opens here.</s> <emphasis level="moderate">Then it stresses a point number {i}.</emphasis> <break time="200ms"/>And it ends.</p>"#
        ));
    }
    let doc = format!(
        r#"<speak version="1.0" xmlns="http://www.w3.org/2001/10/synthesis" xml:lang="en-US"><voice name="en-US-JennyNeural">{body}</voice></speak>"#
    );

    let chunks = Chunker::new(1000).chunk(&SpeakableMarkup::new(&doc));
    assert!(chunks.len() > 1);

    let mut rebuilt = String::new();
    for chunk in &chunks {
        assert!(chunk.len() <= 1000, "chunk of {} bytes", chunk.len());
        assert!(chunk.as_str().starts_with("<speak version=\"1.0\""));
        assert!(chunk.as_str().contains(r#"<voice name="en-US-JennyNeural">"#));
        rebuilt.push_str(&text_of(chunk.as_str()));
    }

    assert_eq!(squash(&rebuilt), squash(&text_of(&doc)));
}

#[test]
fn malformed_document_is_repaired_when_split() {
    let doc = format!("<speak><p>{}<s>never closed</speak>", "Long sentence here. ".repeat(30));
    let chunks = Chunker::new(200).chunk(&SpeakableMarkup::new(&doc));

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        text_of(chunk.as_str());
    }
}

#[test]
fn sanitized_page_text_chunks_cleanly() {
    let page = format!(
        "<html><head><style>p {{ color: red }}</style></head><body>{}</body></html>",
        "<p>Fish &amp; chips are &quot;great&quot;. Really.</p>".repeat(200)
    );
    let markup = sanitize(&page);

    assert!(!markup.as_str().contains('<'));
    assert!(!markup.as_str().contains("color"));

    let chunks = Chunker::new(500).chunk(&markup);
    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(chunk.len() <= 500);
        assert!(chunk.as_str().ends_with('.'), "{}", chunk.as_str());
    }

    let rejoined: Vec<&str> = chunks.iter().map(|c| c.as_str()).collect();
    assert_eq!(rejoined.join(" "), markup.as_str());
}
