//! HTML character reference decoding.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#[xX][0-9a-fA-F]{1,6}|#[0-9]{1,7}|[A-Za-z][A-Za-z0-9]{1,31});")
        .expect("entity pattern is valid")
});

/// Decode named and numeric character references.
///
/// Each reference is decoded once, so `&amp;lt;` becomes `&lt;`, not `<`.
/// Unknown names and invalid code points are left as written.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    ENTITY.replace_all(text, |caps: &Captures<'_>| {
        let entity = &caps[0];
        htmlescape::decode_html(entity).unwrap_or_else(|_| entity.to_string())
    })
}
