//! Text preparation for speech synthesis.
//!
//! [`sanitize`] turns arbitrary page text into speakable markup and
//! [`Chunker`] splits that markup into request-sized chunks, either on
//! sentence boundaries (plain text) or on element boundaries (documents).

#![deny(unused_crate_dependencies)]

mod chunk;
mod entities;
mod sanitize;
mod sentences;

pub use chunk::{Chunker, MIN_CONTENT_BUDGET};
pub use entities::decode_entities;
pub use sanitize::{escape_xml, sanitize};
pub use sentences::RuleTokenizer;

// quick-xml is only used by the integration tests
#[cfg(test)]
use quick_xml as _;
