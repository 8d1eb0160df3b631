//! Source-offset recovery for decoded document text
//!
//! This library re-locates text decoded by a visitor-driven document parser
//! inside the original byte buffer, reporting each run's offset and the
//! font context active when it was decoded. Format decoding itself lives
//! behind the [`DocumentParser`] trait.

mod collector;
mod error;
mod extract;
mod parser;
mod properties;
mod reconcile;
mod store;
mod stream;
mod types;

// Re-export error type
pub use error::OffsetError;

// Re-export pipeline API
pub use extract::{Extractor, from_bytes, from_path};

// Re-export the parser contract and the built-in backend
pub use parser::{Confidence, DocumentParser, ParseError, PlainTextParser};

// Re-export collection and reconciliation building blocks
pub use collector::{DocumentVisitor, RunCollector, extract_font_name};
pub use properties::{PropertyBag, PropertyValue};
pub use reconcile::{MIN_RUN_BYTES, reconcile};
pub use store::ByteStore;
pub use stream::{InputStream, MemoryStream, StreamError};
pub use types::{ReportLine, Run, UNRECOVERABLE};
