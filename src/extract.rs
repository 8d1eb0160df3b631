use std::io::SeekFrom;
use std::path::Path;

use tracing::warn;

use crate::collector::RunCollector;
use crate::error::OffsetError;
use crate::parser::{Confidence, DocumentParser};
use crate::reconcile::reconcile;
use crate::store::ByteStore;
use crate::stream::{InputStream, MemoryStream};
use crate::types::ReportLine;

/// Driver tying a [`DocumentParser`] backend to the collection and
/// reconciliation passes.
///
/// Best-effort by design: a confidence mismatch or a mid-parse failure is
/// logged and processing continues with whatever runs were collected. Only
/// I/O errors on the input itself are surfaced as hard errors.
///
/// # Examples
///
/// ```no_run
/// use doc_offsets::{Extractor, PlainTextParser};
///
/// let report = Extractor::new(PlainTextParser).from_path("notes.txt")?;
/// for line in report {
///     println!("{}", line);
/// }
/// # Ok::<(), doc_offsets::OffsetError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Extractor<P> {
    parser: P,
}

impl<P: DocumentParser> Extractor<P> {
    pub fn new(parser: P) -> Extractor<P> {
        Extractor { parser }
    }

    /// Run the full pipeline over a file. Fails only if the file cannot be
    /// read.
    pub fn from_path<Q: AsRef<Path>>(&self, path: Q) -> Result<Vec<ReportLine>, OffsetError> {
        let store = ByteStore::load(path)?;
        Ok(self.from_store(&store))
    }

    /// Run the full pipeline over an in-memory buffer.
    pub fn from_bytes(&self, bytes: &[u8]) -> Vec<ReportLine> {
        self.from_store(&ByteStore::from_bytes(bytes))
    }

    /// Run the full pipeline over a loaded [`ByteStore`]. The store's bytes
    /// back both the parser's input stream and the reconciliation haystack.
    pub fn from_store(&self, store: &ByteStore) -> Vec<ReportLine> {
        let mut stream = MemoryStream::new(store.as_bytes());

        if self.parser.confidence(&mut stream) == Confidence::None {
            warn!("input not recognized with any confidence; attempting parse anyway");
        }
        // The probe may have consumed the stream.
        let _ = stream.seek(SeekFrom::Start(0));

        let mut collector = RunCollector::new();
        if let Err(e) = self.parser.parse(&mut stream, &mut collector) {
            warn!("parser reported an error: {} (continuing with collected runs)", e);
        }

        if !collector.font_name_found_any() && !collector.font_name_warning_emitted() {
            warn!("no font names were discovered; output uses generic labels");
        }

        reconcile(collector.runs(), store.as_bytes())
    }
}

/// Run the pipeline over a file with the given backend.
///
/// Convenience function equivalent to `Extractor::new(parser).from_path(path)`.
pub fn from_path<P: DocumentParser, Q: AsRef<Path>>(
    parser: P,
    path: Q,
) -> Result<Vec<ReportLine>, OffsetError> {
    Extractor::new(parser).from_path(path)
}

/// Run the pipeline over an in-memory buffer with the given backend.
///
/// Convenience function equivalent to `Extractor::new(parser).from_bytes(bytes)`.
pub fn from_bytes<P: DocumentParser>(parser: P, bytes: &[u8]) -> Vec<ReportLine> {
    Extractor::new(parser).from_bytes(bytes)
}
