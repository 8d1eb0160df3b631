use std::fmt;
use std::io::SeekFrom;

use encoding_rs::UTF_8;
use tracing::debug;

use crate::collector::DocumentVisitor;
use crate::stream::InputStream;

/// Advisory assessment of whether an input plausibly matches a parser's
/// expected format. Never used to abort processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    None,
    Likely,
    Excellent,
}

/// Failure reported by a parse call. Recoverable from the pipeline's point
/// of view: the driver logs it and continues with whatever runs were
/// collected before the failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    FileAccess,
    UnsupportedFormat,
    UnsupportedEncryption,
    Corrupt(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::FileAccess => write!(f, "file access error"),
            ParseError::UnsupportedFormat => write!(f, "unsupported format"),
            ParseError::UnsupportedEncryption => write!(f, "unsupported encryption"),
            ParseError::Corrupt(detail) => write!(f, "corrupt document: {}", detail),
        }
    }
}

impl std::error::Error for ParseError {}

/// The external parser collaborator: a confidence check plus the parse call
/// that drives a [`DocumentVisitor`] with decoded events. Format decoding
/// lives entirely behind this trait.
pub trait DocumentParser {
    /// Advisory format check. Implementations may read from the stream; the
    /// driver rewinds it before parsing.
    fn confidence(&self, stream: &mut dyn InputStream) -> Confidence;

    /// Parse the stream, delivering events to `visitor`. Events already
    /// delivered remain valid even when an error is returned.
    fn parse(
        &self,
        stream: &mut dyn InputStream,
        visitor: &mut dyn DocumentVisitor,
    ) -> Result<(), ParseError>;
}

const CONFIDENCE_PROBE_BYTES: usize = 1024;

/// Built-in backend that replays a plain UTF-8 byte stream as text events.
///
/// This is the reference implementation of [`DocumentParser`]: it performs
/// no format decoding and emits no style events, so every run carries the
/// collector's initial font label. Legacy binary formats require an external
/// backend implementing the same trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextParser;

impl PlainTextParser {
    pub fn new() -> PlainTextParser {
        PlainTextParser
    }

    fn read_to_end(stream: &mut dyn InputStream) -> Vec<u8> {
        let mut buf = Vec::new();
        while !stream.is_end() {
            let chunk = stream.read(4096);
            if chunk.is_empty() {
                break;
            }
            buf.extend_from_slice(chunk);
        }
        buf
    }
}

impl DocumentParser for PlainTextParser {
    fn confidence(&self, stream: &mut dyn InputStream) -> Confidence {
        let prefix = stream.read(CONFIDENCE_PROBE_BYTES).to_vec();
        let _ = stream.seek(SeekFrom::Start(0));
        match std::str::from_utf8(&prefix) {
            Ok(_) => Confidence::Excellent,
            // A character split at the probe boundary is not evidence
            // against the format.
            Err(e) if e.error_len().is_none() => Confidence::Likely,
            Err(_) => Confidence::None,
        }
    }

    fn parse(
        &self,
        stream: &mut dyn InputStream,
        visitor: &mut dyn DocumentVisitor,
    ) -> Result<(), ParseError> {
        let buf = Self::read_to_end(stream);
        let (text, had_errors) = match UTF_8.decode_without_bom_handling_and_without_replacement(&buf)
        {
            Some(text) => (text, false),
            None => (UTF_8.decode_without_bom_handling(&buf).0, true),
        };
        debug!("plain text backend decoded {} bytes", buf.len());

        let mut segment = String::new();
        for ch in text.chars() {
            match ch {
                '\n' => {
                    flush(visitor, &mut segment);
                    visitor.insert_line_break();
                }
                '\t' => {
                    flush(visitor, &mut segment);
                    visitor.insert_tab();
                }
                _ => segment.push(ch),
            }
        }
        flush(visitor, &mut segment);

        if had_errors {
            return Err(ParseError::Corrupt("input is not valid UTF-8".to_string()));
        }
        Ok(())
    }
}

fn flush(visitor: &mut dyn DocumentVisitor, segment: &mut String) {
    if !segment.is_empty() {
        visitor.insert_text(segment);
        segment.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::RunCollector;
    use crate::stream::MemoryStream;
    use crate::types::Run;

    #[test]
    fn confidence_excellent_for_utf8() {
        let data = "plain text\n".as_bytes();
        let mut stream = MemoryStream::new(data);
        assert_eq!(PlainTextParser.confidence(&mut stream), Confidence::Excellent);
        // The probe rewinds so the parse call starts at the beginning.
        assert_eq!(stream.tell(), 0);
    }

    #[test]
    fn confidence_none_for_binary() {
        let data = [0xff, 0xfe, 0x00, 0x41];
        let mut stream = MemoryStream::new(&data);
        assert_eq!(PlainTextParser.confidence(&mut stream), Confidence::None);
    }

    #[test]
    fn parse_segments_lines_and_tabs() {
        let data = "one\ttwo\nthree".as_bytes();
        let mut stream = MemoryStream::new(data);
        let mut collector = RunCollector::new();
        PlainTextParser.parse(&mut stream, &mut collector).unwrap();
        assert_eq!(
            collector.runs(),
            &[
                Run::new("one", "default"),
                Run::new("\t", "default"),
                Run::new("two", "default"),
                Run::new("\n", "default"),
                Run::new("three", "default"),
            ]
        );
    }

    #[test]
    fn parse_invalid_utf8_reports_error_but_keeps_runs() {
        let data = b"good\n\xff\xffbad";
        let mut stream = MemoryStream::new(data);
        let mut collector = RunCollector::new();
        let result = PlainTextParser.parse(&mut stream, &mut collector);
        assert!(matches!(result, Err(ParseError::Corrupt(_))));
        // Lossy decode still produced runs before the failure was reported.
        assert!(!collector.runs().is_empty());
        assert_eq!(collector.runs()[0], Run::new("good", "default"));
    }

    #[test]
    fn parse_empty_stream_emits_nothing() {
        let mut stream = MemoryStream::new(b"");
        let mut collector = RunCollector::new();
        PlainTextParser.parse(&mut stream, &mut collector).unwrap();
        assert!(collector.runs().is_empty());
    }
}
