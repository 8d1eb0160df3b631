use std::fmt;

/// Sentinel printed in place of an offset when a run could not be located
/// anywhere in the source buffer.
pub const UNRECOVERABLE: &str = "----------";

/// One decoded text fragment together with the font label that was active
/// when the parser emitted it. Runs are appended in event order and never
/// reordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub font: String,
}

impl Run {
    pub fn new(text: impl Into<String>, font: impl Into<String>) -> Run {
        Run {
            text: text.into(),
            font: font.into(),
        }
    }
}

/// One line of the offset report: either an exact occurrence of a run's
/// candidate bytes in the source buffer, or a fallback entry for a run that
/// was not found under any candidate encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    /// Byte offset of the match, or `None` for an unrecoverable run.
    pub offset: Option<u64>,
    /// The matched bytes for an occurrence; the run's own decoded bytes for
    /// a fallback entry.
    pub bytes: Vec<u8>,
    pub font: String,
}

impl ReportLine {
    pub fn occurrence(offset: u64, bytes: Vec<u8>, font: impl Into<String>) -> ReportLine {
        ReportLine {
            offset: Some(offset),
            bytes,
            font: font.into(),
        }
    }

    pub fn fallback(bytes: Vec<u8>, font: impl Into<String>) -> ReportLine {
        ReportLine {
            offset: None,
            bytes,
            font: font.into(),
        }
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "{:08x}: ", offset)?,
            None => write!(f, "{}: ", UNRECOVERABLE)?,
        }
        for (i, b) in self.bytes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02x}", b)?;
        }
        write!(f, " [font:{}]", self.font)
    }
}
