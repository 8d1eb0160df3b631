use tracing::debug;

use crate::store::find_all;
use crate::types::{ReportLine, Run};

/// Runs whose decoded text is shorter than this many bytes are skipped:
/// single bytes match all over the buffer and carry no signal. Tunable
/// policy, together with the whitespace skip below.
pub const MIN_RUN_BYTES: usize = 2;

/// Byte-wise whitespace test over the encoded text (the C `isspace` set).
/// Multi-byte whitespace such as U+00A0 is deliberately not whitespace
/// here: its encoded bytes are not, and such runs stay reportable.
fn is_all_whitespace(text: &str) -> bool {
    text.bytes()
        .all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c))
}

/// Single-byte rendering of the run's text: every scalar value truncated to
/// its low byte. For Latin-1 text this is the identity byte mapping.
fn latin1_candidate(text: &str) -> Vec<u8> {
    text.chars().map(|c| c as u32 as u8).collect()
}

/// Locate each run's source bytes in `buffer`, trying the single-byte
/// candidate before the multi-byte one, and emit one report line per
/// occurrence or one fallback line per unlocated run.
///
/// The search is exhaustive and exact; a run with several occurrences
/// produces several lines, with no best-match selection.
pub fn reconcile(runs: &[Run], buffer: &[u8]) -> Vec<ReportLine> {
    let mut report = Vec::new();

    for run in runs {
        if run.text.len() < MIN_RUN_BYTES || is_all_whitespace(&run.text) {
            continue;
        }

        let latin1 = latin1_candidate(&run.text);
        let utf8 = run.text.as_bytes();

        // Single-byte candidate wins outright; the multi-byte candidate is
        // not searched once it has matched.
        let occurrences = find_all(buffer, &latin1);
        if !occurrences.is_empty() {
            for pos in occurrences {
                report.push(ReportLine::occurrence(pos as u64, latin1.clone(), &run.font));
            }
            continue;
        }

        let occurrences = find_all(buffer, utf8);
        if !occurrences.is_empty() {
            for pos in occurrences {
                report.push(ReportLine::occurrence(pos as u64, utf8.to_vec(), &run.font));
            }
            continue;
        }

        debug!("run {:?} not found under either candidate encoding", run.text);
        report.push(ReportLine::fallback(utf8.to_vec(), &run.font));
    }

    report
}
