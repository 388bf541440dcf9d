//! Interface for line parsers that produce field spans.

use crate::chain::LineChain;
use crate::error::LogViewError;
use crate::record::{FieldSpan, StorageUnit};

/// Splits a raw line into a fixed number of field spans.
pub trait LineParser {
    /// Fields produced per line; must match the chain's component count.
    fn component_count(&self) -> usize;

    /// Fills `spans` (of length `component_count()`) for `line`.
    ///
    /// Returns `false` if the line does not match the format.
    fn parse(&self, line: &[StorageUnit], spans: &mut [FieldSpan]) -> bool;
}

/// Outcome of feeding a batch of lines through a parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub appended: usize,
    pub rejected: usize,
}

/// Parses `lines` and appends every match to `chain`.
///
/// Lines the parser rejects are skipped and counted.
pub fn ingest_lines<P, I>(
    parser: &P,
    chain: &mut LineChain,
    lines: I,
) -> Result<IngestSummary, LogViewError>
where
    P: LineParser + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    if parser.component_count() != chain.component_count() {
        return Err(LogViewError::ComponentCountMismatch {
            expected: chain.component_count(),
            got: parser.component_count(),
        });
    }

    let mut summary = IngestSummary::default();
    let mut spans = vec![FieldSpan::default(); parser.component_count()];
    let mut units: Vec<StorageUnit> = Vec::new();
    for line in lines {
        units.clear();
        units.extend(line.as_ref().encode_utf16());
        if parser.parse(&units, &mut spans) {
            chain.append(&units, &spans)?;
            summary.appended += 1;
        } else {
            tracing::warn!(line = chain.len() + summary.rejected, "line does not match format");
            summary.rejected += 1;
        }
    }
    Ok(summary)
}
