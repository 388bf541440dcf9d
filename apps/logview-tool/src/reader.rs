//! Memory-mapped log loading.

use std::borrow::Cow;
use std::fs::File;
use std::path::Path;

use anyhow::Context;
use memmap2::Mmap;

use logview_core::chain::LineChain;
use logview_core::config::LineFormat;
use logview_core::parser::{ingest_lines, IngestSummary};

use crate::parser::DelimitedParser;

/// A log file parsed into a node chain.
#[derive(Debug)]
pub struct LoadedLog {
    pub chain: LineChain,
    pub summary: IngestSummary,
    /// Size of the source file in bytes
    pub bytes: usize,
}

/// Splits raw bytes on `\n`, dropping a trailing `\r` from each line.
///
/// A final newline does not produce an empty trailing line.
pub fn split_lines(data: &[u8]) -> impl Iterator<Item = Cow<'_, str>> {
    let body = data.strip_suffix(b"\n").unwrap_or(data);
    (!data.is_empty())
        .then(|| body.split(|&b| b == b'\n'))
        .into_iter()
        .flatten()
        .map(|line| String::from_utf8_lossy(line.strip_suffix(b"\r").unwrap_or(line)))
}

/// Maps `path` and parses every line with `format`.
pub fn load_log(path: &Path, format: &LineFormat) -> anyhow::Result<LoadedLog> {
    let parser = DelimitedParser::for_format(format)?;
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let len = file.metadata()?.len() as usize;

    let mut chain = LineChain::new(format.component_count());
    if len == 0 {
        return Ok(LoadedLog {
            chain,
            summary: IngestSummary::default(),
            bytes: 0,
        });
    }

    // SAFETY: the map is read-only and dropped before returning; concurrent
    // truncation of the file by another process is not supported.
    let map = unsafe { Mmap::map(&file) }
        .with_context(|| format!("mapping {}", path.display()))?;
    let summary = ingest_lines(&parser, &mut chain, split_lines(&map))?;
    tracing::info!(
        path = %path.display(),
        lines = summary.appended,
        rejected = summary.rejected,
        cells = chain.cells_len(),
        "loaded log"
    );

    Ok(LoadedLog {
        chain,
        summary,
        bytes: len,
    })
}
