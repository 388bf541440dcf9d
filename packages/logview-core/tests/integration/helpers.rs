//! Shared fixtures for integration tests.

use logview_core::parser::LineParser;
use logview_core::record::{FieldSpan, StorageUnit};

/// Parser for `<time> <level> <message>` lines.
pub struct SpaceParser;

impl LineParser for SpaceParser {
    fn component_count(&self) -> usize {
        3
    }

    fn parse(&self, line: &[StorageUnit], spans: &mut [FieldSpan]) -> bool {
        let space = b' ' as StorageUnit;
        let Some(first) = line.iter().position(|&u| u == space) else {
            return false;
        };
        let Some(second) = line[first + 1..].iter().position(|&u| u == space) else {
            return false;
        };
        let second = first + 1 + second;
        spans[0] = FieldSpan::new(0, first as i32);
        spans[1] = FieldSpan::new(first as i32 + 1, (second - first - 1) as i32);
        spans[2] = FieldSpan::new(second as i32 + 1, (line.len() - second - 1) as i32);
        true
    }
}

const LEVELS: [&str; 4] = ["DEBUG", "INFO", "WARN", "ERROR"];

/// Deterministic synthetic log line `n`.
pub fn log_line(n: usize) -> String {
    format!(
        "12:{:02}:{:02} {} request {} handled in {}ms",
        (n / 60) % 60,
        n % 60,
        LEVELS[n % LEVELS.len()],
        n,
        n % 97
    )
}

/// Fields `log_line(n)` should decode to.
pub fn expected_fields(n: usize) -> Vec<String> {
    let line = log_line(n);
    let mut parts = line.splitn(3, ' ');
    (0..3)
        .map(|_| parts.next().unwrap_or_default().to_string())
        .collect()
}
