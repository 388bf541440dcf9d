//! Delimiter-based line parser.

use logview_core::config::LineFormat;
use logview_core::parser::LineParser;
use logview_core::record::{Cell, FieldSpan, StorageUnit};

/// Splits a line on a single-unit delimiter into a fixed number of fields.
///
/// The last field takes the remainder of the line, delimiters included.
/// Without a delimiter the whole line is one field.
#[derive(Debug, Clone)]
pub struct DelimitedParser {
    delimiter: Option<StorageUnit>,
    component_count: usize,
}

impl DelimitedParser {
    pub fn new(delimiter: Option<char>, component_count: usize) -> anyhow::Result<Self> {
        let delimiter = match delimiter {
            Some(c) => {
                let mut units = [0; 2];
                let encoded = c.encode_utf16(&mut units);
                anyhow::ensure!(
                    encoded.len() == 1,
                    "delimiter {c:?} is not a single UTF-16 unit"
                );
                Some(encoded[0])
            }
            None => None,
        };
        anyhow::ensure!(
            delimiter.is_some() || component_count == 1,
            "a format with {component_count} fields needs a delimiter"
        );
        Ok(Self {
            delimiter,
            component_count,
        })
    }

    pub fn for_format(format: &LineFormat) -> anyhow::Result<Self> {
        Self::new(format.delimiter, format.component_count())
    }
}

impl LineParser for DelimitedParser {
    fn component_count(&self) -> usize {
        self.component_count
    }

    fn parse(&self, line: &[StorageUnit], spans: &mut [FieldSpan]) -> bool {
        let mut start = 0usize;
        for (index, span) in spans.iter_mut().enumerate() {
            let last = index + 1 == self.component_count;
            let end = match self.delimiter {
                Some(d) if !last => match line[start..].iter().position(|&u| u == d) {
                    Some(pos) => start + pos,
                    None => return false,
                },
                _ => line.len(),
            };
            *span = FieldSpan::new(start as Cell, (end - start) as Cell);
            start = end + 1;
        }
        true
    }
}
