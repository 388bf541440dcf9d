//! Paged access to a chain-backed source.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use logview_core::chain::LineChain;
use logview_core::config::{CacheConfig, MAX_CACHE_SIZE, PAGE_SIZE};
use logview_core::parser::ingest_lines;
use logview_core::sequence::{ItemSource, PagedSequence};
use logview_core::source::{ChainSource, LineEntry};
use logview_core::LogViewError;
use ntest::timeout;

use super::helpers::{expected_fields, log_line, SpaceParser};

fn build_chain(lines: usize) -> LineChain {
    let mut chain = LineChain::new(3);
    let text: Vec<String> = (0..lines).map(log_line).collect();
    ingest_lines(&SpaceParser, &mut chain, text.iter().map(String::as_str)).unwrap();
    chain
}

/// Wraps a source and counts fetch calls.
struct CountingSource<S> {
    inner: S,
    fetches: AtomicUsize,
}

impl<S: ItemSource> ItemSource for CountingSource<S> {
    type Item = S::Item;

    fn count(&self) -> usize {
        self.inner.count()
    }

    fn fetch(&self, start: usize, count: usize) -> Result<Vec<S::Item>, LogViewError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(start, count)
    }
}

#[timeout(5000)]
#[test]
fn test_full_scan_through_sequence() -> anyhow::Result<()> {
    let sequence = PagedSequence::new(ChainSource::new(build_chain(5_000)));
    assert_eq!(sequence.count(), 5_000);

    for (n, entry) in sequence.iter().enumerate() {
        let entry: LineEntry = entry?;
        assert_eq!(entry.line, n);
        assert_eq!(entry.fields, expected_fields(n));
    }

    let stats = sequence.stats();
    assert_eq!(stats.misses, 50);
    assert_eq!(stats.evictions, 40);
    assert_eq!(sequence.resident_pages(), (40..50).collect::<Vec<_>>());
    Ok(())
}

#[timeout(5000)]
#[test]
fn test_resident_items_bounded() -> anyhow::Result<()> {
    let config = CacheConfig::default();
    let sequence = PagedSequence::new(ChainSource::new(build_chain(3_000)));
    for index in (0..3_000).step_by(37) {
        sequence.get(index)?;
    }
    assert!(sequence.resident_pages().len() <= MAX_CACHE_SIZE);
    assert!(sequence.resident_pages().len() * PAGE_SIZE <= config.max_resident_items());
    Ok(())
}

#[timeout(5000)]
#[test]
fn test_viewport_scroll_fetch_pattern() -> anyhow::Result<()> {
    let source = Arc::new(CountingSource {
        inner: ChainSource::new(build_chain(1_000)),
        fetches: AtomicUsize::new(0),
    });
    let sequence = PagedSequence::new(Arc::clone(&source));

    // Scroll a 40-line viewport down one line at a time.
    for top in 0..=960 {
        let rows = sequence.get_range(top, 40)?;
        assert_eq!(rows.len(), 40);
        assert_eq!(rows[0].line, top);
    }
    assert_eq!(source.fetches.load(Ordering::SeqCst), 10);
    Ok(())
}

#[timeout(10000)]
#[test]
fn test_streaming_growth_with_producer() -> anyhow::Result<()> {
    let source = ChainSource::new(build_chain(130));
    let shared = source.shared();
    let sequence = Arc::new(PagedSequence::new(source));

    assert_eq!(sequence.get(129)?.fields, expected_fields(129));

    let producer = thread::spawn(move || {
        for n in 130..1_000 {
            let mut chain = shared.write();
            ingest_lines(&SpaceParser, &mut chain, [log_line(n).as_str()]).unwrap();
        }
    });

    // Read the current tail while the producer appends.
    let reader = {
        let sequence = Arc::clone(&sequence);
        thread::spawn(move || -> Result<(), LogViewError> {
            for _ in 0..2_000 {
                let count = sequence.count();
                let entry = sequence.get(count - 1)?;
                assert_eq!(entry.line, count - 1);
                assert_eq!(entry.fields, expected_fields(count - 1));
            }
            Ok(())
        })
    };

    producer.join().expect("producer panicked");
    reader.join().expect("reader panicked")?;

    assert_eq!(sequence.count(), 1_000);
    for n in 0..1_000 {
        assert_eq!(sequence.get(n)?.fields, expected_fields(n));
    }
    Ok(())
}
