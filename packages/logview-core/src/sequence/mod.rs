//! Paged virtual sequence over a range-fetchable item source.
//!
//! A `PagedSequence` presents every index of its source while keeping at
//! most `max_cache_size` pages of `page_size` items resident. Pages are
//! loaded on demand with a single range fetch and evicted in load order.
//!
//! The sequence is a read-only projection: the source is the only writer of
//! logical content, and every mutating method returns
//! [`LogViewError::Unsupported`].

mod iter;
mod page;

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::CacheConfig;
use crate::error::LogViewError;

pub use iter::Iter;
pub use page::CacheStats;
use page::PageCache;

/// Random-access provider of items.
///
/// `count` may only grow over the lifetime of a source. `fetch` must return
/// exactly `count` items starting at `start`, in index order, and requires
/// `start + count <= self.count()`.
pub trait ItemSource {
    type Item;

    /// Current logical length.
    fn count(&self) -> usize;

    /// Fetches `count` items beginning at `start`.
    fn fetch(&self, start: usize, count: usize) -> Result<Vec<Self::Item>, LogViewError>;
}

impl<S: ItemSource + ?Sized> ItemSource for Arc<S> {
    type Item = S::Item;

    fn count(&self) -> usize {
        (**self).count()
    }

    fn fetch(&self, start: usize, count: usize) -> Result<Vec<Self::Item>, LogViewError> {
        (**self).fetch(start, count)
    }
}

impl<S: ItemSource + ?Sized> ItemSource for &S {
    type Item = S::Item;

    fn count(&self) -> usize {
        (**self).count()
    }

    fn fetch(&self, start: usize, count: usize) -> Result<Vec<Self::Item>, LogViewError> {
        (**self).fetch(start, count)
    }
}

/// Bounded-memory indexable view over an `ItemSource`.
///
/// All cache bookkeeping for one `get` (lookup, fetch, insert, eviction)
/// runs under a single lock, so concurrent readers of the same uncached page
/// trigger exactly one fetch. Source fetches run while the lock is held.
pub struct PagedSequence<S: ItemSource> {
    source: S,
    config: CacheConfig,
    cache: Mutex<PageCache<S::Item>>,
}

impl<S: ItemSource> fmt::Debug for PagedSequence<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.cache.lock();
        f.debug_struct("PagedSequence")
            .field("config", &self.config)
            .field("resident_pages", &cache.len())
            .field("stats", &cache.stats)
            .finish_non_exhaustive()
    }
}

impl<S: ItemSource> PagedSequence<S> {
    /// Creates a sequence with the default page size and cache capacity.
    pub fn new(source: S) -> Self {
        let config = CacheConfig::default();
        Self {
            source,
            config,
            cache: Mutex::new(PageCache::new(config.max_cache_size)),
        }
    }

    /// Creates a sequence with explicit cache bounds.
    pub fn with_config(source: S, config: CacheConfig) -> Result<Self, LogViewError> {
        config.validate()?;
        Ok(Self {
            source,
            config,
            cache: Mutex::new(PageCache::new(config.max_cache_size)),
        })
    }

    /// Current length, as reported by the source.
    pub fn count(&self) -> usize {
        self.source.count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Indices of the pages currently resident, ascending.
    pub fn resident_pages(&self) -> Vec<usize> {
        self.cache.lock().page_indices()
    }

    /// Resident page indices, oldest load first.
    pub fn load_order(&self) -> Vec<usize> {
        self.cache.lock().load_order()
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.lock().stats
    }

    /// Drops every cached page. The source is not touched.
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    /// Forward iterator over `0..count()`.
    pub fn iter(&self) -> Iter<'_, S> {
        Iter::new(self)
    }

    pub fn insert(&self, _index: usize, _item: S::Item) -> Result<(), LogViewError> {
        Err(LogViewError::Unsupported {
            operation: "insert",
        })
    }

    pub fn remove_at(&self, _index: usize) -> Result<S::Item, LogViewError> {
        Err(LogViewError::Unsupported {
            operation: "remove_at",
        })
    }

    pub fn set(&self, _index: usize, _item: S::Item) -> Result<(), LogViewError> {
        Err(LogViewError::Unsupported { operation: "set" })
    }

    pub fn push(&self, _item: S::Item) -> Result<(), LogViewError> {
        Err(LogViewError::Unsupported { operation: "push" })
    }

    pub fn clear(&self) -> Result<(), LogViewError> {
        Err(LogViewError::Unsupported { operation: "clear" })
    }

    /// Fetches a range and checks the source kept its length contract.
    fn fetch_exact(&self, start: usize, count: usize) -> Result<Vec<S::Item>, LogViewError> {
        let items = self.source.fetch(start, count)?;
        if items.len() != count {
            return Err(LogViewError::from_source(format!(
                "fetch({start}, {count}) returned {} items",
                items.len()
            )));
        }
        Ok(items)
    }
}

impl<S> PagedSequence<S>
where
    S: ItemSource,
    S::Item: Clone,
{
    /// Returns the item at `index`, loading or extending its page if needed.
    ///
    /// A failed fetch is returned unchanged and leaves the cache as it was.
    pub fn get(&self, index: usize) -> Result<S::Item, LogViewError> {
        let count = self.source.count();
        if index >= count {
            return Err(LogViewError::IndexOutOfRange { index, count });
        }

        let page_size = self.config.page_size;
        let page_index = index / page_size;
        let page_start = page_index * page_size;
        let offset = index - page_start;

        let mut guard = self.cache.lock();
        let cache = &mut *guard;

        if let Some(page) = cache.pages.get_mut(&page_index) {
            if page.items.len() <= offset {
                // The source grew since this page was loaded.
                let have = page.items.len();
                let want = page_size.min(count - page_start);
                let tail = self.fetch_exact(page_start + have, want - have)?;
                page.items.extend(tail);
                cache.stats.extensions += 1;
                tracing::trace!(page_index, from = have, to = want, "extended cached page");
            } else {
                cache.stats.hits += 1;
            }
            return Ok(page.items[offset].clone());
        }

        let len = page_size.min(count - page_start);
        let items = self.fetch_exact(page_start, len)?;
        let item = items[offset].clone();
        cache.stats.misses += 1;
        tracing::debug!(page_index, page_start, len, "loaded page");

        for evicted in cache.insert(page_index, items) {
            tracing::debug!(page_index = evicted, "evicted page");
        }
        Ok(item)
    }

    /// Materializes `len` items starting at `start`, e.g. a visible viewport.
    pub fn get_range(&self, start: usize, len: usize) -> Result<Vec<S::Item>, LogViewError> {
        let count = self.count();
        let end = start
            .checked_add(len)
            .filter(|&end| end <= count)
            .ok_or(LogViewError::IndexOutOfRange {
                index: start.saturating_add(len),
                count,
            })?;
        (start..end).map(|index| self.get(index)).collect()
    }
}
