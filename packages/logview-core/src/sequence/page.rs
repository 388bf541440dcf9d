use std::collections::HashMap;

/// Counters describing cache behaviour since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served entirely from a cached page
    pub hits: u64,
    /// Lookups that loaded a new page
    pub misses: u64,
    /// Lookups that appended a missing tail to a cached page
    pub extensions: u64,
    /// Pages dropped to respect the capacity
    pub evictions: u64,
}

/// A cached page and the load counter it was tagged with.
#[derive(Debug)]
pub(crate) struct CachedPage<T> {
    pub items: Vec<T>,
    pub load_sequence: u64,
}

/// Page map with FIFO-by-load eviction.
///
/// The counter advances once per page load. Re-reading a cached page never
/// changes its counter, so the page loaded earliest is always evicted first.
#[derive(Debug)]
pub(crate) struct PageCache<T> {
    pub pages: HashMap<usize, CachedPage<T>>,
    pub stats: CacheStats,
    next_sequence: u64,
    capacity: usize,
}

impl<T> PageCache<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            pages: HashMap::with_capacity(capacity + 1),
            stats: CacheStats::default(),
            next_sequence: 0,
            capacity,
        }
    }

    /// Inserts a freshly loaded page and evicts down to capacity.
    ///
    /// # Returns
    /// Indices of evicted pages, oldest first.
    pub fn insert(&mut self, page_index: usize, items: Vec<T>) -> Vec<usize> {
        let load_sequence = self.next_sequence;
        self.next_sequence += 1;
        self.pages.insert(
            page_index,
            CachedPage {
                items,
                load_sequence,
            },
        );
        self.evict_overflow()
    }

    fn evict_overflow(&mut self) -> Vec<usize> {
        let mut evicted = Vec::new();
        while self.pages.len() > self.capacity {
            // Capacity is small; a linear scan for the oldest load is enough.
            let oldest = self
                .pages
                .iter()
                .min_by_key(|(_, page)| page.load_sequence)
                .map(|(&index, _)| index);
            match oldest {
                Some(index) => {
                    self.pages.remove(&index);
                    self.stats.evictions += 1;
                    evicted.push(index);
                }
                None => break,
            }
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Cached page indices, ascending.
    pub fn page_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.pages.keys().copied().collect();
        indices.sort_unstable();
        indices
    }

    /// Cached page indices ordered by load, oldest first.
    pub fn load_order(&self) -> Vec<usize> {
        let mut pages: Vec<(u64, usize)> = self
            .pages
            .iter()
            .map(|(&index, page)| (page.load_sequence, index))
            .collect();
        pages.sort_unstable();
        pages.into_iter().map(|(_, index)| index).collect()
    }

    pub fn clear(&mut self) {
        self.pages.clear();
    }
}
