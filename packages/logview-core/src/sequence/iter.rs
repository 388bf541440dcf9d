use super::{ItemSource, PagedSequence};
use crate::error::LogViewError;

/// Forward iterator over a paged sequence.
///
/// The end is fixed to the sequence length when the iterator is created;
/// every step goes through `PagedSequence::get`.
pub struct Iter<'a, S: ItemSource> {
    sequence: &'a PagedSequence<S>,
    next: usize,
    end: usize,
}

impl<'a, S: ItemSource> Iter<'a, S> {
    pub(super) fn new(sequence: &'a PagedSequence<S>) -> Self {
        Self {
            sequence,
            next: 0,
            end: sequence.count(),
        }
    }
}

impl<S> Iterator for Iter<'_, S>
where
    S: ItemSource,
    S::Item: Clone,
{
    type Item = Result<S::Item, LogViewError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(self.sequence.get(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl<S> ExactSizeIterator for Iter<'_, S>
where
    S: ItemSource,
    S::Item: Clone,
{
}

impl<'a, S> IntoIterator for &'a PagedSequence<S>
where
    S: ItemSource,
    S::Item: Clone,
{
    type Item = Result<S::Item, LogViewError>;
    type IntoIter = Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
