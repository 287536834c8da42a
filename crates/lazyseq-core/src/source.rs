//! Sequence sources.
//!
//! A [`SequenceSource`] is anything a query can walk. Opening a source is the
//! only point at which its elements are read: a query built over a source
//! holds nothing but a reference until one of its executions pulls.

use crate::error::{Error, Result};
use std::sync::{Arc, Weak};

/// Values held by [`SourceProvider::new`].
pub const DEFAULT_VALUES: [i64; 7] = [0, 1, 2, 3, 4, 5, 6];

/// Forward-only access to the elements of an opened source.
pub trait SequenceProducer {
    /// Returns the next element, or `None` once every element was produced.
    fn try_next(&mut self) -> Option<i64>;

    /// Number of elements produced so far.
    fn position(&self) -> usize;
}

/// A data source that can be walked by a query.
pub trait SequenceSource {
    /// Opens a fresh producer positioned before the first element.
    ///
    /// Every call yields an independent producer.
    fn open(&self) -> Result<Box<dyn SequenceProducer + '_>>;
}

/// Producer over a borrowed slice.
#[derive(Debug)]
pub struct SliceProducer<'a> {
    values: &'a [i64],
    position: usize,
}

impl<'a> SliceProducer<'a> {
    /// Creates a producer starting at the first element of `values`.
    pub fn new(values: &'a [i64]) -> Self {
        Self {
            values,
            position: 0,
        }
    }
}

impl SequenceProducer for SliceProducer<'_> {
    fn try_next(&mut self) -> Option<i64> {
        let value = self.values.get(self.position).copied()?;
        self.position += 1;
        Some(value)
    }

    fn position(&self) -> usize {
        self.position
    }
}

// Keeps the shared buffer alive for as long as the producer exists.
struct SharedProducer {
    values: Arc<[i64]>,
    position: usize,
}

impl SequenceProducer for SharedProducer {
    fn try_next(&mut self) -> Option<i64> {
        let value = self.values.get(self.position).copied()?;
        self.position += 1;
        Some(value)
    }

    fn position(&self) -> usize {
        self.position
    }
}

impl SequenceSource for [i64] {
    fn open(&self) -> Result<Box<dyn SequenceProducer + '_>> {
        Ok(Box::new(SliceProducer::new(self)))
    }
}

impl SequenceSource for Vec<i64> {
    fn open(&self) -> Result<Box<dyn SequenceProducer + '_>> {
        self.as_slice().open()
    }
}

/// An immutable, ordered sequence of integers.
///
/// Cloning is cheap and never copies the elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    values: Arc<[i64]>,
}

impl Sequence {
    /// Creates a sequence from the given values.
    pub fn new<V: Into<Arc<[i64]>>>(values: V) -> Self {
        Self {
            values: values.into(),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the sequence holds no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the element at `index`.
    pub fn get(&self, index: usize) -> Option<i64> {
        self.values.get(index).copied()
    }

    /// Borrows the elements as a slice.
    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }

    /// Creates a handle that does not keep the elements alive.
    ///
    /// Once every owning `Sequence` is dropped, opening the handle fails with
    /// [`Error::SourceUnavailable`].
    pub fn downgrade(&self) -> DetachedSequence {
        DetachedSequence {
            values: Arc::downgrade(&self.values),
        }
    }
}

impl From<Vec<i64>> for Sequence {
    fn from(values: Vec<i64>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<i64> for Sequence {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}

impl SequenceSource for Sequence {
    fn open(&self) -> Result<Box<dyn SequenceProducer + '_>> {
        self.as_slice().open()
    }
}

/// Non-owning handle to a [`Sequence`].
#[derive(Debug, Clone)]
pub struct DetachedSequence {
    values: Weak<[i64]>,
}

impl DetachedSequence {
    /// Returns true while some `Sequence` still owns the elements.
    pub fn is_available(&self) -> bool {
        self.values.strong_count() > 0
    }
}

impl SequenceSource for DetachedSequence {
    fn open(&self) -> Result<Box<dyn SequenceProducer + '_>> {
        let values = self.values.upgrade().ok_or_else(|| {
            Error::SourceUnavailable("backing sequence has been dropped".to_string())
        })?;
        Ok(Box::new(SharedProducer {
            values,
            position: 0,
        }))
    }
}

/// Owns the data set that queries run against.
#[derive(Debug, Clone)]
pub struct SourceProvider {
    sequence: Sequence,
}

impl SourceProvider {
    /// Creates a provider holding [`DEFAULT_VALUES`].
    pub fn new() -> Self {
        Self::with_values(DEFAULT_VALUES)
    }

    /// Creates a provider holding the given values.
    pub fn with_values<V: Into<Arc<[i64]>>>(values: V) -> Self {
        Self {
            sequence: Sequence::new(values),
        }
    }

    /// Returns the provider's sequence. Always the same sequence.
    pub fn get_sequence(&self) -> &Sequence {
        &self.sequence
    }
}

impl Default for SourceProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(source: &dyn SequenceSource) -> Vec<i64> {
        let mut producer = source.open().unwrap();
        let mut out = Vec::new();
        while let Some(value) = producer.try_next() {
            out.push(value);
        }
        out
    }

    #[test]
    fn test_provider_defaults() {
        let provider = SourceProvider::new();
        assert_eq!(provider.get_sequence().as_slice(), &[0, 1, 2, 3, 4, 5, 6]);
        // Idempotent
        assert!(std::ptr::eq(provider.get_sequence(), provider.get_sequence()));
    }

    #[test]
    fn test_sequence_accessors() {
        let seq = Sequence::new(vec![7, 8, 9]);
        assert_eq!(seq.len(), 3);
        assert!(!seq.is_empty());
        assert_eq!(seq.get(1), Some(8));
        assert_eq!(seq.get(3), None);

        let empty: Sequence = std::iter::empty().collect();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_producer_walks_in_order() {
        let seq = Sequence::from(vec![3, 1, 2]);
        assert_eq!(drain(&seq), vec![3, 1, 2]);
        assert_eq!(drain(&vec![5i64, 4]), vec![5, 4]);
    }

    #[test]
    fn test_producers_are_independent() {
        let seq = Sequence::new(DEFAULT_VALUES);
        let mut first = seq.open().unwrap();
        assert_eq!(first.try_next(), Some(0));
        assert_eq!(first.try_next(), Some(1));

        let mut second = seq.open().unwrap();
        assert_eq!(second.try_next(), Some(0));
        assert_eq!(first.position(), 2);
        assert_eq!(second.position(), 1);
    }

    #[test]
    fn test_producer_stays_exhausted() {
        let values = [1i64];
        let mut producer = values[..].open().unwrap();
        assert_eq!(producer.try_next(), Some(1));
        assert_eq!(producer.try_next(), None);
        assert_eq!(producer.try_next(), None);
        assert_eq!(producer.position(), 1);
    }

    #[test]
    fn test_detached_sequence() {
        let seq = Sequence::new(vec![1, 2]);
        let detached = seq.downgrade();
        assert!(detached.is_available());
        assert_eq!(drain(&detached), vec![1, 2]);

        drop(seq);
        assert!(!detached.is_available());
        let opened = detached.open();
        match opened {
            Err(err) => assert!(err.is_source_unavailable()),
            Ok(_) => panic!("expected source to be unavailable"),
        }
    }

    #[test]
    fn test_open_producer_outlives_owner() {
        let seq = Sequence::new(vec![4, 5]);
        let detached = seq.downgrade();
        let mut producer = detached.open().unwrap();
        drop(seq);
        assert_eq!(producer.try_next(), Some(4));
        assert_eq!(producer.try_next(), Some(5));
        assert_eq!(producer.try_next(), None);
    }
}
