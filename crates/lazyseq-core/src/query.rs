//! Deferred query pipeline.
//!
//! Building a [`Query`] only captures a source reference, a predicate and a
//! projection. Nothing is read until an [`Execution`] created by
//! [`Query::execute`] is pulled, and every execution walks the source from the
//! first element with its own cursor.

use crate::error::{Error, Result};
use crate::source::{SequenceProducer, SequenceSource};
use std::fmt;
use std::iter::FusedIterator;
use tracing::{debug, trace, warn};

/// Inclusion test applied to each visited element.
pub type Predicate<'a> = Box<dyn Fn(i64) -> bool + 'a>;

/// Mapping applied to each element that passed the predicate.
pub type Projection<'a> = Box<dyn Fn(i64) -> i64 + 'a>;

/// Evenness test used by [`build_even_query`].
pub fn is_even(value: i64) -> bool {
    value % 2 == 0
}

/// Builds a query selecting the even elements of `source`.
///
/// Fails with [`Error::Configuration`] when no source is given. The source
/// is not read.
///
/// # Examples
///
/// ```rust
/// use lazyseq_core::{build_even_query, Sequence};
///
/// let numbers = Sequence::new(vec![0, 1, 2, 3, 4, 5, 6]);
/// let query = build_even_query(Some(&numbers))?;
/// assert_eq!(query.collect_results()?, vec![0, 2, 4, 6]);
/// # Ok::<(), lazyseq_core::Error>(())
/// ```
pub fn build_even_query<'a, S>(source: Option<&'a S>) -> Result<Query<'a, S>>
where
    S: SequenceSource + ?Sized + 'a,
{
    QueryBuilder {
        source,
        ..QueryBuilder::new()
    }
    .filter(is_even)
    .build()
}

/// Collects the source, filter and select stages of a query.
pub struct QueryBuilder<'a, S: ?Sized> {
    source: Option<&'a S>,
    predicate: Option<Predicate<'a>>,
    projection: Option<Projection<'a>>,
}

impl<'a, S: SequenceSource + ?Sized> QueryBuilder<'a, S> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            source: None,
            predicate: None,
            projection: None,
        }
    }

    /// Sets the data source.
    pub fn source(mut self, source: &'a S) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the filter stage, replacing any previous one.
    pub fn filter<P>(mut self, predicate: P) -> Self
    where
        P: Fn(i64) -> bool + 'a,
    {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Sets the select stage, replacing any previous one.
    pub fn select<F>(mut self, projection: F) -> Self
    where
        F: Fn(i64) -> i64 + 'a,
    {
        self.projection = Some(Box::new(projection));
        self
    }

    /// Finishes the query without touching the source.
    ///
    /// A missing filter keeps every element and a missing select is the
    /// identity.
    pub fn build(self) -> Result<Query<'a, S>> {
        let source = self
            .source
            .ok_or_else(|| Error::Configuration("no data source".to_string()))?;

        debug!(
            filtered = self.predicate.is_some(),
            projected = self.projection.is_some(),
            "query built"
        );

        Ok(Query {
            source,
            predicate: self.predicate.unwrap_or_else(|| Box::new(|_: i64| true)),
            projection: self.projection.unwrap_or_else(|| Box::new(|value: i64| value)),
        })
    }
}

impl<S: SequenceSource + ?Sized> Default for QueryBuilder<'_, S> {
    fn default() -> Self {
        Self::new()
    }
}

/// A deferred filter + select over a borrowed source.
///
/// A query holds no results and no position; it can be executed any number
/// of times while the source is borrowed.
pub struct Query<'a, S: ?Sized> {
    source: &'a S,
    predicate: Predicate<'a>,
    projection: Projection<'a>,
}

impl<'a, S: SequenceSource + ?Sized> Query<'a, S> {
    /// Starts a new execution. The source is opened on its first pull.
    pub fn execute(&self) -> Execution<'_, 'a, S> {
        Execution {
            query: self,
            cursor: Cursor::Pending,
            visited: 0,
            matched: 0,
        }
    }

    /// Runs one full execution, stopping at the first error.
    pub fn collect_results(&self) -> Result<Vec<i64>> {
        self.execute().collect()
    }

    /// The source this query reads from.
    pub fn source(&self) -> &'a S {
        self.source
    }
}

impl<S: ?Sized> fmt::Debug for Query<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query").finish_non_exhaustive()
    }
}

/// Lifecycle of an [`Execution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    /// Created, nothing pulled yet
    Pending,
    /// Source opened and yielding
    Executing,
    /// Every element was visited
    Exhausted,
    /// The source could not be opened
    Failed,
}

enum Cursor<'a> {
    Pending,
    Open(Box<dyn SequenceProducer + 'a>),
    Exhausted,
    Failed,
}

/// Cursor over the results of one execution of a [`Query`].
///
/// Pulling past the end keeps returning `Ok(None)`. A source failure is
/// reported on the first pull only; the execution then yields nothing.
pub struct Execution<'q, 'a, S: ?Sized> {
    query: &'q Query<'a, S>,
    cursor: Cursor<'a>,
    visited: usize,
    matched: usize,
}

impl<S: SequenceSource + ?Sized> Execution<'_, '_, S> {
    /// Pulls the next matching element.
    pub fn try_next(&mut self) -> Result<Option<i64>> {
        loop {
            match &mut self.cursor {
                Cursor::Pending => match self.query.source().open() {
                    Ok(producer) => {
                        debug!("execution opened source");
                        self.cursor = Cursor::Open(producer);
                    }
                    Err(err) => {
                        warn!(error = %err, "execution failed to open source");
                        self.cursor = Cursor::Failed;
                        return Err(err);
                    }
                },
                Cursor::Open(producer) => match producer.try_next() {
                    Some(value) => {
                        self.visited += 1;
                        trace!(value, position = producer.position(), "visiting element");
                        if (self.query.predicate)(value) {
                            self.matched += 1;
                            return Ok(Some((self.query.projection)(value)));
                        }
                    }
                    None => {
                        debug!(
                            visited = self.visited,
                            matched = self.matched,
                            "execution exhausted"
                        );
                        self.cursor = Cursor::Exhausted;
                        return Ok(None);
                    }
                },
                Cursor::Exhausted | Cursor::Failed => return Ok(None),
            }
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ExecutionState {
        match self.cursor {
            Cursor::Pending => ExecutionState::Pending,
            Cursor::Open(_) => ExecutionState::Executing,
            Cursor::Exhausted => ExecutionState::Exhausted,
            Cursor::Failed => ExecutionState::Failed,
        }
    }

    /// Number of source elements visited so far.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Number of elements yielded so far.
    pub fn matched(&self) -> usize {
        self.matched
    }
}

impl<S: SequenceSource + ?Sized> Iterator for Execution<'_, '_, S> {
    type Item = Result<i64>;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().transpose()
    }
}

impl<S: SequenceSource + ?Sized> FusedIterator for Execution<'_, '_, S> {}
