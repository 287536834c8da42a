//! # lazyseq
//!
//! Deferred query evaluation over immutable in-memory integer sequences.
//!
//! A query is declared once and only walks its source when an execution is
//! pulled. Each execution owns its own cursor, so a query can be run again
//! and will re-read the source from the beginning.
//!
//! ## Quick Start
//!
//! ```rust
//! use lazyseq::{build_even_query, SourceProvider};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = SourceProvider::new();
//!
//!     // Nothing is read here
//!     let query = build_even_query(Some(provider.get_sequence()))?;
//!
//!     // The source is walked one element at a time
//!     let mut execution = query.execute();
//!     while let Some(value) = execution.try_next()? {
//!         println!("{} ", value);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Custom queries
//!
//! ```rust
//! use lazyseq::{QueryBuilder, Sequence};
//!
//! let numbers = Sequence::new(vec![5, 10, 15, 20]);
//! let query = QueryBuilder::new()
//!     .source(&numbers)
//!     .filter(|n| n > 7)
//!     .select(|n| n / 5)
//!     .build()?;
//! assert_eq!(query.collect_results()?, vec![2, 3, 4]);
//! # Ok::<(), lazyseq::Error>(())
//! ```

use std::io::Write;
use tracing::info;

pub mod logging;

// Re-export core types
pub use lazyseq_core::{Error, Result};

// Sources
pub use lazyseq_core::{
    DetachedSequence, Sequence, SequenceProducer, SequenceSource, SliceProducer, SourceProvider,
    DEFAULT_VALUES,
};

// Query pipeline
pub use lazyseq_core::{
    build_even_query, is_even, Execution, ExecutionState, Predicate, Projection, Query,
    QueryBuilder,
};

/// Crate version, as published.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Pulls every remaining element of `execution` into `sink`.
///
/// Returns the number of elements handed to the sink. The first error, from
/// either the execution or the sink, stops the loop.
///
/// # Examples
///
/// ```rust
/// use lazyseq::{build_even_query, drain};
///
/// let values: Vec<i64> = vec![1, 2, 3, 4];
/// let query = build_even_query(Some(&values))?;
///
/// let mut seen = Vec::new();
/// let count = drain(&mut query.execute(), |value| {
///     seen.push(value);
///     Ok(())
/// })?;
/// assert_eq!(count, 2);
/// assert_eq!(seen, vec![2, 4]);
/// # Ok::<(), lazyseq::Error>(())
/// ```
pub fn drain<S, F>(execution: &mut Execution<'_, '_, S>, mut sink: F) -> Result<usize>
where
    S: SequenceSource + ?Sized,
    F: FnMut(i64) -> Result<()>,
{
    let mut consumed = 0;
    while let Some(value) = execution.try_next()? {
        sink(value)?;
        consumed += 1;
    }
    Ok(consumed)
}

/// Executes `query` and writes each result as `"<value> "` on its own line.
pub fn write_results<S, W>(query: &Query<'_, S>, mut writer: W) -> Result<usize>
where
    S: SequenceSource + ?Sized,
    W: Write,
{
    let written = drain(&mut query.execute(), |value| {
        writeln!(writer, "{} ", value)?;
        Ok(())
    })?;
    writer.flush()?;
    Ok(written)
}

/// Runs the even-number query over the default data set and prints it.
pub fn run_even_query_demo<W: Write>(writer: W) -> Result<usize> {
    let provider = SourceProvider::new();
    let query = build_even_query(Some(provider.get_sequence()))?;
    info!(source_len = provider.get_sequence().len(), "executing even query");
    write_results(&query, writer)
}
