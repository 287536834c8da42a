//! # lazyseq Core
//!
//! Sequence sources and the deferred query pipeline for lazyseq.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod query;
pub mod source;

pub use error::{Error, Result};
pub use query::{
    build_even_query, is_even, Execution, ExecutionState, Predicate, Projection, Query,
    QueryBuilder,
};
pub use source::{
    DetachedSequence, Sequence, SequenceProducer, SequenceSource, SliceProducer, SourceProvider,
    DEFAULT_VALUES,
};
