//! Aggregation of included entries and the three output artifacts.

pub mod accumulator;
pub mod formatting;
pub mod writer;

pub use accumulator::{ChecksumMode, EmissionAccumulator, aggregate, detail_line};
pub use writer::{EmittedFiles, OutputNames, emit, name_prefix};
