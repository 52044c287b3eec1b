//! Stats module - yearly aggregation and extreme values

mod aggregator;

pub use aggregator::{AggregateError, Aggregator, EmptyInputError, Extreme, Field};
