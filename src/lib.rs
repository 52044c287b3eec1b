//! Fuel Price Dashboard - yearly fuel price extremes from the CZSO price export.
//!
//! Loads the monthly price table, normalizes it, and aggregates the highest
//! price per fuel type and year.

pub mod dashboard;
pub mod data;
pub mod report;
pub mod stats;

pub use dashboard::{CategorySummary, FuelDashboard};
pub use data::{DataLoader, LoadOptions, LoaderError, NormalizedRecord, NormalizedTable, YearlyMax};
pub use stats::{AggregateError, Aggregator, EmptyInputError, Extreme, Field};
