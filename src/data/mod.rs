//! Data module - CSV loading and normalization

mod loader;
pub mod period;
mod processor;
mod record;

pub use loader::{DataLoader, LoadOptions, LoaderError, COLUMN_RENAMES};
pub use period::PeriodError;
pub use processor::{translate_fuel_type, DataProcessor, FUEL_LABELS};
pub use record::{
    NormalizedRecord, NormalizedTable, Record, YearlyMax, YearlyMaxTable, FUEL_TYPE, MONTH,
    PERIOD_CODE, PERIOD_LABEL, PRICE, PRICE_SERIES_ID, YEAR,
};
