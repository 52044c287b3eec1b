//! Row types for the fuel price table.

use chrono::NaiveDate;
use polars::prelude::*;
use serde::Serialize;

/// Canonical column names after the rename step.
pub const FUEL_TYPE: &str = "FuelType";
pub const PRICE_SERIES_ID: &str = "PriceSeriesId";
pub const PERIOD_LABEL: &str = "PeriodLabel";
pub const PERIOD_CODE: &str = "PeriodCode";
pub const PRICE: &str = "Price";
pub const YEAR: &str = "Year";
pub const MONTH: &str = "Month";

/// One raw row of the source file, already projected to canonical fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub fuel_type: String,
    pub price_series_id: String,
    pub period_label: String,
    pub period_code: String,
    pub price: f64,
}

/// A record with a display fuel label and the date fields derived from its
/// period code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub fuel_type: String,
    pub price_series_id: String,
    pub period_label: String,
    pub period_code: String,
    pub price: f64,
    pub date: NaiveDate,
    pub year: i32,
    pub month: u32,
}

/// Normalized rows in source file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTable {
    records: Vec<NormalizedRecord>,
}

impl NormalizedTable {
    pub fn new(records: Vec<NormalizedRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedRecord> {
        self.records.iter()
    }

    /// Build a DataFrame with the canonical columns plus `Year` and `Month`.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let n = self.records.len();
        let mut fuel_types: Vec<&str> = Vec::with_capacity(n);
        let mut series_ids: Vec<&str> = Vec::with_capacity(n);
        let mut period_labels: Vec<&str> = Vec::with_capacity(n);
        let mut period_codes: Vec<&str> = Vec::with_capacity(n);
        let mut prices: Vec<f64> = Vec::with_capacity(n);
        let mut years: Vec<i32> = Vec::with_capacity(n);
        let mut months: Vec<u32> = Vec::with_capacity(n);

        for r in &self.records {
            fuel_types.push(&r.fuel_type);
            series_ids.push(&r.price_series_id);
            period_labels.push(&r.period_label);
            period_codes.push(&r.period_code);
            prices.push(r.price);
            years.push(r.year);
            months.push(r.month);
        }

        DataFrame::new(vec![
            Column::new(FUEL_TYPE.into(), fuel_types),
            Column::new(PRICE_SERIES_ID.into(), series_ids),
            Column::new(PERIOD_LABEL.into(), period_labels),
            Column::new(PERIOD_CODE.into(), period_codes),
            Column::new(PRICE.into(), prices),
            Column::new(YEAR.into(), years),
            Column::new(MONTH.into(), months),
        ])
    }
}

impl<'a> IntoIterator for &'a NormalizedTable {
    type Item = &'a NormalizedRecord;
    type IntoIter = std::slice::Iter<'a, NormalizedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Maximum price of one fuel type within one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyMax {
    pub year: i32,
    pub fuel_type: String,
    pub price: f64,
}

impl YearlyMax {
    pub fn new(year: i32, fuel_type: impl Into<String>, price: f64) -> Self {
        Self {
            year,
            fuel_type: fuel_type.into(),
            price,
        }
    }
}

/// The `(Year, FuelType) -> max(Price)` table, one row per pair.
#[derive(Debug, Clone)]
pub struct YearlyMaxTable {
    df: DataFrame,
}

impl YearlyMaxTable {
    pub(crate) fn from_dataframe(df: DataFrame) -> Self {
        Self { df }
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Materialize the frame as typed rows, keeping frame order.
    pub fn rows(&self) -> PolarsResult<Vec<YearlyMax>> {
        let years = self.df.column(YEAR)?.i32()?;
        let fuel_types = self.df.column(FUEL_TYPE)?.str()?;
        let prices = self.df.column(PRICE)?.f64()?;

        let mut rows = Vec::with_capacity(self.df.height());
        for i in 0..self.df.height() {
            if let (Some(year), Some(fuel_type), Some(price)) =
                (years.get(i), fuel_types.get(i), prices.get(i))
            {
                rows.push(YearlyMax::new(year, fuel_type, price));
            }
        }
        Ok(rows)
    }
}
