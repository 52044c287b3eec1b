//! Data Processor Module
//! Turns the projected source frame into typed, normalized records.

use super::loader::LoaderError;
use super::period::{parse_period_code, year_month};
use super::record::{
    NormalizedRecord, NormalizedTable, Record, FUEL_TYPE, PERIOD_CODE, PERIOD_LABEL, PRICE,
    PRICE_SERIES_ID,
};
use polars::prelude::*;
use std::collections::HashSet;
use tracing::debug;

/// Raw fuel labels and their shorter display form.
pub const FUEL_LABELS: [(&str, &str); 5] = [
    (
        "Benzin automobilový bezolovnatý Natural 95 [Kč/l]",
        "Natural 95 [Kč/l]",
    ),
    (
        "Benzin automobilový bezolovnatý Super plus 98 [Kč/l]",
        "Natural 98 [Kč/l]",
    ),
    ("LPG [Kč/l]", "LPG [Kč/l]"),
    ("Motorová nafta [Kč/l]", "Nafta [Kč/l]"),
    ("Stlačený zemní plyn - CNG [Kč/kg]", "CNG [Kč/kg]"),
];

/// Display label for a raw fuel label. Unknown labels are returned as is.
pub fn translate_fuel_type(raw: &str) -> &str {
    FUEL_LABELS
        .iter()
        .find(|(from, _)| *from == raw)
        .map(|(_, to)| *to)
        .unwrap_or(raw)
}

fn is_known_fuel_type(raw: &str) -> bool {
    FUEL_LABELS.iter().any(|(from, _)| *from == raw)
}

/// Handles row-level cleaning of the fuel price table.
pub struct DataProcessor;

impl DataProcessor {
    /// Normalize a frame holding the five canonical columns.
    ///
    /// Every cell is read as text. Prices must parse to a finite number and
    /// period codes to a calendar date; the first offending row aborts the
    /// whole table. Row numbers in errors are 1-based data rows.
    pub fn normalize(df: &DataFrame) -> Result<NormalizedTable, LoaderError> {
        let fuel_types = Self::text_column(df, FUEL_TYPE)?;
        let series_ids = Self::text_column(df, PRICE_SERIES_ID)?;
        let period_labels = Self::text_column(df, PERIOD_LABEL)?;
        let period_codes = Self::text_column(df, PERIOD_CODE)?;
        let prices = Self::text_column(df, PRICE)?;

        let fuel_ca = fuel_types.str()?;
        let series_ca = series_ids.str()?;
        let label_ca = period_labels.str()?;
        let code_ca = period_codes.str()?;
        let price_ca = prices.str()?;

        let mut unknown_labels: HashSet<String> = HashSet::new();
        let mut records = Vec::with_capacity(df.height());

        for i in 0..df.height() {
            let row = i + 1;
            let cell = |value: Option<&str>, column: &str| {
                value.map(str::to_string).ok_or_else(|| LoaderError::MissingValue {
                    row,
                    column: column.to_string(),
                })
            };

            let raw_price = cell(price_ca.get(i), PRICE)?;
            let price = Self::parse_price(&raw_price).ok_or_else(|| LoaderError::InvalidPrice {
                row,
                value: raw_price.clone(),
            })?;

            let record = Record {
                fuel_type: cell(fuel_ca.get(i), FUEL_TYPE)?,
                price_series_id: cell(series_ca.get(i), PRICE_SERIES_ID)?,
                period_label: cell(label_ca.get(i), PERIOD_LABEL)?,
                period_code: cell(code_ca.get(i), PERIOD_CODE)?,
                price,
            };

            if !is_known_fuel_type(&record.fuel_type)
                && unknown_labels.insert(record.fuel_type.clone())
            {
                debug!(label = %record.fuel_type, row, "fuel type has no display label");
            }

            records.push(Self::normalize_record(record, row)?);
        }

        Ok(NormalizedTable::new(records))
    }

    /// Translate the label and derive date, year and month.
    pub fn normalize_record(record: Record, row: usize) -> Result<NormalizedRecord, LoaderError> {
        let date = parse_period_code(&record.period_code).map_err(|source| {
            LoaderError::DateParse {
                row,
                value: record.period_code.clone(),
                source,
            }
        })?;
        let (year, month) = year_month(date);

        Ok(NormalizedRecord {
            fuel_type: translate_fuel_type(&record.fuel_type).to_string(),
            price_series_id: record.price_series_id,
            period_label: record.period_label,
            period_code: record.period_code,
            price: record.price,
            date,
            year,
            month,
        })
    }

    fn text_column(df: &DataFrame, name: &str) -> Result<Column, LoaderError> {
        let column = df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
        Ok(column.cast(&DataType::String)?)
    }

    fn parse_price(raw: &str) -> Option<f64> {
        raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}
