//! Aggregation Module
//! Yearly maxima per fuel type, category filtering and extreme rows.

use crate::data::{NormalizedTable, YearlyMax, YearlyMaxTable, FUEL_TYPE, PRICE, YEAR};
use polars::prelude::*;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No rows to take an extreme value from")]
pub struct EmptyInputError;

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error(transparent)]
    EmptyInput(#[from] EmptyInputError),
}

/// Numeric field of a [`YearlyMax`] row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Year,
    Price,
}

impl Field {
    fn value(self, row: &YearlyMax) -> f64 {
        match self {
            Field::Year => f64::from(row.year),
            Field::Price => row.price,
        }
    }
}

/// Which end of the range [`Aggregator::extremum`] looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Min,
    Max,
}

/// Grouping and lookup operations over the normalized table.
pub struct Aggregator;

impl Aggregator {
    /// Maximum price per `(Year, FuelType)`, sorted by year then fuel type.
    ///
    /// Pairs without any record produce no row.
    pub fn aggregate_max(table: &NormalizedTable) -> Result<YearlyMaxTable, AggregateError> {
        let df = table
            .to_dataframe()?
            .lazy()
            .group_by_stable([col(YEAR), col(FUEL_TYPE)])
            .agg([col(PRICE).max()])
            .sort_by_exprs(
                vec![col(YEAR), col(FUEL_TYPE)],
                SortMultipleOptions::default().with_maintain_order(true),
            )
            .collect()?;
        Ok(YearlyMaxTable::from_dataframe(df))
    }

    /// Distinct fuel types in order of first appearance.
    pub fn distinct_categories(table: &NormalizedTable) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut categories = Vec::new();
        for record in table {
            if seen.insert(record.fuel_type.as_str()) {
                categories.push(record.fuel_type.clone());
            }
        }
        categories
    }

    /// Rows of the aggregated table for one fuel type (exact match).
    pub fn filter_by_category(
        aggregated: &YearlyMaxTable,
        category: &str,
    ) -> Result<YearlyMaxTable, AggregateError> {
        let filtered = aggregated
            .dataframe()
            .clone()
            .lazy()
            .filter(col(FUEL_TYPE).eq(lit(category)))
            .collect()?;
        Ok(YearlyMaxTable::from_dataframe(filtered))
    }

    /// Row holding the smallest or largest value of `field`.
    ///
    /// On ties the earliest row wins.
    pub fn extremum(
        rows: &[YearlyMax],
        field: Field,
        extreme: Extreme,
    ) -> Result<&YearlyMax, EmptyInputError> {
        let (first, rest) = rows.split_first().ok_or(EmptyInputError)?;
        let mut best = first;
        for row in rest {
            let (candidate, current) = (field.value(row), field.value(best));
            let better = match extreme {
                Extreme::Min => candidate < current,
                Extreme::Max => candidate > current,
            };
            if better {
                best = row;
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::NormalizedRecord;
    use chrono::{Datelike, NaiveDate};

    fn record(fuel: &str, date: (i32, u32, u32), price: f64) -> NormalizedRecord {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        NormalizedRecord {
            fuel_type: fuel.to_string(),
            price_series_id: "1".to_string(),
            period_label: String::new(),
            period_code: date.format("%Y-%m-%d").to_string(),
            price,
            date,
            year: date.year(),
            month: date.month(),
        }
    }

    fn sample() -> NormalizedTable {
        NormalizedTable::new(vec![
            record("Nafta [Kč/l]", (2021, 1, 1), 28.0),
            record("LPG [Kč/l]", (2020, 3, 1), 15.0),
            record("Nafta [Kč/l]", (2020, 1, 1), 30.0),
            record("Nafta [Kč/l]", (2020, 6, 1), 32.0),
            record("LPG [Kč/l]", (2020, 9, 1), 17.5),
            record("CNG [Kč/kg]", (2022, 2, 1), 40.0),
        ])
    }

    #[test]
    fn aggregate_max_one_row_per_pair_sorted() {
        let table = sample();
        let rows = Aggregator::aggregate_max(&table).unwrap().rows().unwrap();

        assert_eq!(
            rows,
            vec![
                YearlyMax::new(2020, "LPG [Kč/l]", 17.5),
                YearlyMax::new(2020, "Nafta [Kč/l]", 32.0),
                YearlyMax::new(2021, "Nafta [Kč/l]", 28.0),
                YearlyMax::new(2022, "CNG [Kč/kg]", 40.0),
            ]
        );
    }

    #[test]
    fn aggregate_max_groups_exist_and_dominate_inputs() {
        let table = sample();
        let rows = Aggregator::aggregate_max(&table).unwrap().rows().unwrap();

        for row in &rows {
            let group: Vec<f64> = table
                .iter()
                .filter(|r| r.year == row.year && r.fuel_type == row.fuel_type)
                .map(|r| r.price)
                .collect();
            assert!(!group.is_empty());
            assert!(group.iter().all(|p| row.price >= *p));
            assert!(group.contains(&row.price));
        }

        let keys: HashSet<(i32, String)> = rows
            .iter()
            .map(|r| (r.year, r.fuel_type.clone()))
            .collect();
        assert_eq!(keys.len(), rows.len());
    }

    #[test]
    fn aggregate_max_of_empty_table_is_empty() {
        let aggregated = Aggregator::aggregate_max(&NormalizedTable::default()).unwrap();
        assert!(aggregated.is_empty());
    }

    #[test]
    fn categories_keep_first_seen_order() {
        assert_eq!(
            Aggregator::distinct_categories(&sample()),
            vec!["Nafta [Kč/l]", "LPG [Kč/l]", "CNG [Kč/kg]"]
        );
    }

    #[test]
    fn filter_partitions_the_aggregate() {
        let table = sample();
        let aggregated = Aggregator::aggregate_max(&table).unwrap();
        let all = aggregated.rows().unwrap();

        let mut union = Vec::new();
        for category in Aggregator::distinct_categories(&table) {
            let rows = Aggregator::filter_by_category(&aggregated, &category)
                .unwrap()
                .rows()
                .unwrap();
            assert!(rows.iter().all(|r| r.fuel_type == category));
            union.extend(rows);
        }

        assert_eq!(union.len(), all.len());
        for row in &all {
            assert!(union.contains(row));
        }
    }

    #[test]
    fn filter_is_case_sensitive() {
        let aggregated = Aggregator::aggregate_max(&sample()).unwrap();
        let rows = Aggregator::filter_by_category(&aggregated, "nafta [kč/l]").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn extremum_bounds_every_row() {
        let rows = Aggregator::aggregate_max(&sample()).unwrap().rows().unwrap();
        let min = Aggregator::extremum(&rows, Field::Price, Extreme::Min).unwrap();
        let max = Aggregator::extremum(&rows, Field::Price, Extreme::Max).unwrap();

        assert!(rows.iter().all(|r| min.price <= r.price));
        assert!(rows.iter().all(|r| max.price >= r.price));
        assert_eq!(min.price, 17.5);
        assert_eq!(max.price, 40.0);
    }

    #[test]
    fn extremum_ties_pick_first_row() {
        let rows = vec![
            YearlyMax::new(2019, "LPG [Kč/l]", 20.0),
            YearlyMax::new(2020, "LPG [Kč/l]", 15.0),
            YearlyMax::new(2021, "LPG [Kč/l]", 20.0),
            YearlyMax::new(2022, "LPG [Kč/l]", 15.0),
        ];
        let min = Aggregator::extremum(&rows, Field::Price, Extreme::Min).unwrap();
        let max = Aggregator::extremum(&rows, Field::Price, Extreme::Max).unwrap();
        assert_eq!(min.year, 2020);
        assert_eq!(max.year, 2019);

        let latest = Aggregator::extremum(&rows, Field::Year, Extreme::Max).unwrap();
        assert_eq!(latest.year, 2022);
    }

    #[test]
    fn extremum_of_nothing_is_an_error() {
        assert_eq!(
            Aggregator::extremum(&[], Field::Price, Extreme::Min),
            Err(EmptyInputError)
        );
    }
}
