//! Fuel Price Dashboard
//! Owns the loaded table and the tables derived from it.

use crate::data::{DataLoader, LoadOptions, LoaderError, NormalizedTable, YearlyMax, YearlyMaxTable};
use crate::stats::{AggregateError, Aggregator, Extreme, Field};
use once_cell::unsync::OnceCell;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Everything shown for one selected fuel type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    /// Yearly maxima, oldest year first.
    pub series: Vec<YearlyMax>,
    pub lowest: YearlyMax,
    pub highest: YearlyMax,
}

impl CategorySummary {
    pub fn min_price(&self) -> f64 {
        self.lowest.price
    }

    pub fn min_year(&self) -> i32 {
        self.lowest.year
    }

    pub fn max_price(&self) -> f64 {
        self.highest.price
    }

    pub fn max_year(&self) -> i32 {
        self.highest.year
    }
}

/// The loaded dataset plus lazily computed views of it.
///
/// The source file is read once; categories and the yearly maxima are
/// computed on first use and reused afterwards.
pub struct FuelDashboard {
    table: NormalizedTable,
    categories: OnceCell<Vec<String>>,
    yearly_max: OnceCell<YearlyMaxTable>,
}

impl FuelDashboard {
    /// Load the dataset at `path`.
    pub fn open(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self, LoaderError> {
        let table = DataLoader::load_csv(path, options)?;
        Ok(Self::from_table(table))
    }

    pub fn from_table(table: NormalizedTable) -> Self {
        Self {
            table,
            categories: OnceCell::new(),
            yearly_max: OnceCell::new(),
        }
    }

    pub fn table(&self) -> &NormalizedTable {
        &self.table
    }

    /// Fuel types in order of first appearance.
    pub fn categories(&self) -> &[String] {
        self.categories
            .get_or_init(|| Aggregator::distinct_categories(&self.table))
    }

    /// Category selected when none is given.
    pub fn default_category(&self) -> Option<&str> {
        self.categories().first().map(String::as_str)
    }

    pub fn yearly_max(&self) -> Result<&YearlyMaxTable, AggregateError> {
        self.yearly_max.get_or_try_init(|| {
            let aggregated = Aggregator::aggregate_max(&self.table)?;
            debug!(groups = aggregated.height(), "computed yearly maxima");
            Ok(aggregated)
        })
    }

    /// Yearly maxima of one fuel type.
    pub fn series(&self, category: &str) -> Result<Vec<YearlyMax>, AggregateError> {
        let filtered = Aggregator::filter_by_category(self.yearly_max()?, category)?;
        Ok(filtered.rows()?)
    }

    /// Series plus lowest and highest yearly maximum of one fuel type.
    ///
    /// A category without rows yields [`AggregateError::EmptyInput`].
    pub fn summary(&self, category: &str) -> Result<CategorySummary, AggregateError> {
        let series = self.series(category)?;
        let lowest = Aggregator::extremum(&series, Field::Price, Extreme::Min)?.clone();
        let highest = Aggregator::extremum(&series, Field::Price, Extreme::Max)?.clone();

        Ok(CategorySummary {
            category: category.to_string(),
            series,
            lowest,
            highest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataProcessor, Record};
    use crate::stats::EmptyInputError;

    fn diesel(code: &str, price: f64) -> Record {
        Record {
            fuel_type: "Motorová nafta [Kč/l]".to_string(),
            price_series_id: "7004".to_string(),
            period_label: String::new(),
            period_code: code.to_string(),
            price,
        }
    }

    fn dashboard() -> FuelDashboard {
        let records = [
            diesel("2020-01-01", 30.0),
            diesel("2020-06-01", 32.0),
            diesel("2021-01-01", 28.0),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, r)| DataProcessor::normalize_record(r, i + 1).unwrap())
        .collect();
        FuelDashboard::from_table(NormalizedTable::new(records))
    }

    #[test]
    fn diesel_walkthrough() {
        let dash = dashboard();
        assert_eq!(dash.categories(), ["Nafta [Kč/l]".to_string()]);
        assert_eq!(dash.default_category(), Some("Nafta [Kč/l]"));

        let summary = dash.summary("Nafta [Kč/l]").unwrap();
        assert_eq!(
            summary.series,
            vec![
                YearlyMax::new(2020, "Nafta [Kč/l]", 32.0),
                YearlyMax::new(2021, "Nafta [Kč/l]", 28.0),
            ]
        );
        assert_eq!((summary.min_year(), summary.min_price()), (2021, 28.0));
        assert_eq!((summary.max_year(), summary.max_price()), (2020, 32.0));
    }

    #[test]
    fn yearly_max_is_computed_once() {
        let dash = dashboard();
        let first = dash.yearly_max().unwrap() as *const YearlyMaxTable;
        let second = dash.yearly_max().unwrap() as *const YearlyMaxTable;
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_category_is_empty_input() {
        let dash = dashboard();
        assert!(dash.series("LPG [Kč/l]").unwrap().is_empty());
        assert!(matches!(
            dash.summary("LPG [Kč/l]"),
            Err(AggregateError::EmptyInput(EmptyInputError))
        ));
    }

    #[test]
    fn empty_dashboard_has_no_default() {
        let dash = FuelDashboard::from_table(NormalizedTable::default());
        assert!(dash.categories().is_empty());
        assert_eq!(dash.default_category(), None);
    }
}
