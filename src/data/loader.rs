//! CSV Data Loader Module
//! Reads the fuel price export with Polars and projects it onto the canonical columns.

use super::period::PeriodError;
use super::processor::DataProcessor;
use super::record::{NormalizedTable, FUEL_TYPE, PERIOD_CODE, PERIOD_LABEL, PRICE, PRICE_SERIES_ID};
use polars::prelude::*;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Source column names and the canonical name each one is renamed to.
pub const COLUMN_RENAMES: [(&str, &str); 5] = [
    ("Druh PHM", FUEL_TYPE),
    ("CENPHM1", PRICE_SERIES_ID),
    ("Měsíce", PERIOD_LABEL),
    ("CasM", PERIOD_CODE),
    ("Hodnota", PRICE),
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Cannot read {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Missing column '{0}'")]
    MissingColumn(String),
    #[error("Row {row}: empty value in column '{column}'")]
    MissingValue { row: usize, column: String },
    #[error("Row {row}: invalid period code '{value}'")]
    DateParse {
        row: usize,
        value: String,
        #[source]
        source: PeriodError,
    },
    #[error("Row {row}: invalid price '{value}'")]
    InvalidPrice { row: usize, value: String },
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Options for reading the source file.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub separator: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { separator: b',' }
    }
}

/// Loads the fuel price table.
pub struct DataLoader;

impl DataLoader {
    /// Load and normalize a CSV file.
    pub fn load_csv(
        file_path: impl AsRef<Path>,
        options: &LoadOptions,
    ) -> Result<NormalizedTable, LoaderError> {
        let path = file_path.as_ref();
        let file = Self::open_source(path)?;

        // Schema inference is switched off so every column arrives as text;
        // the processor owns all value parsing.
        let raw = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_parse_options(CsvParseOptions::default().with_separator(options.separator))
            .into_reader_with_file_handle(file)
            .finish()?;
        debug!(
            path = %path.display(),
            rows = raw.height(),
            columns = raw.width(),
            "read source file"
        );

        let projected = Self::project(&raw)?;
        let table = DataProcessor::normalize(&projected)?;
        info!(path = %path.display(), rows = table.len(), "loaded fuel price table");
        Ok(table)
    }

    /// Open the source as a regular, readable file. The returned handle is
    /// the one the CSV reader consumes.
    fn open_source(path: &Path) -> Result<File, LoaderError> {
        let access = |source: io::Error| LoaderError::FileAccess {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(access)?;
        let metadata = file.metadata().map_err(access)?;
        if !metadata.is_file() {
            return Err(access(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }
        Ok(file)
    }

    /// Keep only the five known source columns, renamed to canonical names.
    pub fn project(df: &DataFrame) -> Result<DataFrame, LoaderError> {
        let present: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        if let Some((missing, _)) = COLUMN_RENAMES
            .iter()
            .find(|(raw, _)| !present.iter().any(|p| p == raw))
        {
            return Err(LoaderError::MissingColumn(missing.to_string()));
        }

        let exprs: Vec<Expr> = COLUMN_RENAMES
            .iter()
            .map(|(raw, canonical)| col(*raw).alias(*canonical))
            .collect();

        Ok(df.clone().lazy().select(exprs).collect()?)
    }
}
