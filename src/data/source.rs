use crate::constants::columns;
use crate::error::{Result, SamplerError};
use crate::series::{Observation, Series};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name used for rows whose run column is null
const UNNAMED_RUN: &str = "unnamed";

/// Which columns of a metrics table hold the series data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Column naming the run each row belongs to; `None` means a single run
    pub run: Option<String>,
    pub step: String,
    pub value: String,
    pub stderr: Option<String>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            run: Some(columns::RUN.to_string()),
            step: columns::STEP.to_string(),
            value: columns::VALUE.to_string(),
            stderr: None,
        }
    }
}

/// Named metric series loaded from a long-format table
///
/// Each row is one observation; rows are grouped by the run column and keep
/// their file order within a run.
#[derive(Debug, Clone, Default)]
pub struct MetricSource {
    runs: BTreeMap<String, Series>,
    file_path: Option<PathBuf>,
}

impl MetricSource {
    /// Load a CSV (with header row) or Parquet file
    pub fn load(path: &Path, mapping: &ColumnMapping) -> Result<Self> {
        profiling::scope!("MetricSource::load");

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| SamplerError::UnsupportedFormat {
                extension: String::new(),
            })?;

        let lazy = match extension.to_lowercase().as_str() {
            "parquet" => LazyFrame::scan_parquet(path, Default::default())?,
            "csv" => LazyCsvReader::new(path)
                .with_has_header(true)
                .with_infer_schema_length(Some(100))
                .finish()?,
            ext => {
                return Err(SamplerError::UnsupportedFormat {
                    extension: ext.to_string(),
                });
            }
        };

        let df = lazy.collect()?;
        let mut source = Self::from_dataframe(&df, mapping)?;
        source.file_path = Some(path.to_path_buf());
        Ok(source)
    }

    /// Build series from an already-loaded DataFrame
    pub fn from_dataframe(df: &DataFrame, mapping: &ColumnMapping) -> Result<Self> {
        let steps = column_as_f64(df, &mapping.step)?;
        let values = column_as_f64(df, &mapping.value)?;
        let stderrs = match &mapping.stderr {
            Some(name) => Some(column_as_f64(df, name)?),
            None => None,
        };
        let names = match &mapping.run {
            Some(name) => Some(column_as_string(df, name)?),
            None => None,
        };

        let mut runs: BTreeMap<String, Series> = BTreeMap::new();
        let mut dropped = 0usize;

        for row in 0..df.height() {
            let (Some(step), Some(value)) = (steps[row], values[row]) else {
                dropped += 1;
                continue;
            };
            let obs = Observation {
                step,
                value,
                stderr: stderrs.as_ref().and_then(|col| col[row]),
            };
            let name = match &names {
                Some(names) => names[row].clone().unwrap_or_else(|| UNNAMED_RUN.to_string()),
                None => mapping.value.clone(),
            };
            runs.entry(name).or_default().push(obs);
        }

        debug!(
            rows = df.height(),
            runs = runs.len(),
            dropped,
            "loaded metric table"
        );

        Ok(Self {
            runs,
            file_path: None,
        })
    }

    pub fn runs(&self) -> &BTreeMap<String, Series> {
        &self.runs
    }

    pub fn run(&self, name: &str) -> Option<&Series> {
        self.runs.get(name)
    }

    pub fn run_names(&self) -> Vec<&str> {
        self.runs.keys().map(String::as_str).collect()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Number of runs
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a polars::prelude::Series> {
    df.column(name)
        .map(|c| c.as_materialized_series())
        .map_err(|_| SamplerError::ColumnNotFound {
            column: name.to_string(),
        })
}

/// Numeric column as optional f64s; unparseable strings become `None`
fn column_as_f64(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = column(df, name)?;

    if let Ok(str_series) = series.str() {
        return Ok(str_series
            .into_iter()
            .map(|opt| opt.and_then(|s| s.trim().parse::<f64>().ok()))
            .collect());
    }

    let cast = series.cast(&DataType::Float64)?;
    Ok(cast
        .f64()?
        .into_iter()
        .map(|opt| opt.filter(|v| !v.is_nan()))
        .collect())
}

fn column_as_string(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = column(df, name)?;
    let cast = series.cast(&DataType::String)?;
    Ok(cast
        .str()?
        .into_iter()
        .map(|opt| opt.map(str::to_string))
        .collect())
}
