//! CSV Ingestion Module
//! Reads the fixed-name dataset files and merges the compact/detailed
//! result pairs across the 2003 era boundary using Polars.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::schema::DETAILED_ERA_START;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("data file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("{file}: missing required column {column:?}")]
    MissingColumn { file: &'static str, column: String },
    #[error("{file}: unexpected column contents: {source}")]
    Column {
        file: &'static str,
        #[source]
        source: PolarsError,
    },
    #[error("results schema mismatch: {reason}")]
    HeaderMismatch { reason: String },
    #[error("failed to merge result tables: {source}")]
    Merge {
        #[source]
        source: PolarsError,
    },
}

/// Read one dataset file into a DataFrame.
///
/// A missing file and an unparseable file are reported separately so the
/// caller can tell an incomplete dataset directory from a corrupt one.
pub(crate) fn read_table(dir: &Path, file: &'static str) -> Result<DataFrame, LoadError> {
    let path = dir.join(file);
    if !path.is_file() {
        return Err(LoadError::FileNotFound { path });
    }

    let df = LazyCsvReader::new(path.clone())
        .with_infer_schema_length(Some(10000))
        .finish()
        .and_then(|lf| lf.collect())
        .map_err(|source| LoadError::Parse { path, source })?;

    debug!(file, rows = df.height(), "loaded table");
    Ok(df)
}

/// Stack compact-era rows (seasons before the detailed era) on top of the
/// full detailed table. The result carries the union schema in detailed
/// column order, with nulls in the box-score columns of compact-era rows.
pub(crate) fn merge_result_eras(
    compact: &DataFrame,
    detailed: &DataFrame,
) -> Result<DataFrame, LoadError> {
    let early = compact
        .clone()
        .lazy()
        .filter(col("Season").lt(lit(DETAILED_ERA_START)));

    let merged = concat_lf_diagonal([early, detailed.clone().lazy()], UnionArgs::default())
        .and_then(|lf| lf.collect())
        .map_err(|source| LoadError::Merge { source })?;

    debug!(rows = merged.height(), "merged result eras");
    Ok(merged)
}

/// Column names of a frame, in source order.
pub(crate) fn header_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Fail if any of the named columns is absent from the frame.
pub(crate) fn require_columns(
    df: &DataFrame,
    file: &'static str,
    columns: &[&str],
) -> Result<(), LoadError> {
    for column in columns {
        if df.column(column).is_err() {
            return Err(LoadError::MissingColumn {
                file,
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}
