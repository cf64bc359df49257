use crate::domain::model::{TimingSample, TimingSeries};
use crate::utils::error::{AnalysisError, Result};
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::{Path, PathBuf};

pub const CSV_EXTENSION: &str = ".csv";
pub const CSV_DELIMITER: u8 = b';';
pub const DEFAULT_EXCLUDE_PATTERN: &str = "_coarse";

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

/// Keeps the paths whose file name ends with `.csv`, sorted by file name.
pub fn select_csv_files(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut csv_files: Vec<PathBuf> = paths
        .into_iter()
        .filter(|p| file_name(p).is_some_and(|n| n.ends_with(CSV_EXTENSION)))
        .collect();
    csv_files.sort_by(|a, b| file_name(a).cmp(&file_name(b)));
    csv_files
}

/// Only the file name is matched, never the directory part.
pub fn is_excluded(path: &Path, pattern: &str) -> bool {
    file_name(path).is_some_and(|n| n.contains(pattern))
}

/// Legend label of a file: its name without the `.csv` extension.
pub fn series_name(path: &Path) -> String {
    let name = file_name(path).unwrap_or_default();
    name.strip_suffix(CSV_EXTENSION).unwrap_or(name).to_string()
}

fn parse_field(path: &Path, row: usize, column: &str, value: Option<&str>) -> Result<f64> {
    let value = value.ok_or_else(|| AnalysisError::ProcessingError {
        message: format!("{}: row {} has no {} column", path.display(), row, column),
    })?;

    value.parse().map_err(|_| AnalysisError::ProcessingError {
        message: format!(
            "{}: row {} has non-numeric {} '{}'",
            path.display(),
            row,
            column,
            value
        ),
    })
}

/// Reads a `;` separated two-column table (iteration time, delay error)
/// with a header row.
pub fn read_timing_series<R: Read>(path: &Path, reader: R) -> Result<TimingSeries> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(CSV_DELIMITER)
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    // 空檔案沒有標題列
    if headers.is_empty() {
        return Err(AnalysisError::ProcessingError {
            message: format!("{}: missing header row", path.display()),
        });
    }
    tracing::debug!("{} columns: {:?}", path.display(), headers);

    let mut samples = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        let record = result?;
        // 標題為第 1 列
        let row = index + 2;

        samples.push(TimingSample {
            iteration_time_s: parse_field(path, row, "iteration time", record.get(0))?,
            delay_error_s: parse_field(path, row, "delay error", record.get(1))?,
        });
    }

    Ok(TimingSeries {
        name: series_name(path),
        path: path.to_path_buf(),
        samples,
    })
}
