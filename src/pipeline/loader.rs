//! Input discovery, CSV loading and saving

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::*;

use super::error::{PipelineError, PipelineResult};

/// Textual cells read as missing, in addition to empty fields
const NULL_MARKERS: [&str; 7] = ["NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// Find the CSV file to process inside `data_dir`.
///
/// Fails with [`PipelineError::NoInputFound`] when the directory does not exist
/// or holds no `.csv` file. When several candidates exist the
/// lexicographically first one is used and a warning names it.
pub fn discover_input_csv(data_dir: &Path) -> PipelineResult<PathBuf> {
    if !data_dir.is_dir() {
        return Err(PipelineError::NoInputFound {
            dir: data_dir.to_path_buf(),
            reason: "directory does not exist".to_string(),
        });
    }

    let mut candidates: Vec<PathBuf> = std::fs::read_dir(data_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && has_csv_extension(path))
        .collect();
    candidates.sort();

    if candidates.is_empty() {
        return Err(PipelineError::NoInputFound {
            dir: data_dir.to_path_buf(),
            reason: "no .csv file present".to_string(),
        });
    }

    if candidates.len() > 1 {
        log::warn!(
            "Found {} CSV files in {}, using the first: {}",
            candidates.len(),
            data_dir.display(),
            candidates[0].display()
        );
    }

    Ok(candidates.swap_remove(0))
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Load a comma-separated file with a header row fully into memory.
///
/// `infer_schema_length` of 0 means a full scan for type inference.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let null_values = NullValues::AllColumns(
        NULL_MARKERS.iter().map(|m| PlSmallStr::from(*m)).collect(),
    );

    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(schema_length)
        .with_null_values(Some(null_values))
        .finish()
        .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        .collect()
        .with_context(|| format!("Failed to parse CSV file: {}", path.display()))?;

    log::debug!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );

    Ok(df)
}

/// Read only the header of a CSV file.
pub fn get_column_names(path: &Path) -> Result<Vec<String>> {
    let schema = LazyCsvReader::new(path)
        .with_has_header(true)
        .finish()
        .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        .collect_schema()
        .with_context(|| format!("Failed to read CSV schema: {}", path.display()))?;

    Ok(schema.iter_names().map(|name| name.to_string()).collect())
}

/// Estimated in-memory size of a frame in megabytes
pub fn estimated_memory_mb(df: &DataFrame) -> f64 {
    df.estimated_size() as f64 / (1024.0 * 1024.0)
}

/// Serialize a frame to CSV bytes, missing cells as empty fields.
pub fn render_csv(df: &mut DataFrame) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(df)
        .context("Failed to serialize frame to CSV")?;
    Ok(buffer)
}

/// Write a frame to CSV, missing cells as empty fields.
pub fn save_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    let bytes = render_csv(df)?;
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))
}

/// Select rows by position, keeping the given order.
pub fn take_rows(df: &DataFrame, indices: &[usize]) -> PipelineResult<DataFrame> {
    let idx = IdxCa::from_vec(
        "idx".into(),
        indices.iter().map(|&i| i as IdxSize).collect(),
    );
    Ok(df.take(&idx)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_csv_extension_is_case_insensitive() {
        assert!(has_csv_extension(Path::new("survey.csv")));
        assert!(has_csv_extension(Path::new("survey.CSV")));
        assert!(!has_csv_extension(Path::new("survey.parquet")));
        assert!(!has_csv_extension(Path::new("survey")));
    }

    #[test]
    fn test_take_rows_preserves_requested_order() {
        let df = df! {
            "a" => [10i32, 20, 30, 40],
        }
        .unwrap();

        let taken = take_rows(&df, &[3, 0]).unwrap();
        let values: Vec<Option<i32>> =
            taken.column("a").unwrap().i32().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(40), Some(10)]);
    }
}
