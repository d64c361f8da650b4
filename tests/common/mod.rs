//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Small survey frame covering every column role
///
/// - `HeartDisease`: Yes/No label
/// - `BMI`, `SleepTime`: numeric (float and integer)
/// - `Smoking`, `Sex`: two distinct values each (binary)
/// - `Race`: three values plus one missing cell (one-hot)
/// - `Country`: single value (elided)
pub fn create_survey_dataframe() -> DataFrame {
    df! {
        "HeartDisease" => ["No", "Yes", "No", "No", "Yes", "No"],
        "BMI" => [16.6f64, 20.3, 26.6, 24.2, 23.7, 28.9],
        "Smoking" => ["Yes", "No", "Yes", "No", "No", "Yes"],
        "Race" => [Some("White"), Some("Black"), Some("Asian"), None, Some("White"), Some("Black")],
        "Sex" => ["Female", "Female", "Male", "Female", "Male", "Male"],
        "SleepTime" => [5i64, 7, 8, 6, 8, 12],
        "Country" => ["US", "US", "US", "US", "US", "US"],
    }
    .unwrap()
}

/// Larger labelled frame where `BMI` separates the classes cleanly.
///
/// Every 4th row is positive, so `rows = 100` yields 25 positives and 75 negatives.
pub fn create_separable_dataframe(rows: usize) -> DataFrame {
    let labels: Vec<&str> = (0..rows)
        .map(|i| if i % 4 == 0 { "Yes" } else { "No" })
        .collect();
    let bmi: Vec<f64> = (0..rows)
        .map(|i| {
            if i % 4 == 0 {
                35.0 + (i % 5) as f64
            } else {
                20.0 + (i % 7) as f64
            }
        })
        .collect();
    let smoking: Vec<&str> = (0..rows)
        .map(|i| if i % 3 == 0 { "Yes" } else { "No" })
        .collect();
    let race: Vec<&str> = (0..rows)
        .map(|i| ["White", "Black", "Asian", "Hispanic"][i % 4])
        .collect();

    df! {
        "HeartDisease" => labels,
        "BMI" => bmi,
        "Smoking" => smoking,
        "Race" => race,
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Write raw CSV lines to `dir/name`
pub fn write_csv_lines(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    path
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(
        rows, expected_rows,
        "Row count mismatch: expected {}, got {}",
        expected_rows, rows
    );
    assert_eq!(
        cols, expected_cols,
        "Column count mismatch: expected {}, got {}",
        expected_cols, cols
    );
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}

/// Integer values of a column, nulls kept
pub fn int_values(df: &DataFrame, name: &str) -> Vec<Option<i32>> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Int32)
        .unwrap()
        .i32()
        .unwrap()
        .into_iter()
        .collect()
}

/// Float values of a column, nulls kept
pub fn float_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}
