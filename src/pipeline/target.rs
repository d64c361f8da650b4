//! Target column normalization
//!
//! Coerces a label column (yes/no text, numbers, booleans) into a strict
//! 0/1 encoding. Anything that cannot be resolved is a fatal error rather
//! than a silently cast value.

use polars::prelude::*;

use super::error::{PipelineError, PipelineResult};

/// Label spellings that map to 1, compared after trimming and lower-casing
pub const AFFIRMATIVE_LABELS: [&str; 5] = ["yes", "true", "1", "si", "sí"];

/// Label spellings that map to 0, compared after trimming and lower-casing
pub const NEGATIVE_LABELS: [&str; 3] = ["no", "false", "0"];

/// Normalize a raw label column to a vector of 0/1 values.
///
/// - Text: vocabulary lookup first, then numeric coercion of the trimmed value.
/// - Numeric: each value must be exactly 0 or 1.
/// - Boolean: `true → 1`, `false → 0`.
///
/// Numeric values other than 0 and 1 are rejected, never clamped. Nulls are
/// rejected as well.
pub fn normalize_target(column: &Column) -> PipelineResult<Vec<i32>> {
    let dtype = column.dtype();

    if *dtype == DataType::Boolean {
        return column
            .bool()?
            .into_iter()
            .enumerate()
            .map(|(row, v)| v.map(i32::from).ok_or_else(|| unresolved(row, None)))
            .collect();
    }

    if dtype.is_primitive_numeric() {
        let cast = column.cast(&DataType::Float64)?;
        return cast
            .f64()?
            .into_iter()
            .enumerate()
            .map(|(row, v)| {
                v.and_then(resolve_numeric)
                    .ok_or_else(|| unresolved(row, v.map(|n| n.to_string())))
            })
            .collect();
    }

    let cast = column.cast(&DataType::String)?;
    let labels = cast
        .str()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            v.and_then(resolve_text)
                .ok_or_else(|| unresolved(row, v.map(str::to_string)))
        })
        .collect::<PipelineResult<Vec<i32>>>()?;

    Ok(labels)
}

fn resolve_text(raw: &str) -> Option<i32> {
    let normalized = raw.trim().to_lowercase();
    if AFFIRMATIVE_LABELS.contains(&normalized.as_str()) {
        return Some(1);
    }
    if NEGATIVE_LABELS.contains(&normalized.as_str()) {
        return Some(0);
    }
    raw.trim().parse::<f64>().ok().and_then(resolve_numeric)
}

fn resolve_numeric(value: f64) -> Option<i32> {
    if value == 0.0 {
        Some(0)
    } else if value == 1.0 {
        Some(1)
    } else {
        None
    }
}

fn unresolved(row: usize, value: Option<String>) -> PipelineError {
    PipelineError::UnresolvedLabel {
        row,
        value: value.unwrap_or_else(|| "null".to_string()),
    }
}

/// Count `(zeros, ones)` in a normalized label vector.
pub fn count_classes(labels: &[i32]) -> (usize, usize) {
    let ones = labels.iter().filter(|&&v| v == 1).count();
    (labels.len() - ones, ones)
}
