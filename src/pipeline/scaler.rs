//! Standardization of numeric columns

use polars::prelude::*;
use serde::Serialize;

use super::encoder::{EncodedColumn, FeatureGroup};
use super::error::PipelineResult;

/// Fitted mean and standard deviation of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalingStats {
    pub name: String,
    pub mean: f64,
    /// Population standard deviation; 1.0 when the column is constant
    pub std: f64,
}

/// Zero-mean, unit-variance scaler.
///
/// Nulls are ignored while fitting and stay null after transforming.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StandardScaler {
    stats: Vec<ScalingStats>,
}

impl StandardScaler {
    pub fn fit(df: &DataFrame, columns: &[String]) -> PipelineResult<Self> {
        let stats = columns
            .iter()
            .map(|name| -> PipelineResult<ScalingStats> {
                let values = float_values(df.column(name)?)?;
                let (mean, std) = mean_and_std(&values);
                Ok(ScalingStats {
                    name: name.clone(),
                    mean,
                    std,
                })
            })
            .collect::<PipelineResult<Vec<_>>>()?;

        Ok(Self { stats })
    }

    pub fn transform(&self, df: &DataFrame) -> PipelineResult<Vec<EncodedColumn>> {
        self.stats
            .iter()
            .map(|s| -> PipelineResult<EncodedColumn> {
                let scaled: Vec<Option<f64>> = float_values(df.column(&s.name)?)?
                    .into_iter()
                    .map(|v| v.map(|x| (x - s.mean) / s.std))
                    .collect();
                Ok(EncodedColumn::new(
                    &s.name,
                    FeatureGroup::Numeric,
                    &s.name,
                    Column::new(s.name.as_str().into(), scaled),
                ))
            })
            .collect()
    }

    pub fn stats(&self) -> &[ScalingStats] {
        &self.stats
    }
}

fn float_values(column: &Column) -> PipelineResult<Vec<Option<f64>>> {
    let cast = column.cast(&DataType::Float64)?;
    let values = cast
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    Ok(values)
}

fn mean_and_std(values: &[Option<f64>]) -> (f64, f64) {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return (0.0, 1.0);
    }

    let n = present.len() as f64;
    let mean = present.iter().sum::<f64>() / n;
    let variance = present.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    // Constant columns scale to all zeros
    if std == 0.0 || !std.is_finite() {
        (mean, 1.0)
    } else {
        (mean, std)
    }
}
