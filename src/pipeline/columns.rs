//! Column role classification
//!
//! Splits a frame into the target column and numeric, categorical and
//! passthrough feature columns, based purely on each column's dtype.

use polars::prelude::*;
use serde::Serialize;

use super::error::{PipelineError, PipelineResult};

/// Role of a feature column in the encoding pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnRole {
    /// Native numeric dtype, standardized
    Numeric,
    /// Text, boolean or categorical dtype, binary-mapped or one-hot expanded
    Categorical,
    /// Anything else (dates, durations, nested types), carried through untouched
    Passthrough,
}

impl ColumnRole {
    pub fn from_dtype(dtype: &DataType) -> Self {
        if dtype.is_primitive_numeric() {
            return ColumnRole::Numeric;
        }
        match dtype {
            DataType::String
            | DataType::Boolean
            | DataType::Categorical(..)
            | DataType::Enum(..) => ColumnRole::Categorical,
            _ => ColumnRole::Passthrough,
        }
    }
}

impl std::fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnRole::Numeric => write!(f, "numeric"),
            ColumnRole::Categorical => write!(f, "categorical"),
            ColumnRole::Passthrough => write!(f, "passthrough"),
        }
    }
}

/// Result of classifying a frame's columns
#[derive(Debug, Clone)]
pub struct ColumnPartition {
    /// The target column, when one was requested
    pub target: Option<Column>,
    /// Every non-target column with its role, in file order
    pub roles: Vec<(String, ColumnRole)>,
}

impl ColumnPartition {
    fn names_with_role(&self, role: ColumnRole) -> Vec<String> {
        self.roles
            .iter()
            .filter(|(_, r)| *r == role)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn numeric(&self) -> Vec<String> {
        self.names_with_role(ColumnRole::Numeric)
    }

    pub fn categorical(&self) -> Vec<String> {
        self.names_with_role(ColumnRole::Categorical)
    }

    pub fn passthrough(&self) -> Vec<String> {
        self.names_with_role(ColumnRole::Passthrough)
    }

    /// Feature column names in file order
    pub fn feature_order(&self) -> Vec<String> {
        self.roles.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn role_of(&self, name: &str) -> Option<ColumnRole> {
        self.roles
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, role)| *role)
    }
}

/// Classify every column of `df`, pulling out `target` when given.
///
/// Fails with [`PipelineError::MissingColumn`] if `target` is not a column of `df`.
pub fn classify_columns(df: &DataFrame, target: Option<&str>) -> PipelineResult<ColumnPartition> {
    let target_column = match target {
        Some(name) => Some(
            df.column(name)
                .map_err(|_| PipelineError::MissingColumn {
                    target: name.to_string(),
                    available: df
                        .get_column_names()
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                })?
                .clone(),
        ),
        None => None,
    };

    let roles = df
        .get_columns()
        .iter()
        .filter(|col| Some(col.name().as_str()) != target)
        .map(|col| (col.name().to_string(), ColumnRole::from_dtype(col.dtype())))
        .collect();

    Ok(ColumnPartition {
        target: target_column,
        roles,
    })
}
