//! Feature matrix assembly
//!
//! Concatenates encoded blocks into one frame ordered by column group
//! (numeric, binary, one-hot, passthrough). Within a group, columns follow
//! the position of their origin column in the input, and columns of the
//! same one-hot block keep their block order.

use std::collections::HashMap;

use faer::Mat;
use polars::prelude::*;

use super::columns::ColumnPartition;
use super::encoder::{
    BinaryMapping, CategoricalEncoder, ColumnDescriptor, EncodedColumn, FeatureGroup,
};
use super::error::{PipelineError, PipelineResult};
use super::scaler::StandardScaler;

/// Assembled output: the frame plus one descriptor per column, in the same order
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    pub frame: DataFrame,
    pub descriptors: Vec<ColumnDescriptor>,
}

impl FeatureMatrix {
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.descriptors.len()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.descriptors.iter().map(|d| d.name.clone()).collect()
    }

    /// Number of columns in `group`
    pub fn group_width(&self, group: FeatureGroup) -> usize {
        self.descriptors.iter().filter(|d| d.group == group).count()
    }

    /// Dense `n_rows x n_cols` matrix for the classifier.
    ///
    /// Missing cells become 0.0. For standardized columns that is the fitted
    /// mean; for a binary column it reads as the value mapped to 0, i.e. the
    /// lexicographically smaller one. Passthrough columns must be
    /// numeric-castable.
    pub fn to_mat(&self) -> PipelineResult<Mat<f64>> {
        let n_rows = self.frame.height();
        let mut mat = Mat::<f64>::zeros(n_rows, self.descriptors.len());
        let mut imputed = 0usize;

        for (col_idx, column) in self.frame.get_columns().iter().enumerate() {
            let cast = column.cast(&DataType::Float64)?;
            for (row_idx, value) in cast.f64()?.into_iter().enumerate() {
                match value {
                    Some(v) if !v.is_nan() => mat[(row_idx, col_idx)] = v,
                    _ => imputed += 1,
                }
            }
        }

        if imputed > 0 {
            log::warn!("Imputed {} missing cell(s) as 0.0 in the feature matrix", imputed);
        }

        Ok(mat)
    }
}

/// Concatenate encoded blocks into the fixed group order.
///
/// `source_order` is the input's column order and `height` its row count;
/// a block of any other length fails with [`PipelineError::RowCountMismatch`],
/// and two blocks sharing an output name fail with
/// [`PipelineError::DuplicateColumn`].
pub fn assemble_matrix(
    source_order: &[String],
    height: usize,
    blocks: Vec<EncodedColumn>,
) -> PipelineResult<FeatureMatrix> {
    for block in &blocks {
        if block.column.len() != height {
            return Err(PipelineError::RowCountMismatch {
                column: block.descriptor.name.clone(),
                expected: height,
                actual: block.column.len(),
            });
        }
    }

    let mut seen: HashMap<&str, &str> = HashMap::with_capacity(blocks.len());
    for block in &blocks {
        let descriptor = &block.descriptor;
        if let Some(first) = seen.insert(&descriptor.name, &descriptor.origin) {
            return Err(PipelineError::DuplicateColumn {
                name: descriptor.name.clone(),
                first: first.to_string(),
                second: descriptor.origin.clone(),
            });
        }
    }

    let origin_position = |origin: &str| {
        source_order
            .iter()
            .position(|name| name == origin)
            .unwrap_or(usize::MAX)
    };

    let mut blocks = blocks;
    // Stable sort: block-internal order survives
    blocks.sort_by_key(|b| (b.descriptor.group, origin_position(&b.descriptor.origin)));

    let (descriptors, columns): (Vec<ColumnDescriptor>, Vec<Column>) = blocks
        .into_iter()
        .map(|b| (b.descriptor, b.column))
        .unzip();

    let frame = DataFrame::new(columns)?;

    Ok(FeatureMatrix { frame, descriptors })
}

/// Fitted numeric scaler, categorical encoder and passthrough list.
///
/// `fit` learns every statistic from one frame; `transform` applies them to
/// any frame with the same columns, so a training-partition fit never sees
/// held-out rows.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    scaler: StandardScaler,
    categorical: CategoricalEncoder,
    passthrough: Vec<String>,
    source_order: Vec<String>,
}

impl FeatureEncoder {
    pub fn fit(
        df: &DataFrame,
        partition: &ColumnPartition,
        separator: &str,
    ) -> PipelineResult<Self> {
        let scaler = StandardScaler::fit(df, &partition.numeric())?;
        let categorical = CategoricalEncoder::fit(df, &partition.categorical(), separator)?;

        Ok(Self {
            scaler,
            categorical,
            passthrough: partition.passthrough(),
            source_order: partition.feature_order(),
        })
    }

    pub fn transform(&self, df: &DataFrame) -> PipelineResult<FeatureMatrix> {
        let mut blocks = self.scaler.transform(df)?;
        blocks.extend(self.categorical.transform(df)?);
        for name in &self.passthrough {
            blocks.push(EncodedColumn::new(
                name,
                FeatureGroup::Passthrough,
                name,
                df.column(name)?.clone(),
            ));
        }

        assemble_matrix(&self.source_order, df.height(), blocks)
    }

    pub fn fit_transform(
        df: &DataFrame,
        partition: &ColumnPartition,
        separator: &str,
    ) -> PipelineResult<(Self, FeatureMatrix)> {
        let encoder = Self::fit(df, partition, separator)?;
        let matrix = encoder.transform(df)?;
        Ok((encoder, matrix))
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn categorical(&self) -> &CategoricalEncoder {
        &self.categorical
    }

    pub fn binary_mappings(&self) -> Vec<BinaryMapping> {
        self.categorical.binary_mappings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::columns::classify_columns;

    fn mixed_df() -> DataFrame {
        df! {
            "Smoking" => ["Yes", "No", "Yes", "No"],
            "BMI" => [16.6f64, 20.3, 26.6, 24.2],
            "Race" => ["White", "Black", "Asian", "White"],
            "Sex" => ["Female", "Male", "Male", "Female"],
            "SleepTime" => [5i64, 7, 8, 6],
        }
        .unwrap()
    }

    #[test]
    fn test_group_order_numeric_binary_onehot() {
        let df = mixed_df();
        let partition = classify_columns(&df, None).unwrap();
        let (_, matrix) = FeatureEncoder::fit_transform(&df, &partition, "__").unwrap();

        assert_eq!(
            matrix.column_names(),
            vec![
                "BMI",
                "SleepTime",
                "Smoking",
                "Sex",
                "Race__Asian",
                "Race__Black",
                "Race__White",
                "Race__nan",
            ]
        );
        assert_eq!(matrix.group_width(FeatureGroup::Numeric), 2);
        assert_eq!(matrix.group_width(FeatureGroup::Binary), 2);
        assert_eq!(matrix.group_width(FeatureGroup::OneHot), 4);
        assert_eq!(matrix.height(), 4);
    }

    #[test]
    fn test_separator_token_in_source_name_does_not_change_group() {
        let df = df! {
            "age__years" => [30.0f64, 40.0, 50.0],
            "flag" => ["a", "b", "a"],
        }
        .unwrap();
        let partition = classify_columns(&df, None).unwrap();
        let (_, matrix) = FeatureEncoder::fit_transform(&df, &partition, "__").unwrap();

        assert_eq!(matrix.descriptors[0].name, "age__years");
        assert_eq!(matrix.descriptors[0].group, FeatureGroup::Numeric);
        assert_eq!(matrix.descriptors[1].group, FeatureGroup::Binary);
    }

    #[test]
    fn test_row_count_mismatch_detected() {
        let blocks = vec![
            EncodedColumn::new(
                "a",
                FeatureGroup::Numeric,
                "a",
                Column::new("a".into(), [1.0f64, 2.0]),
            ),
            EncodedColumn::new("b", FeatureGroup::Binary, "b", Column::new("b".into(), [1i32])),
        ];

        let result = assemble_matrix(&["a".to_string(), "b".to_string()], 2, blocks);
        match result {
            Err(PipelineError::RowCountMismatch { column, expected, actual }) => {
                assert_eq!(column, "b");
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("Expected RowCountMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_to_mat_imputes_missing_as_zero() {
        let df = df! {
            "Sex" => [Some("Female"), None, Some("Male")],
            "BMI" => [Some(1.0f64), Some(3.0), None],
        }
        .unwrap();
        let partition = classify_columns(&df, None).unwrap();
        let (_, matrix) = FeatureEncoder::fit_transform(&df, &partition, "__").unwrap();
        let mat = matrix.to_mat().unwrap();

        assert_eq!(mat.nrows(), 3);
        assert_eq!(mat.ncols(), 2);
        assert_eq!(mat[(0, 0)], -1.0);
        assert_eq!(mat[(2, 0)], 0.0);
        // Missing binary cell reads as the value mapped to 0 ("Female")
        assert_eq!(mat[(1, 1)], 0.0);
        assert_eq!(mat[(2, 1)], 1.0);
    }

    #[test]
    fn test_duplicate_output_name_is_typed_error() {
        let df = df! {
            "Race__Asian" => [1.0f64, 2.0, 3.0],
            "Race" => ["Asian", "Black", "White"],
        }
        .unwrap();
        let partition = classify_columns(&df, None).unwrap();

        match FeatureEncoder::fit_transform(&df, &partition, "__") {
            Err(PipelineError::DuplicateColumn {
                name,
                first,
                second,
            }) => {
                assert_eq!(name, "Race__Asian");
                assert_eq!(first, "Race__Asian");
                assert_eq!(second, "Race");
            }
            other => panic!("Expected DuplicateColumn, got {:?}", other),
        }
    }
}
