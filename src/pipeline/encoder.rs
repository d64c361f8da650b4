//! Categorical encoding: binary mapping and one-hot expansion
//!
//! Each categorical column is fitted once to a [`CategoricalPlan`] based on
//! its cardinality (distinct non-missing canonical strings):
//!
//! - exactly 2 values: binary 0/1 mapping in lexicographic order
//! - 3 or more values: one indicator per value plus one missing indicator
//! - 0 or 1 value: the column carries no information and is elided
//!
//! Plans are applied with [`CategoricalEncoder::transform`], so a fit on a
//! training partition can be reapplied unchanged to held-out rows.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::*;
use serde::Serialize;

use super::error::PipelineResult;

/// Output column group, in assembly order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FeatureGroup {
    Numeric,
    Binary,
    OneHot,
    Passthrough,
}

/// Typed tag carried alongside every encoded column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    /// Output column name
    pub name: String,
    pub group: FeatureGroup,
    /// Input column this output was derived from
    pub origin: String,
}

/// An encoded output column with its descriptor
#[derive(Debug, Clone)]
pub struct EncodedColumn {
    pub descriptor: ColumnDescriptor,
    pub column: Column,
}

impl EncodedColumn {
    pub fn new(name: &str, group: FeatureGroup, origin: &str, column: Column) -> Self {
        Self {
            descriptor: ColumnDescriptor {
                name: name.to_string(),
                group,
                origin: origin.to_string(),
            },
            column,
        }
    }
}

/// Two-value mapping for a binary categorical column.
///
/// `zero` is the lexicographically smaller value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinaryMapping {
    pub column: String,
    pub zero: String,
    pub one: String,
}

impl BinaryMapping {
    pub fn encode(&self, value: &str) -> Option<i32> {
        if value == self.zero {
            Some(0)
        } else if value == self.one {
            Some(1)
        } else {
            None
        }
    }

    /// `{value: code}` view used by the mapping export
    pub fn as_map(&self) -> BTreeMap<String, i32> {
        BTreeMap::from([(self.zero.clone(), 0), (self.one.clone(), 1)])
    }
}

/// Encoding decided for one categorical column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoricalPlan {
    Binary(BinaryMapping),
    OneHot {
        column: String,
        /// Distinct values in sorted order
        values: Vec<String>,
        /// Output name of the missing-row indicator
        missing_indicator: String,
    },
    /// Cardinality 0 or 1; produces no output
    Elided { column: String, cardinality: usize },
}

impl CategoricalPlan {
    pub fn column(&self) -> &str {
        match self {
            CategoricalPlan::Binary(mapping) => &mapping.column,
            CategoricalPlan::OneHot { column, .. } => column,
            CategoricalPlan::Elided { column, .. } => column,
        }
    }
}

/// Fitted categorical encoder
#[derive(Debug, Clone, Default)]
pub struct CategoricalEncoder {
    plans: Vec<CategoricalPlan>,
    separator: String,
}

impl CategoricalEncoder {
    /// Decide a plan for each of `columns` from the values present in `df`.
    pub fn fit(df: &DataFrame, columns: &[String], separator: &str) -> PipelineResult<Self> {
        let mut plans = Vec::with_capacity(columns.len());

        for name in columns {
            let values = canonical_strings(df.column(name)?)?;
            let distinct: BTreeSet<&str> = values.iter().flatten().map(String::as_str).collect();
            let sorted: Vec<String> = distinct.into_iter().map(str::to_string).collect();

            let plan = match sorted.len() {
                0 | 1 => {
                    log::warn!(
                        "Column '{}' has {} distinct value(s) and will be elided",
                        name,
                        sorted.len()
                    );
                    CategoricalPlan::Elided {
                        column: name.clone(),
                        cardinality: sorted.len(),
                    }
                }
                2 => CategoricalPlan::Binary(BinaryMapping {
                    column: name.clone(),
                    zero: sorted[0].clone(),
                    one: sorted[1].clone(),
                }),
                _ => {
                    let missing_indicator = missing_indicator_name(name, separator, &sorted);
                    CategoricalPlan::OneHot {
                        column: name.clone(),
                        values: sorted,
                        missing_indicator,
                    }
                }
            };
            plans.push(plan);
        }

        Ok(Self {
            plans,
            separator: separator.to_string(),
        })
    }

    /// Apply the fitted plans to `df`.
    ///
    /// Values never seen during `fit` become null in a binary column and
    /// all-zero indicators in a one-hot block.
    pub fn transform(&self, df: &DataFrame) -> PipelineResult<Vec<EncodedColumn>> {
        let mut encoded = Vec::new();

        for plan in &self.plans {
            match plan {
                CategoricalPlan::Binary(mapping) => {
                    let values = canonical_strings(df.column(&mapping.column)?)?;
                    let codes: Vec<Option<i32>> = values
                        .iter()
                        .map(|v| v.as_deref().and_then(|s| mapping.encode(s)))
                        .collect();
                    encoded.push(EncodedColumn::new(
                        &mapping.column,
                        FeatureGroup::Binary,
                        &mapping.column,
                        Column::new(mapping.column.as_str().into(), codes),
                    ));
                }
                CategoricalPlan::OneHot {
                    column,
                    values: categories,
                    missing_indicator,
                } => {
                    let values = canonical_strings(df.column(column)?)?;
                    for category in categories {
                        let name = format!("{}{}{}", column, self.separator, category);
                        let flags: Vec<i32> = values
                            .iter()
                            .map(|v| i32::from(v.as_deref() == Some(category.as_str())))
                            .collect();
                        encoded.push(EncodedColumn::new(
                            &name,
                            FeatureGroup::OneHot,
                            column,
                            Column::new(name.as_str().into(), flags),
                        ));
                    }
                    let flags: Vec<i32> = values.iter().map(|v| i32::from(v.is_none())).collect();
                    encoded.push(EncodedColumn::new(
                        missing_indicator,
                        FeatureGroup::OneHot,
                        column,
                        Column::new(missing_indicator.as_str().into(), flags),
                    ));
                }
                CategoricalPlan::Elided { .. } => {}
            }
        }

        Ok(encoded)
    }

    pub fn plans(&self) -> &[CategoricalPlan] {
        &self.plans
    }

    pub fn binary_mappings(&self) -> Vec<BinaryMapping> {
        self.plans
            .iter()
            .filter_map(|plan| match plan {
                CategoricalPlan::Binary(mapping) => Some(mapping.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn elided_columns(&self) -> Vec<String> {
        self.plans
            .iter()
            .filter_map(|plan| match plan {
                CategoricalPlan::Elided { column, .. } => Some(column.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of one-hot blocks
    pub fn one_hot_blocks(&self) -> usize {
        self.plans
            .iter()
            .filter(|plan| matches!(plan, CategoricalPlan::OneHot { .. }))
            .count()
    }
}

fn missing_indicator_name(column: &str, separator: &str, values: &[String]) -> String {
    if values.iter().any(|v| v == "nan") {
        format!("{}{}nan_missing", column, separator)
    } else {
        format!("{}{}nan", column, separator)
    }
}

/// Canonical string form of each cell; `None` for missing cells.
///
/// Strings are kept as-is, booleans become `true`/`false`, categorical
/// dtypes are cast to their labels.
pub fn canonical_strings(column: &Column) -> PipelineResult<Vec<Option<String>>> {
    let cast = column.cast(&DataType::String)?;
    let values = cast
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_values(col: &Column) -> Vec<Option<i32>> {
        col.i32().unwrap().into_iter().collect()
    }

    #[test]
    fn test_binary_mapping_is_lexicographic() {
        let df = df! {
            "Smoking" => ["yes", "no", "yes", "no"],
        }
        .unwrap();

        let encoder = CategoricalEncoder::fit(&df, &["Smoking".to_string()], "__").unwrap();
        let mappings = encoder.binary_mappings();
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].zero, "no");
        assert_eq!(mappings[0].one, "yes");

        let encoded = encoder.transform(&df).unwrap();
        assert_eq!(encoded.len(), 1);
        assert_eq!(encoded[0].descriptor.group, FeatureGroup::Binary);
        assert_eq!(encoded[0].descriptor.name, "Smoking");
        assert_eq!(
            int_values(&encoded[0].column),
            vec![Some(1), Some(0), Some(1), Some(0)]
        );
    }

    #[test]
    fn test_binary_keeps_missing_rows_missing() {
        let df = df! {
            "Sex" => [Some("Female"), None, Some("Male")],
        }
        .unwrap();

        let encoder = CategoricalEncoder::fit(&df, &["Sex".to_string()], "__").unwrap();
        let encoded = encoder.transform(&df).unwrap();
        assert_eq!(int_values(&encoded[0].column), vec![Some(0), None, Some(1)]);
    }

    #[test]
    fn test_one_hot_with_missing_indicator() {
        let df = df! {
            "Race" => [Some("White"), Some("Black"), None, Some("Asian"), Some("White")],
        }
        .unwrap();

        let encoder = CategoricalEncoder::fit(&df, &["Race".to_string()], "__").unwrap();
        let encoded = encoder.transform(&df).unwrap();

        let names: Vec<&str> = encoded.iter().map(|e| e.descriptor.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Race__Asian", "Race__Black", "Race__White", "Race__nan"]
        );
        assert!(encoded
            .iter()
            .all(|e| e.descriptor.group == FeatureGroup::OneHot && e.descriptor.origin == "Race"));

        for row in 0..df.height() {
            let hot: i32 = encoded
                .iter()
                .map(|e| int_values(&e.column)[row].unwrap())
                .sum();
            assert_eq!(hot, 1, "row {} should have exactly one indicator set", row);
        }
        assert_eq!(
            int_values(&encoded[3].column),
            vec![Some(0), Some(0), Some(1), Some(0), Some(0)]
        );
    }

    #[test]
    fn test_unseen_value_at_transform() {
        let train = df! {
            "GenHealth" => ["Good", "Poor", "Fair"],
            "Smoking" => ["No", "Yes", "No"],
        }
        .unwrap();
        let test = df! {
            "GenHealth" => ["Excellent"],
            "Smoking" => ["Sometimes"],
        }
        .unwrap();

        let encoder = CategoricalEncoder::fit(
            &train,
            &["GenHealth".to_string(), "Smoking".to_string()],
            "__",
        )
        .unwrap();
        let encoded = encoder.transform(&test).unwrap();

        for e in encoded.iter().filter(|e| e.descriptor.origin == "GenHealth") {
            assert_eq!(int_values(&e.column), vec![Some(0)]);
        }
        let smoking = encoded
            .iter()
            .find(|e| e.descriptor.origin == "Smoking")
            .unwrap();
        assert_eq!(int_values(&smoking.column), vec![None]);
    }

    #[test]
    fn test_degenerate_columns_are_elided() {
        let df = df! {
            "Constant" => ["x", "x", "x"],
            "Empty" => [None::<&str>, None, None],
        }
        .unwrap();

        let encoder = CategoricalEncoder::fit(
            &df,
            &["Constant".to_string(), "Empty".to_string()],
            "__",
        )
        .unwrap();

        assert_eq!(encoder.elided_columns(), vec!["Constant", "Empty"]);
        assert!(encoder.transform(&df).unwrap().is_empty());
        assert!(encoder.binary_mappings().is_empty());
    }

    #[test]
    fn test_boolean_column_uses_canonical_strings() {
        let df = df! {
            "Asthma" => [true, false, true],
        }
        .unwrap();

        let encoder = CategoricalEncoder::fit(&df, &["Asthma".to_string()], "__").unwrap();
        let mappings = encoder.binary_mappings();
        assert_eq!(
            mappings[0].as_map(),
            BTreeMap::from([("false".to_string(), 0), ("true".to_string(), 1)])
        );
    }

    #[test]
    fn test_missing_indicator_name_avoids_collision() {
        let values = vec!["a".to_string(), "nan".to_string(), "z".to_string()];
        assert_eq!(missing_indicator_name("c", "__", &values), "c__nan_missing");
        assert_eq!(missing_indicator_name("c", "__", &values[..1]), "c__nan");
    }
}
