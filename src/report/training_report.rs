//! Plain-text training report

use std::path::Path;

use anyhow::{Context, Result};

use super::metrics::MetricsRecord;

/// Everything the training report prints, in print order
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub data_file: String,
    pub rows: usize,
    /// Column count including the target
    pub columns: usize,
    pub test_ratio: f64,
    pub model: String,
    pub target: String,
    pub train: MetricsRecord,
    pub test: MetricsRecord,
}

impl TrainingReport {
    pub fn render(&self) -> String {
        let train_pct = (1.0 - self.test_ratio) * 100.0;
        let test_pct = self.test_ratio * 100.0;

        let mut lines = vec![
            "=== heartprep training report ===".to_string(),
            format!("Data file: {}", self.data_file),
            format!(
                "Total rows: {}  |  Columns (incl. target): {}",
                self.rows, self.columns
            ),
            format!(
                "Split: {:.0}% train / {:.0}% test (stratified)",
                train_pct, test_pct
            ),
            format!("Model: {}", self.model),
            format!("Target: {}", self.target),
            String::new(),
            "-- Metrics (train) --".to_string(),
        ];
        lines.extend(self.train.render_lines());
        lines.push(String::new());
        lines.push("-- Metrics (test) --".to_string());
        lines.extend(self.test.render_lines());
        lines.push(String::new());

        lines.join("\n")
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render())
            .with_context(|| format!("Failed to write training report to {}", path.display()))
    }
}
