//! Binary classification metrics

use serde::Serialize;

/// Confusion counts with class 1 as the positive class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionCounts {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl ConfusionCounts {
    pub fn from_labels(y_true: &[i32], y_pred: &[i32]) -> Self {
        let mut counts = Self::default();
        for (&actual, &predicted) in y_true.iter().zip(y_pred.iter()) {
            match (actual == 1, predicted == 1) {
                (true, true) => counts.true_positives += 1,
                (false, true) => counts.false_positives += 1,
                (false, false) => counts.true_negatives += 1,
                (true, false) => counts.false_negatives += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }
}

/// Metrics for one partition. Zero denominators resolve to 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsRecord {
    pub precision: f64,
    pub recall: f64,
    pub accuracy: f64,
    pub f1_score: f64,
}

impl MetricsRecord {
    pub fn compute(y_true: &[i32], y_pred: &[i32]) -> Self {
        Self::from_counts(&ConfusionCounts::from_labels(y_true, y_pred))
    }

    pub fn from_counts(counts: &ConfusionCounts) -> Self {
        let tp = counts.true_positives as f64;
        let precision = safe_ratio(tp, tp + counts.false_positives as f64);
        let recall = safe_ratio(tp, tp + counts.false_negatives as f64);
        let accuracy = safe_ratio(
            (counts.true_positives + counts.true_negatives) as f64,
            counts.total() as f64,
        );
        let f1_score = safe_ratio(2.0 * precision * recall, precision + recall);

        Self {
            precision,
            recall,
            accuracy,
            f1_score,
        }
    }

    /// Fields in report order
    pub fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("precision", self.precision),
            ("recall", self.recall),
            ("accuracy", self.accuracy),
            ("f1_score", self.f1_score),
        ]
    }

    /// `name: value` lines with 4 decimal places
    pub fn render_lines(&self) -> Vec<String> {
        self.fields()
            .iter()
            .map(|(name, value)| format!("{}: {:.4}", name, value))
            .collect()
    }
}

fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
