//! Stratified train/test split

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::error::{PipelineError, PipelineResult};
use super::target::count_classes;

/// Minimum rows per class for a split to leave both partitions usable
const MIN_CLASS_ROWS: usize = 2;

/// Row positions of each partition, ascending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Split row positions so both partitions keep the label's class proportions.
///
/// The test partition holds `ceil(n * test_ratio)` rows. Each class
/// contributes its proportional share, with leftover rows handed out by
/// largest remainder. Rows are drawn after a per-class shuffle seeded by
/// `seed`, so the split is reproducible.
pub fn stratified_split(
    labels: &[i32],
    test_ratio: f64,
    seed: u64,
) -> PipelineResult<SplitIndices> {
    let (zeros, ones) = count_classes(labels);
    if zeros < MIN_CLASS_ROWS || ones < MIN_CLASS_ROWS {
        return Err(PipelineError::InsufficientClasses {
            zeros,
            ones,
            required: MIN_CLASS_ROWS,
        });
    }

    let mut by_class: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (idx, &label) in labels.iter().enumerate() {
        by_class.entry(label).or_default().push(idx);
    }

    let n = labels.len();
    let n_test = ((n as f64 * test_ratio) - 1e-9).ceil().max(0.0) as usize;

    // Floor of each class's ideal share, then distribute the remainder
    let ideal: Vec<(i32, f64)> = by_class
        .iter()
        .map(|(&class, rows)| (class, rows.len() as f64 * n_test as f64 / n as f64))
        .collect();
    let mut test_counts: BTreeMap<i32, usize> = ideal
        .iter()
        .map(|&(class, share)| (class, share.floor() as usize))
        .collect();

    let assigned: usize = test_counts.values().sum();
    let mut by_remainder = ideal.clone();
    by_remainder.sort_by(|a, b| {
        let ra = a.1 - a.1.floor();
        let rb = b.1 - b.1.floor();
        rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
    });
    for (class, _) in by_remainder.iter().take(n_test.saturating_sub(assigned)) {
        if let Some(count) = test_counts.get_mut(class) {
            *count += 1;
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(n.saturating_sub(n_test));
    let mut test = Vec::with_capacity(n_test);

    for (class, mut rows) in by_class {
        rows.shuffle(&mut rng);
        let take = test_counts.get(&class).copied().unwrap_or(0).min(rows.len());
        test.extend_from_slice(&rows[..take]);
        train.extend_from_slice(&rows[take..]);
    }

    train.sort_unstable();
    test.sort_unstable();

    log::debug!(
        "Stratified split: {} train / {} test rows (seed {})",
        train.len(),
        test.len(),
        seed
    );

    Ok(SplitIndices { train, test })
}
