// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Carves a validation set out of the training partition.
// The test partition is kept untouched for the final report.
//
// The shuffle is seeded so a given --seed always produces the
// same split; reruns of `train` are then comparable epoch by
// epoch in metrics.csv.
//
// Reference: rand crate documentation (SliceRandom, StdRng)

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `samples` with `seed` and split into (train, validation).
///
/// `train_fraction` is clamped to [0, 1]; e.g. 0.8 keeps 80% for
/// training.
pub fn split_train_val<T>(
    mut samples:    Vec<T>,
    train_fraction: f64,
    seed:           u64,
) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total    = samples.len();
    let fraction = train_fraction.clamp(0.0, 1.0);
    let split_at = ((total as f64) * fraction).round() as usize;
    let split_at = split_at.min(total);

    // split_off(n) leaves [0..n) in `samples` and returns [n..)
    let val = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation",
        samples.len(),
        val.len(),
    );

    (samples, val)
}
