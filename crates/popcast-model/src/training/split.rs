use popcast_core::models::TrainingRow;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Shuffle and hold out `fraction` of the rows for validation.
///
/// At least one row lands on each side when there are two or more rows.
pub fn train_validation_split(
    rows: &[TrainingRow],
    fraction: f64,
    rng: &mut StdRng,
) -> (Vec<TrainingRow>, Vec<TrainingRow>) {
    let n = rows.len();
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);

    let n_val = if n < 2 {
        0
    } else {
        ((n as f64 * fraction).round() as usize).clamp(1, n - 1)
    };

    let validation = indices[..n_val].iter().map(|&i| rows[i]).collect();
    let train = indices[n_val..].iter().map(|&i| rows[i]).collect();
    (train, validation)
}
