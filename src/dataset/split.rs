use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Row indices assigned to each side of a train/test split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n` with a seeded RNG and hold out `ceil(test_size * n)` rows.
///
/// No stratification is applied. The first permuted indices form the test set.
#[must_use]
pub fn train_test_split(n: usize, test_size: f64, seed: u64) -> Split {
    let n_test = ((test_size.clamp(0.0, 1.0) * n as f64).ceil() as usize).min(n);

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Split {
        train,
        test: indices,
    }
}
