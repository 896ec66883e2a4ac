/*!
 * Seeded train/test partitioning.
 *
 * The corpus is shuffled with an explicitly provided generator and cut at
 * nine tenths. Seeding a fresh `StdRng` for every split makes repeated runs
 * over the same input produce identical partitions.
 */

use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Training and testing halves of a partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningSets<T> {
    pub training_set: Vec<T>,
    pub testing_set: Vec<T>,
}

impl<T> LearningSets<T> {
    pub fn len(&self) -> usize {
        self.training_set.len() + self.testing_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.training_set.is_empty() && self.testing_set.is_empty()
    }
}

/// Index where the testing set starts for `len` shuffled elements
pub fn split_point(len: usize) -> usize {
    len * 9 / 10
}

/// Shuffle `all` with `rng` and split it 9/10 into training and testing sets
pub fn split_into_sets<T, R>(mut all: Vec<T>, rng: &mut R) -> LearningSets<T>
where
    R: Rng + ?Sized,
{
    all.shuffle(rng);
    let testing_set = all.split_off(split_point(all.len()));
    LearningSets {
        training_set: all,
        testing_set,
    }
}

/// Splitter seeded from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusSplitter {
    seed: u64,
}

impl CorpusSplitter {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Split with a generator freshly seeded for this call
    pub fn split_into_sets<T>(&self, all: Vec<T>) -> LearningSets<T> {
        info!("Splitting 9/10 with seed {}", self.seed);
        let mut rng = StdRng::seed_from_u64(self.seed);
        split_into_sets(all, &mut rng)
    }
}
