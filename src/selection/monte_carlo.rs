use crate::error::Result;
use crate::genotype::Genotype;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_schema::SelectionSchema;

/// Uniform selection that ignores fitness entirely.
///
/// Useful as a baseline, or when selective pressure should come only from the
/// replacement schema.
#[derive(Debug, Clone, Default)]
pub struct MonteCarlo {
    replacement: bool,
    rng: RandomNumberGenerator,
}

impl MonteCarlo {
    /// Creates a schema that selects without replacement.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replacement(mut self) -> Self {
        self.replacement = true;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }
}

impl<G: Genotype> SelectionSchema<G> for MonteCarlo {
    fn replacement(&self) -> bool {
        self.replacement
    }

    fn set_replacement(&mut self, replacement: bool) {
        self.replacement = replacement;
    }

    fn choose(&mut self, fitness: &[f64], n: usize) -> Result<Vec<usize>> {
        if self.replacement {
            Ok((0..n).map(|_| self.rng.index(fitness.len())).collect())
        } else {
            Ok(self.rng.sample_indices(fitness.len(), n))
        }
    }
}
