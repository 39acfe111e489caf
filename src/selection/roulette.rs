use crate::error::{GeneticError, Result};
use crate::genotype::Genotype;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_schema::{weighted_choose, SelectionSchema};

/// A selection schema that selects individuals through roulette wheel selection.
///
/// Roulette wheel selection (also known as fitness proportionate selection)
/// selects individuals with probability proportional to their fitness.
///
/// All fitness values must be non-negative. If your fitness can be negative,
/// use [`LinearRank`](super::LinearRank) or [`ExponentialRank`](super::ExponentialRank)
/// instead. When every remaining fitness is zero the pick is uniform.
#[derive(Debug, Clone, Default)]
pub struct RouletteWheel {
    replacement: bool,
    rng: RandomNumberGenerator,
}

impl RouletteWheel {
    /// Creates a roulette wheel that selects without replacement.
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

impl<G: Genotype> SelectionSchema<G> for RouletteWheel {
    fn replacement(&self) -> bool {
        self.replacement
    }

    fn set_replacement(&mut self, replacement: bool) {
        self.replacement = replacement;
    }

    fn choose(&mut self, fitness: &[f64], n: usize) -> Result<Vec<usize>> {
        if let Some(negative) = fitness.iter().find(|&&f| f < 0.0) {
            return Err(GeneticError::InvalidNumericValue(format!(
                "Roulette wheel selection needs non-negative fitness, found {}",
                negative
            )));
        }

        Ok(weighted_choose(fitness, n, self.replacement, &mut self.rng))
    }
}
