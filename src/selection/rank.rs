use crate::error::{GeneticError, Result};
use crate::genotype::Genotype;
use crate::population::rank_descending;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_schema::{weighted_choose, SelectionSchema};

/// Computes 1-based ranks: the fittest gets `len`, the least fit gets 1.
/// Equal fitness values get distinct ranks in population order.
fn ranks(fitness: &[f64]) -> Vec<f64> {
    let len = fitness.len();
    let mut ranks = vec![0.0; len];
    for (position, idx) in rank_descending(fitness).into_iter().enumerate() {
        ranks[idx] = (len - position) as f64;
    }
    ranks
}

fn validate_alpha(alpha: f64) -> Result<f64> {
    if !alpha.is_finite() || alpha < 0.0 {
        return Err(GeneticError::Configuration(format!(
            "Rank selection alpha must be finite and non-negative, got {}",
            alpha
        )));
    }
    Ok(alpha)
}

/// Rank selection with weights proportional to `alpha * rank`.
///
/// Unlike [`RouletteWheel`](super::RouletteWheel) only the order of fitness
/// values matters, so negative fitness is fine.
#[derive(Debug, Clone)]
pub struct LinearRank {
    alpha: f64,
    replacement: bool,
    rng: RandomNumberGenerator,
}

impl LinearRank {
    /// Creates a linear rank schema that selects without replacement.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if `alpha` is negative or not finite.
    pub fn new(alpha: f64) -> Result<Self> {
        Ok(Self {
            alpha: validate_alpha(alpha)?,
            replacement: false,
            rng: RandomNumberGenerator::new(),
        })
    }

    pub fn with_replacement(mut self) -> Self {
        self.replacement = true;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    fn weights(&self, fitness: &[f64]) -> Vec<f64> {
        ranks(fitness).into_iter().map(|r| self.alpha * r).collect()
    }
}

impl<G: Genotype> SelectionSchema<G> for LinearRank {
    fn replacement(&self) -> bool {
        self.replacement
    }

    fn set_replacement(&mut self, replacement: bool) {
        self.replacement = replacement;
    }

    fn choose(&mut self, fitness: &[f64], n: usize) -> Result<Vec<usize>> {
        let weights = self.weights(fitness);
        Ok(weighted_choose(&weights, n, self.replacement, &mut self.rng))
    }
}

/// Rank selection with weights `rank ^ alpha`.
///
/// Larger `alpha` sharpens the preference for the top ranks; `alpha = 0` is
/// uniform selection.
#[derive(Debug, Clone)]
pub struct ExponentialRank {
    alpha: f64,
    replacement: bool,
    rng: RandomNumberGenerator,
}

impl ExponentialRank {
    /// Creates an exponential rank schema that selects without replacement.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if `alpha` is negative or not finite.
    pub fn new(alpha: f64) -> Result<Self> {
        Ok(Self {
            alpha: validate_alpha(alpha)?,
            replacement: false,
            rng: RandomNumberGenerator::new(),
        })
    }

    pub fn with_replacement(mut self) -> Self {
        self.replacement = true;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    fn weights(&self, fitness: &[f64]) -> Vec<f64> {
        ranks(fitness)
            .into_iter()
            .map(|r| r.powf(self.alpha))
            .collect()
    }
}

impl<G: Genotype> SelectionSchema<G> for ExponentialRank {
    fn replacement(&self) -> bool {
        self.replacement
    }

    fn set_replacement(&mut self, replacement: bool) {
        self.replacement = replacement;
    }

    fn choose(&mut self, fitness: &[f64], n: usize) -> Result<Vec<usize>> {
        let weights = self.weights(fitness);
        Ok(weighted_choose(&weights, n, self.replacement, &mut self.rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::tests::{population_with_fitness, tags};

    #[test]
    fn test_ranks() {
        assert_eq!(ranks(&[0.5, -3.0, 0.9, 0.5]), vec![3.0, 1.0, 4.0, 2.0]);
    }

    #[test]
    fn test_linear_weights() {
        let selection = LinearRank::new(0.5).unwrap();
        assert_eq!(selection.weights(&[10.0, 30.0, 20.0]), vec![0.5, 1.5, 1.0]);
    }

    #[test]
    fn test_exponential_weights() {
        let selection = ExponentialRank::new(2.0).unwrap();
        assert_eq!(selection.weights(&[10.0, 30.0, 20.0]), vec![1.0, 9.0, 4.0]);

        let uniform = ExponentialRank::new(0.0).unwrap();
        assert_eq!(uniform.weights(&[10.0, 30.0, 20.0]), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_rank_selection_handles_negative_fitness() {
        let population = population_with_fitness(&[-5.0, -1.0, -3.0], 0);
        let mut selection = LinearRank::new(1.0).unwrap().with_seed(6);

        let mut selected = tags(&selection.select(&population, 3).unwrap());
        selected.sort_unstable();
        assert_eq!(selected, vec![0, 1, 2]);
    }

    #[test]
    fn test_exponential_rank_with_replacement() {
        let population = population_with_fitness(&[0.1, 0.2], 0);
        let mut selection = ExponentialRank::new(1.5).unwrap().with_replacement().with_seed(2);

        let selected = selection.select(&population, 9).unwrap();
        assert_eq!(selected.len(), 9);
    }

    #[test]
    fn test_zero_alpha_linear_falls_back_to_uniform() {
        let population = population_with_fitness(&[0.1, 0.2, 0.3], 0);
        let mut selection = LinearRank::new(0.0).unwrap().with_seed(4);
        assert_eq!(selection.select(&population, 2).unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_alpha() {
        assert!(LinearRank::new(-1.0).is_err());
        assert!(ExponentialRank::new(f64::NAN).is_err());
    }
}
