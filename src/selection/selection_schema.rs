use std::fmt::Debug;
use std::sync::Arc;

use crate::error::{GeneticError, OptionExt, Result};
use crate::genotype::{Genotype, Individual};
use crate::population::Population;
use crate::rng::RandomNumberGenerator;

/// Trait for selection schemas in genetic algorithms.
///
/// A selection schema picks the individuals that act as parents. Every schema
/// works either with replacement (the same individual may be picked several
/// times per call) or without (each individual at most once per call). The mode
/// can be switched at runtime and affects the very next call.
///
/// Implementors only provide [`SelectionSchema::choose`], which works on
/// fitness values and returns population indices; [`SelectionSchema::select`]
/// validates the request and maps the indices back to individuals.
///
/// # Examples
///
/// ```
/// use genloop::list::ListGenotype;
/// use genloop::selection::{SelectionSchema, Truncation};
///
/// type Schema = dyn SelectionSchema<ListGenotype<u8>>;
///
/// let mut selection: Box<Schema> = Box::new(Truncation::new());
/// let picked = selection.choose(&[0.5, 0.8, 0.3], 2).unwrap();
/// assert_eq!(picked, vec![1, 0]);
///
/// selection.set_replacement(true);
/// let picked = selection.choose(&[0.5, 0.8, 0.3], 3).unwrap();
/// assert_eq!(picked, vec![1, 1, 1]);
/// ```
pub trait SelectionSchema<G: Genotype>: Debug + Send {
    /// Whether the schema selects with replacement.
    fn replacement(&self) -> bool;

    /// Switches between selection with and without replacement.
    fn set_replacement(&mut self, replacement: bool);

    /// Picks `n` population indices given the fitness of every member.
    ///
    /// Callers guarantee `fitness` is non-empty, `n >= 1`, and, without
    /// replacement, `n <= fitness.len()`.
    fn choose(&mut self, fitness: &[f64], n: usize) -> Result<Vec<usize>>;

    /// Selects `n` individuals from the population, in selection order.
    ///
    /// # Errors
    ///
    /// - [`GeneticError::EmptyPopulation`] if the population is empty.
    /// - [`GeneticError::Configuration`] if `n` is zero.
    /// - [`GeneticError::InsufficientPopulation`] if selecting without
    ///   replacement and `n` exceeds the population size.
    /// - [`GeneticError::NotEvaluated`] if a member has no fitness.
    /// - [`GeneticError::SizeMismatch`] if the schema returned a wrong count.
    /// - [`GeneticError::InvalidNumericValue`] if the schema returned an index
    ///   outside the population.
    fn select(&mut self, population: &Population<G>, n: usize) -> Result<Vec<Arc<Individual<G>>>> {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        if n == 0 {
            return Err(GeneticError::Configuration(
                "Selection size must be at least 1".to_string(),
            ));
        }
        if !self.replacement() && n > population.size() {
            return Err(GeneticError::InsufficientPopulation {
                requested: n,
                available: population.size(),
            });
        }

        let fitness = population.fitness()?;
        let indices = self.choose(&fitness, n)?;
        if indices.len() != n {
            return Err(GeneticError::SizeMismatch {
                stage: "selection",
                expected: n,
                actual: indices.len(),
            });
        }

        indices
            .into_iter()
            .map(|idx| {
                population.get(idx).cloned().ok_or_else_genetic(|| {
                    GeneticError::InvalidNumericValue(format!(
                        "Selected index {} is out of range for a population of {}",
                        idx,
                        population.size()
                    ))
                })
            })
            .collect()
    }
}

/// Roulette draw over arbitrary non-negative weights.
///
/// Without replacement, chosen indices leave the wheel. Whenever the remaining
/// weights sum to zero the draw falls back to a uniform pick.
pub(crate) fn weighted_choose(
    weights: &[f64],
    n: usize,
    replacement: bool,
    rng: &mut RandomNumberGenerator,
) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..weights.len()).collect();
    let mut chosen = Vec::with_capacity(n);

    while chosen.len() < n && !remaining.is_empty() {
        let total: f64 = remaining.iter().map(|&idx| weights[idx]).sum();
        let position = if total > 0.0 {
            spin(weights, &remaining, total, rng)
        } else {
            rng.index(remaining.len())
        };

        chosen.push(remaining[position]);
        if !replacement {
            remaining.remove(position);
        }
    }

    chosen
}

fn spin(weights: &[f64], remaining: &[usize], total: f64, rng: &mut RandomNumberGenerator) -> usize {
    let mut target = rng.uniform() * total;
    let mut last_positive = 0;
    for (position, &idx) in remaining.iter().enumerate() {
        let weight = weights[idx];
        if weight <= 0.0 {
            continue;
        }
        if target < weight {
            return position;
        }
        target -= weight;
        last_positive = position;
    }
    // Only reachable through floating point rounding.
    last_positive
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::tests::{population_with_fitness, Tag};

    /// Always answers with the same indices, whatever it is asked for.
    #[derive(Debug)]
    struct Fixed(Vec<usize>);

    impl SelectionSchema<Tag> for Fixed {
        fn replacement(&self) -> bool {
            true
        }

        fn set_replacement(&mut self, _replacement: bool) {}

        fn choose(&mut self, _fitness: &[f64], _n: usize) -> Result<Vec<usize>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_select_rejects_out_of_range_index() {
        let population = population_with_fitness(&[0.1, 0.2, 0.3], 0);
        let mut selection = Fixed(vec![0, 3]);

        match selection.select(&population, 2) {
            Err(GeneticError::InvalidNumericValue(_)) => (),
            _ => panic!("Expected InvalidNumericValue error"),
        }
    }

    #[test]
    fn test_select_rejects_wrong_count() {
        let population = population_with_fitness(&[0.1, 0.2, 0.3], 0);
        let mut selection = Fixed(vec![2]);

        match selection.select(&population, 2) {
            Err(GeneticError::SizeMismatch { expected: 2, actual: 1, .. }) => (),
            _ => panic!("Expected SizeMismatch error"),
        }
    }

    #[test]
    fn test_weighted_choose_skips_zero_weights() {
        let mut rng = RandomNumberGenerator::from_seed(11);
        let picks = weighted_choose(&[0.0, 1.0, 0.0, 3.0], 200, true, &mut rng);
        assert_eq!(picks.len(), 200);
        assert!(picks.iter().all(|&idx| idx == 1 || idx == 3));
        // The heavier index dominates.
        let heavy = picks.iter().filter(|&&idx| idx == 3).count();
        assert!(heavy > 100);
    }

    #[test]
    fn test_weighted_choose_without_replacement_exhausts_wheel() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        let mut picks = weighted_choose(&[0.0, 2.0, 0.0, 1.0], 4, false, &mut rng);
        // Positive weights first, zero weights last through the uniform fallback.
        assert!(picks[..2].contains(&1));
        assert!(picks[..2].contains(&3));
        picks.sort_unstable();
        assert_eq!(picks, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_weighted_choose_all_zero_is_uniform() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        let picks = weighted_choose(&[0.0, 0.0, 0.0], 30, true, &mut rng);
        assert_eq!(picks.len(), 30);
        assert!(picks.iter().all(|&idx| idx < 3));
    }
}
