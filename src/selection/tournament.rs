use crate::error::{GeneticError, Result};
use crate::genotype::Genotype;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_schema::SelectionSchema;

/// A selection schema that picks the best of `m` random candidates, `n` times.
///
/// Candidates are drawn uniformly (possibly the same one twice) from the
/// individuals still eligible. Without replacement each winner leaves the pool
/// for the rest of the call.
///
/// The tournament size tunes selective pressure:
/// - `m = 1` is uniform selection
/// - larger `m` focuses on the best individuals
///
/// # Examples
///
/// ```
/// use genloop::selection::Tournament;
///
/// let selection = Tournament::new(3).unwrap().with_seed(42);
/// assert_eq!(selection.tournament_size(), 3);
/// assert!(Tournament::new(0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Tournament {
    tournament_size: usize,
    replacement: bool,
    rng: RandomNumberGenerator,
}

impl Tournament {
    /// Creates a tournament schema that selects without replacement.
    ///
    /// # Errors
    ///
    /// Returns an error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            tournament_size,
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

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Runs one tournament over `eligible` and returns the winner's position in it.
    ///
    /// Ties go to the candidate that comes first in the population.
    fn run_tournament(&mut self, fitness: &[f64], eligible: &[usize]) -> usize {
        let mut winner = self.rng.index(eligible.len());
        for _ in 1..self.tournament_size {
            let challenger = self.rng.index(eligible.len());
            let (w, c) = (eligible[winner], eligible[challenger]);
            if fitness[c] > fitness[w] || (fitness[c] == fitness[w] && c < w) {
                winner = challenger;
            }
        }
        winner
    }
}

impl Default for Tournament {
    fn default() -> Self {
        Self {
            tournament_size: 2,
            replacement: false,
            rng: RandomNumberGenerator::new(),
        }
    }
}

impl<G: Genotype> SelectionSchema<G> for Tournament {
    fn replacement(&self) -> bool {
        self.replacement
    }

    fn set_replacement(&mut self, replacement: bool) {
        self.replacement = replacement;
    }

    fn choose(&mut self, fitness: &[f64], n: usize) -> Result<Vec<usize>> {
        let mut eligible: Vec<usize> = (0..fitness.len()).collect();
        let mut selected = Vec::with_capacity(n);

        while selected.len() < n && !eligible.is_empty() {
            let position = self.run_tournament(fitness, &eligible);
            selected.push(eligible[position]);
            if !self.replacement {
                eligible.remove(position);
            }
        }

        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::population::tests::{population_with_fitness, tags};

    #[test]
    fn test_tournament_selection() {
        let population = population_with_fitness(&[0.5, 0.8, 0.3, 0.9, 0.1], 0);
        let mut selection = Tournament::default().with_seed(1);

        let selected = selection.select(&population, 3).unwrap();
        assert_eq!(selected.len(), 3);
        let unique: HashSet<usize> = tags(&selected).into_iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_without_replacement_takes_whole_population() {
        let population = population_with_fitness(&[0.5, 0.8, 0.3, 0.9], 0);
        let mut selection = Tournament::new(2).unwrap().with_seed(7);

        let mut selected = tags(&selection.select(&population, 4).unwrap());
        selected.sort_unstable();
        assert_eq!(selected, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_tournament_selection_with_replacement() {
        let population = population_with_fitness(&[0.5, 0.8, 0.3], 0);
        let mut selection = Tournament::default().with_replacement().with_seed(4);

        let selected = selection.select(&population, 10).unwrap();
        assert_eq!(selected.len(), 10);
    }

    #[test]
    fn test_size_one_tournament_can_pick_the_worst() {
        let population = population_with_fitness(&[0.9, 0.1], 0);
        let mut selection = Tournament::new(1).unwrap().with_replacement().with_seed(9);

        let selected = tags(&selection.select(&population, 200).unwrap());
        assert!(selected.contains(&1));
    }

    #[test]
    fn test_large_tournament_favours_the_best() {
        let population = population_with_fitness(&[0.1, 0.2, 0.9, 0.3], 0);
        let mut selection = Tournament::new(64).unwrap().with_replacement().with_seed(5);

        let selected = tags(&selection.select(&population, 20).unwrap());
        assert!(selected.iter().all(|&t| t == 2));
    }

    #[test]
    fn test_run_tournament_breaks_ties_by_position() {
        let mut selection = Tournament::new(50).unwrap().with_seed(42);
        let winner = selection.run_tournament(&[1.0, 1.0, 1.0], &[0, 1, 2]);
        assert_eq!(winner, 0);
    }

    #[test]
    fn test_tournament_selection_invalid_size() {
        assert!(Tournament::new(0).is_err());
    }
}
