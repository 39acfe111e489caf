//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds the numeric configuration of a genetic
//! algorithm together with the values derived from it.
//!
//! Two quantities are derived and never set directly:
//!
//! - `selection_size`: the number of parents selected per group, equal to the
//!   arity of the configured recombination operator.
//! - `offspring_size`: the number of offspring bred per generation,
//!   `clamp(round(population_size * replacement_ratio), 1, population_size)`.
//!
//! Every setter that touches one of their sources recomputes them before it
//! returns, so the derived values can never go stale. The setters are crate
//! private; the public entry points live on
//! [`GeneticAlgorithm`](crate::evolution::GeneticAlgorithm), which keeps the
//! options consistent with the operators it owns.
//!
//! ## Example
//!
//! ```rust
//! use genloop::evolution::EvolutionOptions;
//!
//! let options = EvolutionOptions::default();
//! assert_eq!(options.population_size(), 100);
//! assert_eq!(options.offspring_size(), 100);
//! assert_eq!(options.selection_size(), 1);
//! ```

use tracing::warn;

use crate::error::{GeneticError, Result};

/// Fitness batches at least this large are evaluated in parallel by default.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    population_size: usize,
    recombination_probability: f64,
    mutation_probability: f64,
    replacement_ratio: f64,
    /// Minimum number of pending evaluations processed in parallel
    parallel_threshold: usize,
    arity: usize,
    selection_size: usize,
    offspring_size: usize,
}

impl EvolutionOptions {
    /// Creates validated options with arity 1.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if `population_size` is zero,
    /// a probability is NaN, or `replacement_ratio` is not finite.
    pub fn new(
        population_size: usize,
        recombination_probability: f64,
        mutation_probability: f64,
        replacement_ratio: f64,
    ) -> Result<Self> {
        let mut options = Self::default();
        options.set_population_size(population_size)?;
        options.set_recombination_probability(recombination_probability)?;
        options.set_mutation_probability(mutation_probability)?;
        options.set_replacement_ratio(replacement_ratio)?;
        Ok(options)
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn recombination_probability(&self) -> f64 {
        self.recombination_probability
    }

    pub fn mutation_probability(&self) -> f64 {
        self.mutation_probability
    }

    pub fn replacement_ratio(&self) -> f64 {
        self.replacement_ratio
    }

    /// Returns the minimum number of pending evaluations processed in parallel.
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Number of parents consumed per recombination call.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Number of parents selected per group. Derived from the arity.
    pub fn selection_size(&self) -> usize {
        self.selection_size
    }

    /// Number of offspring bred per generation. Derived from the population
    /// size and the replacement ratio.
    pub fn offspring_size(&self) -> usize {
        self.offspring_size
    }

    pub(crate) fn set_population_size(&mut self, population_size: usize) -> Result<()> {
        if population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }
        self.population_size = population_size;
        self.recompute();
        Ok(())
    }

    pub(crate) fn set_recombination_probability(&mut self, probability: f64) -> Result<()> {
        self.recombination_probability = clamp_probability("recombination", probability)?;
        Ok(())
    }

    pub(crate) fn set_mutation_probability(&mut self, probability: f64) -> Result<()> {
        self.mutation_probability = clamp_probability("mutation", probability)?;
        Ok(())
    }

    pub(crate) fn set_replacement_ratio(&mut self, ratio: f64) -> Result<()> {
        if !ratio.is_finite() {
            return Err(GeneticError::Configuration(format!(
                "Replacement ratio must be finite, got {}",
                ratio
            )));
        }
        self.replacement_ratio = ratio;
        self.recompute();
        Ok(())
    }

    pub(crate) fn set_arity(&mut self, arity: usize) -> Result<()> {
        if arity == 0 {
            return Err(GeneticError::Configuration(
                "Recombination arity must be at least 1".to_string(),
            ));
        }
        self.arity = arity;
        self.recompute();
        Ok(())
    }

    /// Sets the parallel threshold.
    pub(crate) fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    fn recompute(&mut self) {
        self.selection_size = self.arity;
        self.offspring_size = offspring_size(self.population_size, self.replacement_ratio);
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        let mut options = Self {
            population_size: 100,
            recombination_probability: 0.0,
            mutation_probability: 0.0,
            replacement_ratio: 1.0,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            arity: 1,
            selection_size: 0,
            offspring_size: 0,
        };
        options.recompute();
        options
    }
}

fn offspring_size(population_size: usize, ratio: f64) -> usize {
    let wanted = (population_size as f64 * ratio).round();
    if wanted < 1.0 {
        1
    } else if wanted >= population_size as f64 {
        population_size
    } else {
        wanted as usize
    }
}

fn clamp_probability(name: &str, probability: f64) -> Result<f64> {
    if probability.is_nan() {
        return Err(GeneticError::Configuration(format!(
            "The {} probability cannot be NaN",
            name
        )));
    }
    let clamped = probability.clamp(0.0, 1.0);
    if clamped != probability {
        warn!(
            requested = probability,
            applied = clamped,
            "{} probability clamped into [0, 1]",
            name
        );
    }
    Ok(clamped)
}
