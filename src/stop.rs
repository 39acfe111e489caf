//! # Stop conditions
//!
//! A stop condition is a side-effect free predicate over the algorithm's
//! observable state. The engine evaluates it once per generation, after the
//! replacement step and the `on_step_ends` callbacks, and OR-s it with the
//! explicit stop signal set through
//! [`GeneticAlgorithm::stop`](crate::evolution::GeneticAlgorithm::stop).
//!
//! Any `Fn(&GeneticAlgorithm<G>) -> bool` closure is a stop condition.
//!
//! ## Example
//!
//! ```rust
//! use genloop::evolution::GeneticAlgorithm;
//! use genloop::list::ListGenotype;
//! use genloop::stop::{NumSteps, StopCondition};
//!
//! let steps = NumSteps(50);
//! let plateau = |ga: &GeneticAlgorithm<ListGenotype<u8>>| {
//!     ga.history().len() > 10 && ga.best_fitness().map(|f| f > 0.99).unwrap_or(false)
//! };
//! # let _ = (steps, plateau);
//! ```

use crate::evolution::GeneticAlgorithm;
use crate::genotype::Genotype;

/// Predicate deciding whether the run is over.
pub trait StopCondition<G: Genotype>: Send + Sync {
    fn should_stop(&self, algorithm: &GeneticAlgorithm<G>) -> bool;
}

impl<G, F> StopCondition<G> for F
where
    G: Genotype,
    F: Fn(&GeneticAlgorithm<G>) -> bool + Send + Sync,
{
    fn should_stop(&self, algorithm: &GeneticAlgorithm<G>) -> bool {
        self(algorithm)
    }
}

/// Stops once the population reached the given generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumSteps(pub usize);

impl<G: Genotype> StopCondition<G> for NumSteps {
    fn should_stop(&self, algorithm: &GeneticAlgorithm<G>) -> bool {
        algorithm.generation() >= self.0
    }
}

/// Stops once the best fitness reaches the bound.
///
/// A population whose fitness is not available never satisfies the bound.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessBound(pub f64);

impl<G: Genotype> StopCondition<G> for FitnessBound {
    fn should_stop(&self, algorithm: &GeneticAlgorithm<G>) -> bool {
        algorithm
            .best_fitness()
            .map(|best| best >= self.0)
            .unwrap_or(false)
    }
}

/// Never stops on its own; the run ends only through an explicit stop signal.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Never;

impl<G: Genotype> StopCondition<G> for Never {
    fn should_stop(&self, _algorithm: &GeneticAlgorithm<G>) -> bool {
        false
    }
}
