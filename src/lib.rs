//! # genloop
//!
//! A generational genetic algorithm engine. A [`GeneticAlgorithm`] owns a
//! population of [`Individual`]s and a set of swappable operators: an
//! initializer, a fitness function, a selection schema, a recombination, a
//! mutation, a replacement schema and a stop condition. Every operator can be
//! replaced between runs or from a [`Callback`](callback::Callback) while the
//! algorithm runs.
//!
//! Ready-made operators for sequence genotypes live in [`list`].

pub mod callback;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod genotype;
pub mod history;
pub mod initializer;
pub mod list;
pub mod mutation;
pub mod population;
pub mod recombination;
pub mod replacement;
pub mod rng;
pub mod selection;
pub mod stop;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{EvolutionOptions, GeneticAlgorithm, GeneticAlgorithmBuilder, RunState};
pub use genotype::{Genotype, Individual, IndividualId};
pub use population::Population;
