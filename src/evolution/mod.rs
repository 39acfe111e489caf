pub mod algorithm;
pub mod builder;
pub mod options;

pub use algorithm::{GeneticAlgorithm, RunState, MAX_BARREN_ROUNDS};
pub use builder::GeneticAlgorithmBuilder;
pub use options::EvolutionOptions;
