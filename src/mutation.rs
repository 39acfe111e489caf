//! # Mutation
//!
//! A mutation operator perturbs a genotype. It returns `None` when nothing
//! changed, so the engine can keep the original individual and its cached
//! fitness. A changed genotype becomes a new individual that keeps the
//! original's parents.
//!
//! How the probability is read (per gene or per individual) is up to the
//! operator. Operators must keep the representation valid, e.g. genes stay
//! inside the configured alphabet.

use std::fmt::Debug;

use crate::genotype::Genotype;

/// Trait for mutation operators.
pub trait Mutation<G: Genotype>: Debug + Send {
    /// Returns the mutated genotype, or `None` if no mutation took place.
    fn mutate(&mut self, genotype: &G, probability: f64) -> Option<G>;
}

/// Operator that never changes anything, used when no mutation is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMutation;

impl<G: Genotype> Mutation<G> for NoMutation {
    fn mutate(&mut self, _genotype: &G, _probability: f64) -> Option<G> {
        None
    }
}
