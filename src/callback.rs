//! # Callbacks
//!
//! Callbacks observe and steer a run from between the generation phases. Each
//! hook receives the algorithm mutably, so it can read the population and the
//! history, change operators or probabilities through the regular setters, or
//! request a stop. Hooks run synchronously, in registration order, and never
//! while a generation is half done.
//!
//! ## Example
//!
//! ```rust
//! use genloop::callback::Callback;
//! use genloop::evolution::GeneticAlgorithm;
//! use genloop::list::ListGenotype;
//!
//! /// Raises the mutation probability whenever the best fitness stalls.
//! struct Anneal {
//!     last_best: f64,
//! }
//!
//! impl Callback<ListGenotype<u8>> for Anneal {
//!     fn on_step_ends(&mut self, ga: &mut GeneticAlgorithm<ListGenotype<u8>>) {
//!         let best = ga.best_fitness().unwrap_or(f64::MIN);
//!         if best <= self.last_best {
//!             let p = ga.options().mutation_probability();
//!             let _ = ga.set_mutation_probability(p * 1.5);
//!         }
//!         self.last_best = best;
//!     }
//! }
//! ```

use crate::evolution::GeneticAlgorithm;
use crate::genotype::Genotype;

/// The four points of a run at which callbacks are notified.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    AlgorithmBegins,
    StepBegins,
    StepEnds,
    AlgorithmEnds,
}

/// Hooks into a run. Every hook defaults to doing nothing.
pub trait Callback<G: Genotype>: Send {
    /// Called once, after the initial population was evaluated.
    fn on_algorithm_begins(&mut self, _algorithm: &mut GeneticAlgorithm<G>) {}

    /// Called before each generation's selection.
    fn on_step_begins(&mut self, _algorithm: &mut GeneticAlgorithm<G>) {}

    /// Called after each generation was recorded in the history.
    fn on_step_ends(&mut self, _algorithm: &mut GeneticAlgorithm<G>) {}

    /// Called once, after the stop condition held.
    fn on_algorithm_ends(&mut self, _algorithm: &mut GeneticAlgorithm<G>) {}
}

/// Ordered list of callbacks, notified in registration order.
pub struct CallbackDispatcher<G: Genotype> {
    callbacks: Vec<Box<dyn Callback<G>>>,
}

impl<G: Genotype> CallbackDispatcher<G> {
    pub fn new(callbacks: Vec<Box<dyn Callback<G>>>) -> Self {
        Self { callbacks }
    }

    pub fn push(&mut self, callback: Box<dyn Callback<G>>) {
        self.callbacks.push(callback);
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Invokes `hook` on every callback in order.
    pub fn notify(&mut self, hook: Hook, algorithm: &mut GeneticAlgorithm<G>) {
        for callback in self.callbacks.iter_mut() {
            match hook {
                Hook::AlgorithmBegins => callback.on_algorithm_begins(algorithm),
                Hook::StepBegins => callback.on_step_begins(algorithm),
                Hook::StepEnds => callback.on_step_ends(algorithm),
                Hook::AlgorithmEnds => callback.on_algorithm_ends(algorithm),
            }
        }
    }
}

impl<G: Genotype> Default for CallbackDispatcher<G> {
    fn default() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }
}

impl<G: Genotype> std::fmt::Debug for CallbackDispatcher<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackDispatcher")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl<G: Genotype> From<Vec<Box<dyn Callback<G>>>> for CallbackDispatcher<G> {
    fn from(callbacks: Vec<Box<dyn Callback<G>>>) -> Self {
        Self::new(callbacks)
    }
}
