//! # Genotype and Individual
//!
//! A [`Genotype`] is the encoded representation of one candidate solution. The
//! engine never looks inside it; it only asks for the decoded phenotype when the
//! fitness function needs one.
//!
//! An [`Individual`] is what the population actually holds: the genotype plus a
//! unique id, its cached fitness, its birth generation and the ordered list of
//! parents that produced it. Parents are shared, read-only back-references
//! (`Arc<Individual<G>>`). A parent evicted from the population stays reachable
//! for as long as one of its descendants references it, and because a child can
//! only be built from parents that already exist, lineage can never form a cycle.
//!
//! ## Example
//!
//! ```rust
//! use genloop::genotype::{Genotype, Individual};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Bits(Vec<bool>);
//!
//! impl Genotype for Bits {
//!     type Phenotype = usize;
//!
//!     fn phenotype(&self) -> usize {
//!         self.0.iter().filter(|b| **b).count()
//!     }
//! }
//!
//! let root = Individual::new(Bits(vec![true, false, true]));
//! assert!(root.parents().is_empty());
//! assert!(root.fitness().is_err());
//! assert_eq!(root.phenotype(), 2);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{GeneticError, Result};

/// Trait for the encoded representation of a candidate solution.
///
/// `phenotype` must be a deterministic, pure mapping: the same genotype always
/// decodes to the same phenotype.
pub trait Genotype: Clone + fmt::Debug + Send + Sync + 'static {
    /// The decoded, problem-domain object consumed by the fitness function.
    type Phenotype;

    /// Decodes this genotype.
    fn phenotype(&self) -> Self::Phenotype;
}

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Process-wide unique identifier of an individual.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndividualId(u64);

impl IndividualId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Wraps a raw id. Only useful when rebuilding ids from serialized data.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for IndividualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A genotype living in a population, with its cached fitness and lineage.
#[derive(Clone)]
pub struct Individual<G: Genotype> {
    id: IndividualId,
    genotype: G,
    fitness: Option<f64>,
    generation: usize,
    parents: Vec<Arc<Individual<G>>>,
}

impl<G: Genotype> Individual<G> {
    /// Creates a root individual (generation 0, no parents).
    pub fn new(genotype: G) -> Self {
        Self {
            id: IndividualId::next(),
            genotype,
            fitness: None,
            generation: 0,
            parents: Vec::new(),
        }
    }

    /// Creates an offspring born in `generation` from the given parents.
    ///
    /// The parents are recorded in the order supplied.
    pub fn offspring(genotype: G, parents: Vec<Arc<Individual<G>>>, generation: usize) -> Self {
        Self {
            id: IndividualId::next(),
            genotype,
            fitness: None,
            generation,
            parents,
        }
    }

    /// Creates the mutated version of this individual.
    ///
    /// The mutant is a new individual (new id, no fitness) born in `generation`,
    /// but it keeps this individual's parents: mutation never alters lineage.
    pub fn mutant(&self, genotype: G, generation: usize) -> Self {
        Self {
            id: IndividualId::next(),
            genotype,
            fitness: None,
            generation,
            parents: self.parents.clone(),
        }
    }

    pub fn id(&self) -> IndividualId {
        self.id
    }

    pub fn genotype(&self) -> &G {
        &self.genotype
    }

    /// Decodes the genotype.
    pub fn phenotype(&self) -> G::Phenotype {
        self.genotype.phenotype()
    }

    /// Returns the cached fitness.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::NotEvaluated`] if the fitness has never been
    /// computed, or was invalidated because the fitness function changed.
    pub fn fitness(&self) -> Result<f64> {
        self.fitness
            .ok_or(GeneticError::NotEvaluated { id: self.id })
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// The generation this individual was born in.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The individuals that produced this one, in the order they were supplied.
    pub fn parents(&self) -> &[Arc<Individual<G>>] {
        &self.parents
    }

    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    pub(crate) fn invalidate_fitness(&mut self) {
        self.fitness = None;
    }
}

impl<G: Genotype> fmt::Debug for Individual<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Parents are listed by id only, the full ancestry can be huge.
        let parents: Vec<IndividualId> = self.parents.iter().map(|p| p.id).collect();
        f.debug_struct("Individual")
            .field("id", &self.id)
            .field("genotype", &self.genotype)
            .field("fitness", &self.fitness)
            .field("generation", &self.generation)
            .field("parents", &parents)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Value(i32);

    impl Genotype for Value {
        type Phenotype = i32;

        fn phenotype(&self) -> i32 {
            self.0 * 2
        }
    }

    #[test]
    fn test_root_individual() {
        let individual = Individual::new(Value(3));
        assert_eq!(individual.phenotype(), 6);
        assert_eq!(individual.generation(), 0);
        assert!(individual.parents().is_empty());
        assert!(!individual.is_evaluated());
    }

    #[test]
    fn test_fitness_not_evaluated() {
        let individual = Individual::new(Value(1));
        match individual.fitness() {
            Err(GeneticError::NotEvaluated { id }) => assert_eq!(id, individual.id()),
            _ => panic!("Expected NotEvaluated error"),
        }
    }

    #[test]
    fn test_fitness_cache_and_invalidation() {
        let mut individual = Individual::new(Value(1));
        individual.set_fitness(0.5);
        assert_eq!(individual.fitness().unwrap(), 0.5);
        individual.invalidate_fitness();
        assert!(individual.fitness().is_err());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Individual::new(Value(1));
        let b = Individual::new(Value(1));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_offspring_records_parents_in_order() {
        let first = Arc::new(Individual::new(Value(1)));
        let second = Arc::new(Individual::new(Value(2)));
        let child = Individual::offspring(Value(3), vec![second.clone(), first.clone()], 1);

        assert_eq!(child.generation(), 1);
        assert_eq!(child.parents().len(), 2);
        assert!(Arc::ptr_eq(&child.parents()[0], &second));
        assert!(Arc::ptr_eq(&child.parents()[1], &first));
    }

    #[test]
    fn test_mutant_keeps_lineage() {
        let parent = Arc::new(Individual::new(Value(1)));
        let mut child = Individual::offspring(Value(2), vec![parent.clone()], 1);
        child.set_fitness(1.0);

        let mutant = child.mutant(Value(5), 1);
        assert_ne!(mutant.id(), child.id());
        assert!(mutant.fitness().is_err());
        assert_eq!(mutant.parents().len(), 1);
        assert!(Arc::ptr_eq(&mutant.parents()[0], &parent));
    }

    #[test]
    fn test_evicted_parent_stays_reachable() {
        let child = {
            let parent = Arc::new(Individual::new(Value(10)));
            Individual::offspring(Value(11), vec![parent], 1)
        };
        assert_eq!(child.parents()[0].genotype(), &Value(10));
    }

    #[test]
    fn test_debug_lists_parent_ids() {
        let parent = Arc::new(Individual::new(Value(1)));
        let child = Individual::offspring(Value(2), vec![parent.clone()], 1);
        let rendered = format!("{:?}", child);
        assert!(rendered.contains(&format!("{:?}", parent.id())));
    }
}
