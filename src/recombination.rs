//! # Recombination
//!
//! A recombination operator turns a fixed number of parents (its arity) into
//! zero or more offspring. The engine selects exactly `arity` parents per group,
//! so changing the operator changes the selection size.
//!
//! Each group gets an independent Bernoulli trial at the configured probability.
//! When the trial fails, the operator's [`PassThrough`] policy decides whether
//! the parents themselves move on to the offspring pool or nothing does.
//!
//! Operators only produce genotypes. [`Recombination::apply`] wraps them into
//! individuals that record the supplied parents, in order, as their lineage.

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::{GeneticError, Result};
use crate::genotype::{Genotype, Individual};
use crate::rng::RandomNumberGenerator;

/// What happens to a parent group when the recombination trial fails.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassThrough {
    /// The parents themselves (same individuals, same fitness) become offspring.
    Parents,
    /// The group produces no offspring.
    Nothing,
}

/// Trait for recombination (crossover) operators.
pub trait Recombination<G: Genotype>: Debug + Send {
    /// Number of parents consumed per call.
    fn arity(&self) -> usize;

    /// Policy applied when the recombination trial fails.
    fn pass_through(&self) -> PassThrough {
        PassThrough::Parents
    }

    /// The operator's own random source. Also drives the recombination trial.
    fn rng(&mut self) -> &mut RandomNumberGenerator;

    /// Produces offspring genotypes from exactly `arity` parents.
    fn recombine(&mut self, parents: &[&G]) -> Result<Vec<G>>;

    /// Runs the trial and, on success, recombines and records lineage.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::SizeMismatch`] if `parents` does not hold exactly
    /// `arity` individuals, or whatever [`Recombination::recombine`] fails with.
    fn apply(
        &mut self,
        parents: &[Arc<Individual<G>>],
        probability: f64,
        generation: usize,
    ) -> Result<Vec<Arc<Individual<G>>>> {
        if parents.len() != self.arity() {
            return Err(GeneticError::SizeMismatch {
                stage: "recombination",
                expected: self.arity(),
                actual: parents.len(),
            });
        }

        if !self.rng().chance(probability) {
            return Ok(match self.pass_through() {
                PassThrough::Parents => parents.to_vec(),
                PassThrough::Nothing => Vec::new(),
            });
        }

        let genotypes: Vec<&G> = parents.iter().map(|p| p.genotype()).collect();
        let progeny = self.recombine(&genotypes)?;

        Ok(progeny
            .into_iter()
            .map(|genotype| Arc::new(Individual::offspring(genotype, parents.to_vec(), generation)))
            .collect())
    }
}

/// Identity operator with arity 1, used when no recombination is configured.
///
/// Recombining returns a copy of the parent, so with a non-zero probability the
/// copy is a new individual whose lineage points at the parent.
#[derive(Debug, Clone, Default)]
pub struct NoRecombination {
    rng: RandomNumberGenerator,
}

impl NoRecombination {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G: Genotype> Recombination<G> for NoRecombination {
    fn arity(&self) -> usize {
        1
    }

    fn rng(&mut self) -> &mut RandomNumberGenerator {
        &mut self.rng
    }

    fn recombine(&mut self, parents: &[&G]) -> Result<Vec<G>> {
        Ok(parents.iter().map(|&g| g.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::tests::Tag;

    /// Sums the parents' tags into a single child.
    #[derive(Debug)]
    struct Sum {
        arity: usize,
        pass_through: PassThrough,
        rng: RandomNumberGenerator,
    }

    impl Sum {
        fn new(arity: usize, pass_through: PassThrough) -> Self {
            Self {
                arity,
                pass_through,
                rng: RandomNumberGenerator::from_seed(1),
            }
        }
    }

    impl Recombination<Tag> for Sum {
        fn arity(&self) -> usize {
            self.arity
        }

        fn pass_through(&self) -> PassThrough {
            self.pass_through
        }

        fn rng(&mut self) -> &mut RandomNumberGenerator {
            &mut self.rng
        }

        fn recombine(&mut self, parents: &[&Tag]) -> Result<Vec<Tag>> {
            Ok(vec![Tag(parents.iter().map(|t| t.0).sum())])
        }
    }

    fn parents(tags: &[usize]) -> Vec<Arc<Individual<Tag>>> {
        tags.iter().map(|&t| Arc::new(Individual::new(Tag(t)))).collect()
    }

    #[test]
    fn test_offspring_record_parents_in_order() {
        let mut operator = Sum::new(3, PassThrough::Parents);
        let group = parents(&[1, 2, 3]);

        let offspring = operator.apply(&group, 1.0, 4).unwrap();

        assert_eq!(offspring.len(), 1);
        assert_eq!(offspring[0].genotype(), &Tag(6));
        assert_eq!(offspring[0].generation(), 4);
        let recorded = offspring[0].parents();
        assert_eq!(recorded.len(), 3);
        for (recorded, supplied) in recorded.iter().zip(group.iter()) {
            assert!(Arc::ptr_eq(recorded, supplied));
        }
    }

    #[test]
    fn test_failed_trial_passes_parents_through() {
        let mut operator = Sum::new(2, PassThrough::Parents);
        let group = parents(&[1, 2]);

        let offspring = operator.apply(&group, 0.0, 1).unwrap();

        assert_eq!(offspring.len(), 2);
        assert!(Arc::ptr_eq(&offspring[0], &group[0]));
        assert!(Arc::ptr_eq(&offspring[1], &group[1]));
    }

    #[test]
    fn test_failed_trial_can_omit_parents() {
        let mut operator = Sum::new(2, PassThrough::Nothing);
        let offspring = operator.apply(&parents(&[1, 2]), 0.0, 1).unwrap();
        assert!(offspring.is_empty());
    }

    #[test]
    fn test_wrong_parent_count() {
        let mut operator = Sum::new(2, PassThrough::Parents);
        match operator.apply(&parents(&[1, 2, 3]), 1.0, 1) {
            Err(GeneticError::SizeMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 3);
            }
            _ => panic!("Expected SizeMismatch error"),
        }
    }

    #[test]
    fn test_no_recombination_copies_parent() {
        let mut operator = NoRecombination::new();
        let group = parents(&[5]);

        let copied = Recombination::<Tag>::apply(&mut operator, &group, 1.0, 1).unwrap();
        assert_eq!(copied[0].genotype(), &Tag(5));
        assert!(Arc::ptr_eq(&copied[0].parents()[0], &group[0]));

        let passed = Recombination::<Tag>::apply(&mut operator, &group, 0.0, 1).unwrap();
        assert!(Arc::ptr_eq(&passed[0], &group[0]));
    }
}
