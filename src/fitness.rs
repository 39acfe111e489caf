//! # Fitness
//!
//! The fitness function maps a phenotype to a score where higher is fitter. Any
//! `Fn(&Phenotype) -> f64` closure qualifies; implement [`Fitness`] directly when
//! the evaluation can fail.
//!
//! Scores of independent individuals do not depend on each other, so a large
//! enough batch is evaluated on the `rayon` thread pool. Results are written
//! back only after every score in the batch succeeded.
//!
//! ## Example
//!
//! ```rust
//! use genloop::error::BoxError;
//! use genloop::fitness::Fitness;
//! use genloop::list::ListGenotype;
//!
//! struct Ratio;
//!
//! impl Fitness<ListGenotype<u8>> for Ratio {
//!     fn evaluate(&self, genes: &Vec<u8>) -> Result<f64, BoxError> {
//!         if genes.is_empty() {
//!             return Err("cannot score an empty genotype".into());
//!         }
//!         Ok(genes.iter().map(|&g| g as f64).sum::<f64>() / genes.len() as f64)
//!     }
//! }
//! ```

use std::sync::Arc;

use rayon::prelude::*;
use tracing::trace;

use crate::error::{BoxError, GeneticError, Result};
use crate::genotype::{Genotype, Individual};

/// Scores a phenotype. Higher is fitter.
pub trait Fitness<G: Genotype>: Send + Sync {
    /// Computes the score of a decoded genotype.
    fn evaluate(&self, phenotype: &G::Phenotype) -> std::result::Result<f64, BoxError>;
}

impl<G, F> Fitness<G> for F
where
    G: Genotype,
    F: Fn(&G::Phenotype) -> f64 + Send + Sync,
{
    fn evaluate(&self, phenotype: &G::Phenotype) -> std::result::Result<f64, BoxError> {
        Ok(self(phenotype))
    }
}

/// Scores a single individual, turning failures and non-finite scores into
/// [`GeneticError::FitnessEvaluation`].
pub fn score<G: Genotype>(fitness: &dyn Fitness<G>, individual: &Individual<G>) -> Result<f64> {
    let failure = |source: BoxError| GeneticError::FitnessEvaluation {
        id: individual.id(),
        genotype: format!("{:?}", individual.genotype()),
        source,
    };

    let value = fitness
        .evaluate(&individual.phenotype())
        .map_err(failure)?;

    if !value.is_finite() {
        return Err(failure(
            format!("Non-finite fitness score encountered: {}", value).into(),
        ));
    }

    Ok(value)
}

/// Evaluates every individual of the batch that has no cached fitness.
///
/// Batches with at least `parallel_threshold` pending individuals are scored in
/// parallel. On failure nothing is written back and the error of the first
/// failing individual, in batch order, is returned.
///
/// Returns the number of fitness evaluations performed.
pub fn evaluate_batch<G: Genotype>(
    fitness: &dyn Fitness<G>,
    individuals: &mut [Arc<Individual<G>>],
    parallel_threshold: usize,
) -> Result<usize> {
    let pending: Vec<usize> = individuals
        .iter()
        .enumerate()
        .filter(|(_, individual)| !individual.is_evaluated())
        .map(|(idx, _)| idx)
        .collect();

    if pending.is_empty() {
        return Ok(0);
    }

    let scores: Vec<f64> = if pending.len() >= parallel_threshold {
        trace!(pending = pending.len(), "evaluating fitness in parallel");
        let shared: &[Arc<Individual<G>>] = individuals;
        pending
            .par_iter()
            .map(|&idx| score(fitness, &shared[idx]))
            .collect::<Vec<_>>()
            .into_iter()
            .collect::<Result<Vec<_>>>()?
    } else {
        trace!(pending = pending.len(), "evaluating fitness sequentially");
        pending
            .iter()
            .map(|&idx| score(fitness, &individuals[idx]))
            .collect::<Result<Vec<_>>>()?
    };

    for (&idx, value) in pending.iter().zip(scores) {
        Arc::make_mut(&mut individuals[idx]).set_fitness(value);
    }

    Ok(pending.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug, PartialEq)]
    struct Number(i64);

    impl Genotype for Number {
        type Phenotype = i64;

        fn phenotype(&self) -> i64 {
            self.0
        }
    }

    struct FailsOn(i64);

    impl Fitness<Number> for FailsOn {
        fn evaluate(&self, phenotype: &i64) -> std::result::Result<f64, BoxError> {
            if *phenotype == self.0 {
                Err(format!("cannot score {}", phenotype).into())
            } else {
                Ok(*phenotype as f64)
            }
        }
    }

    fn batch(values: &[i64]) -> Vec<Arc<Individual<Number>>> {
        values
            .iter()
            .map(|&v| Arc::new(Individual::new(Number(v))))
            .collect()
    }

    #[test]
    fn test_closure_fitness() {
        let fitness = |value: &i64| *value as f64 * 0.5;
        let mut individuals = batch(&[2, 4]);
        let evaluated = evaluate_batch::<Number>(&fitness, &mut individuals, 1000).unwrap();

        assert_eq!(evaluated, 2);
        assert_eq!(individuals[0].fitness().unwrap(), 1.0);
        assert_eq!(individuals[1].fitness().unwrap(), 2.0);
    }

    #[test]
    fn test_cached_values_are_not_recomputed() {
        let calls = AtomicUsize::new(0);
        let fitness = |value: &i64| {
            calls.fetch_add(1, Ordering::SeqCst);
            *value as f64
        };
        let mut individuals = batch(&[1, 2, 3]);

        evaluate_batch::<Number>(&fitness, &mut individuals, 1000).unwrap();
        let again = evaluate_batch::<Number>(&fitness, &mut individuals, 1000).unwrap();

        assert_eq!(again, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_failure_identifies_individual() {
        let mut individuals = batch(&[1, 7, 3, 7]);
        let offender = individuals[1].id();

        match evaluate_batch::<Number>(&FailsOn(7), &mut individuals, 1000) {
            Err(GeneticError::FitnessEvaluation { id, genotype, .. }) => {
                assert_eq!(id, offender);
                assert_eq!(genotype, "Number(7)");
            }
            _ => panic!("Expected FitnessEvaluation error"),
        }
        // Nothing was written back.
        assert!(individuals.iter().all(|i| !i.is_evaluated()));
    }

    #[test]
    fn test_parallel_failure_reports_first_in_order() {
        let mut individuals = batch(&[1, 2, 7, 4, 7, 6]);
        let offender = individuals[2].id();

        match evaluate_batch::<Number>(&FailsOn(7), &mut individuals, 1) {
            Err(GeneticError::FitnessEvaluation { id, .. }) => assert_eq!(id, offender),
            _ => panic!("Expected FitnessEvaluation error"),
        }
    }

    #[test]
    fn test_non_finite_score_is_a_failure() {
        let fitness = |_: &i64| f64::NAN;
        let mut individuals = batch(&[1]);
        let result = evaluate_batch::<Number>(&fitness, &mut individuals, 1000);
        assert!(matches!(result, Err(GeneticError::FitnessEvaluation { .. })));
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let fitness = |value: &i64| (*value * *value) as f64;
        let mut sequential = batch(&(0..50).collect::<Vec<_>>());
        let mut parallel = sequential.clone();

        evaluate_batch::<Number>(&fitness, &mut sequential, 1000).unwrap();
        evaluate_batch::<Number>(&fitness, &mut parallel, 1).unwrap();

        let a: Vec<f64> = sequential.iter().map(|i| i.fitness().unwrap()).collect();
        let b: Vec<f64> = parallel.iter().map(|i| i.fitness().unwrap()).collect();
        assert_eq!(a, b);
    }
}
