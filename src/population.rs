//! # Population
//!
//! The live set of individuals at a given generation. Order is significant: ties
//! in fitness are always broken in favour of the individual that comes first, so
//! selection and replacement stay deterministic for a fixed seed.
//!
//! The only way to change the members is [`Population::advance`], which swaps the
//! whole sequence at once and bumps the generation counter. Nothing ever adds or
//! removes a single individual, so callbacks never observe a half-built
//! generation.

use std::ops::Index;
use std::sync::Arc;

use crate::error::{GeneticError, OptionExt, Result};
use crate::genotype::{Genotype, Individual};

/// An ordered collection of individuals plus its generation counter.
#[derive(Debug, Clone)]
pub struct Population<G: Genotype> {
    individuals: Vec<Arc<Individual<G>>>,
    generation: usize,
}

impl<G: Genotype> Population<G> {
    /// Creates a generation-0 population.
    pub fn new(individuals: Vec<Arc<Individual<G>>>) -> Self {
        Self {
            individuals,
            generation: 0,
        }
    }

    /// Creates an empty generation-0 population.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn size(&self) -> usize {
        self.individuals.len()
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Individual<G>>> {
        self.individuals.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Individual<G>>> {
        self.individuals.iter()
    }

    pub fn as_slice(&self) -> &[Arc<Individual<G>>] {
        &self.individuals
    }

    /// Fitness of every member, in population order.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::NotEvaluated`] for the first member without a
    /// cached fitness.
    pub fn fitness(&self) -> Result<Vec<f64>> {
        self.individuals.iter().map(|i| i.fitness()).collect()
    }

    /// The fittest member. Ties go to the earliest member.
    pub fn best(&self) -> Result<&Arc<Individual<G>>> {
        let idx = self.extreme_index(|candidate, current| candidate > current)?;
        self.individuals
            .get(idx)
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
    }

    /// The least fit member. Ties go to the earliest member.
    pub fn worst(&self) -> Result<&Arc<Individual<G>>> {
        let idx = self.extreme_index(|candidate, current| candidate < current)?;
        self.individuals
            .get(idx)
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
    }

    /// Indices of the members sorted from fittest to least fit.
    ///
    /// The sort is stable, so equal fitness keeps population order.
    pub fn ranking(&self) -> Result<Vec<usize>> {
        let fitness = self.fitness()?;
        Ok(rank_descending(&fitness))
    }

    /// Replaces every member at once and moves to the next generation.
    pub(crate) fn advance(&mut self, individuals: Vec<Arc<Individual<G>>>) {
        self.individuals = individuals;
        self.generation += 1;
    }

    /// Drops the cached fitness of every member.
    ///
    /// Members shared with the lineage of other individuals are copied first, the
    /// historical copies keep the value they had.
    pub(crate) fn invalidate_fitness(&mut self) {
        for individual in self.individuals.iter_mut() {
            if individual.is_evaluated() {
                Arc::make_mut(individual).invalidate_fitness();
            }
        }
    }

    pub(crate) fn individuals_mut(&mut self) -> &mut [Arc<Individual<G>>] {
        &mut self.individuals
    }

    fn extreme_index<F>(&self, better: F) -> Result<usize>
    where
        F: Fn(f64, f64) -> bool,
    {
        if self.individuals.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        let mut best_idx = 0;
        let mut best_fitness = self.individuals[0].fitness()?;
        for (idx, individual) in self.individuals.iter().enumerate().skip(1) {
            let fitness = individual.fitness()?;
            if better(fitness, best_fitness) {
                best_idx = idx;
                best_fitness = fitness;
            }
        }
        Ok(best_idx)
    }
}

impl<G: Genotype> Default for Population<G> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<G: Genotype> Index<usize> for Population<G> {
    type Output = Arc<Individual<G>>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.individuals[index]
    }
}

impl<'a, G: Genotype> IntoIterator for &'a Population<G> {
    type Item = &'a Arc<Individual<G>>;
    type IntoIter = std::slice::Iter<'a, Arc<Individual<G>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}

/// Stable descending sort of indices by score.
pub(crate) fn rank_descending(scores: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    indices
}
