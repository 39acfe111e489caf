//! # Replacement schemas
//!
//! A replacement schema merges the current population and the offspring into
//! the members of the next generation. The engine calls it exactly once per
//! generation and rejects any result whose size differs from the configured
//! population size.
//!
//! Three schemas are provided:
//!
//! - [`HighElitism`]: keeps the fittest among incumbents and offspring together.
//! - [`LowElitism`]: keeps the fittest offspring, then fills with the fittest incumbents.
//!   With a replacement ratio of 1 every incumbent is replaced.
//! - [`Generational`]: keeps the offspring in the order they were bred, then fills
//!   with the fittest incumbents.

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::Result;
use crate::genotype::{Genotype, Individual};
use crate::population::{rank_descending, Population};

/// Trait for replacement schemas.
pub trait ReplacementSchema<G: Genotype>: Debug + Send {
    /// Builds the members of the next generation.
    ///
    /// # Arguments
    ///
    /// * `population` - The current, fully evaluated population.
    /// * `offspring` - The evaluated offspring of this generation.
    /// * `size` - The number of members the next generation must have.
    fn replace(
        &mut self,
        population: &Population<G>,
        offspring: Vec<Arc<Individual<G>>>,
        size: usize,
    ) -> Result<Vec<Arc<Individual<G>>>>;
}

/// Takes the `amount` fittest individuals, preserving order among equals.
fn fittest<G: Genotype>(
    individuals: &[Arc<Individual<G>>],
    amount: usize,
) -> Result<Vec<Arc<Individual<G>>>> {
    let scores = individuals
        .iter()
        .map(|i| i.fitness())
        .collect::<Result<Vec<_>>>()?;
    Ok(rank_descending(&scores)
        .into_iter()
        .take(amount)
        .map(|idx| individuals[idx].clone())
        .collect())
}

/// Replacement with the fittest among both population and offspring.
///
/// Offspring win ties against incumbents.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct HighElitism;

impl<G: Genotype> ReplacementSchema<G> for HighElitism {
    fn replace(
        &mut self,
        population: &Population<G>,
        offspring: Vec<Arc<Individual<G>>>,
        size: usize,
    ) -> Result<Vec<Arc<Individual<G>>>> {
        let mut pool = offspring;
        pool.extend(population.iter().cloned());
        fittest(&pool, size)
    }
}

/// Replaces the least fit incumbents with the fittest offspring.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct LowElitism;

impl<G: Genotype> ReplacementSchema<G> for LowElitism {
    fn replace(
        &mut self,
        population: &Population<G>,
        offspring: Vec<Arc<Individual<G>>>,
        size: usize,
    ) -> Result<Vec<Arc<Individual<G>>>> {
        let mut next = fittest(&offspring, size)?;
        let missing = size - next.len();
        if missing > 0 {
            next.extend(fittest(population.as_slice(), missing)?);
        }
        Ok(next)
    }
}

/// Offspring replace the population in breeding order; incumbents only fill
/// the places the offspring do not cover.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct Generational;

impl<G: Genotype> ReplacementSchema<G> for Generational {
    fn replace(
        &mut self,
        population: &Population<G>,
        offspring: Vec<Arc<Individual<G>>>,
        size: usize,
    ) -> Result<Vec<Arc<Individual<G>>>> {
        let mut next: Vec<_> = offspring.into_iter().take(size).collect();
        let missing = size - next.len();
        if missing > 0 {
            next.extend(fittest(population.as_slice(), missing)?);
        }
        Ok(next)
    }
}
