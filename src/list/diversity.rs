//! Diversity measures for populations of list genotypes, usable as history
//! statistics.

use crate::error::{GeneticError, Result};
use crate::history::Statistic;
use crate::list::{Alphabet, Gene, ListGenotype};
use crate::population::Population;

fn genotypes<T: Gene>(population: &Population<ListGenotype<T>>) -> Result<Vec<&ListGenotype<T>>> {
    if population.is_empty() {
        return Err(GeneticError::EmptyPopulation);
    }
    Ok(population.iter().map(|member| member.genotype()).collect())
}

/// Mean Hamming distance over every pair of genotypes, divided by the
/// genotype length. Ranges from 0 (all equal) to 1.
///
/// Positions beyond the shorter genotype of a pair count as different.
/// Fewer than two genotypes have a diversity of 0.
pub fn average_hamming<T: Gene>(genotypes: &[&ListGenotype<T>]) -> f64 {
    let mut total = 0.0;
    let mut pairs = 0usize;
    for (i, a) in genotypes.iter().enumerate() {
        for b in &genotypes[i + 1..] {
            let length = a.len().max(b.len());
            if length > 0 {
                let differing = a.iter().zip(b.iter()).filter(|(x, y)| x != y).count()
                    + a.len().abs_diff(b.len());
                total += differing as f64 / length as f64;
            }
            pairs += 1;
        }
    }

    if pairs == 0 {
        0.0
    } else {
        total / pairs as f64
    }
}

/// How many alphabet symbols appear at each position, averaged over the
/// positions and scaled so that a single symbol is 0 and the whole alphabet
/// is 1.
pub fn different_genes<T: Gene>(alphabet: &Alphabet<T>, genotypes: &[&ListGenotype<T>]) -> f64 {
    let length = genotypes.iter().map(|g| g.len()).max().unwrap_or(0);
    if length == 0 || alphabet.len() < 2 {
        return 0.0;
    }

    let spread: f64 = (0..length)
        .map(|i| {
            let present = alphabet
                .symbols()
                .iter()
                .filter(|&symbol| genotypes.iter().any(|g| g.genes().get(i) == Some(symbol)))
                .count();
            present.saturating_sub(1) as f64 / (alphabet.len() - 1) as f64
        })
        .sum();
    spread / length as f64
}

/// [`average_hamming`] as a history statistic named `average_hamming`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageHamming;

impl<T: Gene> Statistic<ListGenotype<T>> for AverageHamming {
    fn name(&self) -> &str {
        "average_hamming"
    }

    fn compute(&self, population: &Population<ListGenotype<T>>) -> Result<f64> {
        Ok(average_hamming(&genotypes(population)?))
    }
}

/// [`different_genes`] over a fixed alphabet, as a history statistic named
/// `different_genes`.
#[derive(Debug, Clone)]
pub struct DifferentGenes<T> {
    alphabet: Alphabet<T>,
}

impl<T: Gene> DifferentGenes<T> {
    pub fn new(alphabet: Alphabet<T>) -> Self {
        Self { alphabet }
    }
}

impl<T: Gene> Statistic<ListGenotype<T>> for DifferentGenes<T> {
    fn name(&self) -> &str {
        "different_genes"
    }

    fn compute(&self, population: &Population<ListGenotype<T>>) -> Result<f64> {
        Ok(different_genes(&self.alphabet, &genotypes(population)?))
    }
}
