//! # List genotypes
//!
//! A ready-made representation for problems whose candidates are sequences of
//! genes: bit strings, DNA-like strings, permutations, bounded integers.
//!
//! - [`ListGenotype`]: the genotype itself; its phenotype is the gene vector.
//! - [`Alphabet`]: the set of symbols genes are drawn from.
//! - Initializers: [`AlphabetInitializer`], [`PermutationInitializer`],
//!   [`IntegerIntervalInitializer`], [`RealIntervalInitializer`].
//! - Recombinations: [`NPivot`], [`RandomMask`], [`Pmx`], and for numeric
//!   genes [`RangeCrossover`], [`FlexibleRecombination`],
//!   [`PlainRecombination`], [`GeneralisedCrossover`].
//! - Mutations: [`RandomGene`], [`SwapGenes`], [`Creep`].
//! - Diversity statistics: [`AverageHamming`], [`DifferentGenes`].

use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

use crate::error::{GeneticError, Result};
use crate::genotype::Genotype;

pub mod alphabet;
pub mod bin;
pub mod diversity;
pub mod initializer;
pub mod int;
pub mod mutation;
pub mod real;
pub mod recombination;

pub use alphabet::Alphabet;
pub use bin::GeneralisedCrossover;
pub use diversity::{average_hamming, different_genes, AverageHamming, DifferentGenes};
pub use initializer::{AlphabetInitializer, PermutationInitializer};
pub use int::{IntegerIntervalInitializer, RangeCrossover};
pub use mutation::{Creep, RandomGene, SwapGenes};
pub use real::{FlexibleRecombination, PlainRecombination, RealIntervalInitializer};
pub use recombination::{NPivot, Pmx, RandomMask};

/// Anything usable as a gene.
pub trait Gene: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

impl<T> Gene for T where T: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

/// A genotype made of an ordered list of genes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ListGenotype<T> {
    genes: Vec<T>,
}

impl<T: Gene> ListGenotype<T> {
    pub fn new(genes: Vec<T>) -> Self {
        Self { genes }
    }

    pub fn genes(&self) -> &[T] {
        &self.genes
    }

    pub fn into_genes(self) -> Vec<T> {
        self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.genes.iter()
    }
}

impl<T: Gene> Genotype for ListGenotype<T> {
    type Phenotype = Vec<T>;

    fn phenotype(&self) -> Vec<T> {
        self.genes.clone()
    }
}

impl<T: Gene> From<Vec<T>> for ListGenotype<T> {
    fn from(genes: Vec<T>) -> Self {
        Self::new(genes)
    }
}

impl<T: Gene> FromIterator<T> for ListGenotype<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> Index<usize> for ListGenotype<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.genes[index]
    }
}

/// Genes separated by commas, e.g. `0,1,1,0`.
impl<T: fmt::Display> fmt::Display for ListGenotype<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, gene) in self.genes.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", gene)?;
        }
        Ok(())
    }
}

/// A closed range of gene values, stored with `lower < upper`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<T> {
    lower: T,
    upper: T,
}

impl<T: PartialOrd + Copy + fmt::Debug> Interval<T> {
    /// Builds the interval between two bounds given in any order.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if both bounds are equal,
    /// and a `GeneticError::InvalidNumericValue` error if they cannot be
    /// compared (NaN).
    pub fn new(lower: T, upper: T) -> Result<Self> {
        match lower.partial_cmp(&upper) {
            Some(Ordering::Less) => Ok(Self { lower, upper }),
            Some(Ordering::Greater) => Ok(Self {
                lower: upper,
                upper: lower,
            }),
            Some(Ordering::Equal) => Err(GeneticError::Configuration(format!(
                "Interval bounds cannot both be {:?}",
                lower
            ))),
            None => Err(GeneticError::InvalidNumericValue(format!(
                "Interval bounds {:?} and {:?} are not comparable",
                lower, upper
            ))),
        }
    }

    pub fn lower(&self) -> T {
        self.lower
    }

    pub fn upper(&self) -> T {
        self.upper
    }

    pub fn contains(&self, value: T) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// The closest value inside the interval.
    pub fn clamp(&self, value: T) -> T {
        if value < self.lower {
            self.lower
        } else if value > self.upper {
            self.upper
        } else {
            value
        }
    }
}

#[cfg(test)]
pub(crate) fn chars(genes: &str) -> ListGenotype<char> {
    genes.chars().collect()
}

#[cfg(test)]
pub(crate) fn text(genotype: &ListGenotype<char>) -> String {
    genotype.iter().collect()
}
