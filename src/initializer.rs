//! # Initializer
//!
//! Builds the generation-0 genotypes. Any `FnMut(usize) -> Vec<G>` closure is an
//! initializer; the list module provides [`AlphabetInitializer`](crate::list::AlphabetInitializer).

use crate::error::Result;
use crate::genotype::Genotype;

/// Creates the genotypes of the initial population.
pub trait Initializer<G: Genotype>: Send {
    /// Creates exactly `count` genotypes.
    fn create(&mut self, count: usize) -> Result<Vec<G>>;
}

impl<G, F> Initializer<G> for F
where
    G: Genotype,
    F: FnMut(usize) -> Vec<G> + Send,
{
    fn create(&mut self, count: usize) -> Result<Vec<G>> {
        Ok(self(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::tests::Tag;

    #[test]
    fn test_closure_initializer() {
        let mut next = 0;
        let mut initializer = |count: usize| {
            let start = next;
            next += count;
            (start..start + count).map(Tag).collect::<Vec<_>>()
        };

        let first = Initializer::<Tag>::create(&mut initializer, 3).unwrap();
        let second = Initializer::<Tag>::create(&mut initializer, 2).unwrap();

        assert_eq!(first, vec![Tag(0), Tag(1), Tag(2)]);
        assert_eq!(second, vec![Tag(3), Tag(4)]);
    }
}
