use crate::error::{GeneticError, Result};
use crate::initializer::Initializer;
use crate::list::{Alphabet, Gene, ListGenotype};
use crate::rng::RandomNumberGenerator;

/// Creates genotypes of a fixed length with genes drawn from an alphabet.
#[derive(Debug, Clone)]
pub struct AlphabetInitializer<T> {
    alphabet: Alphabet<T>,
    length: usize,
    rng: RandomNumberGenerator,
}

impl<T: Gene> AlphabetInitializer<T> {
    pub fn new(alphabet: Alphabet<T>, length: usize) -> Self {
        Self {
            alphabet,
            length,
            rng: RandomNumberGenerator::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }
}

impl<T: Gene> Initializer<ListGenotype<T>> for AlphabetInitializer<T> {
    fn create(&mut self, count: usize) -> Result<Vec<ListGenotype<T>>> {
        (0..count)
            .map(|_| {
                self.alphabet
                    .pick_many(self.length, true, &mut self.rng)
                    .map(ListGenotype::new)
            })
            .collect()
    }
}

/// Creates genotypes whose genes are distinct symbols of an alphabet, in
/// random order. With `length == alphabet.len()` every genotype is a
/// permutation of the alphabet.
#[derive(Debug, Clone)]
pub struct PermutationInitializer<T> {
    alphabet: Alphabet<T>,
    length: usize,
    rng: RandomNumberGenerator,
}

impl<T: Gene> PermutationInitializer<T> {
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if `length` exceeds the
    /// number of symbols.
    pub fn new(alphabet: Alphabet<T>, length: usize) -> Result<Self> {
        if length > alphabet.len() {
            return Err(GeneticError::Configuration(format!(
                "Permutations of length {} need at least as many symbols, the alphabet has {}",
                length,
                alphabet.len()
            )));
        }
        Ok(Self {
            alphabet,
            length,
            rng: RandomNumberGenerator::new(),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }
}

impl<T: Gene> Initializer<ListGenotype<T>> for PermutationInitializer<T> {
    fn create(&mut self, count: usize) -> Result<Vec<ListGenotype<T>>> {
        (0..count)
            .map(|_| {
                self.alphabet
                    .pick_many(self.length, false, &mut self.rng)
                    .map(ListGenotype::new)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_initializer() {
        let alphabet = Alphabet::hexadecimal();
        let mut initializer = AlphabetInitializer::new(alphabet.clone(), 32).with_seed(5);

        let genotypes = initializer.create(6).unwrap();
        assert_eq!(genotypes.len(), 6);
        for genotype in &genotypes {
            assert_eq!(genotype.len(), 32);
            assert!(genotype.iter().all(|g| alphabet.contains(g)));
        }
    }

    #[test]
    fn test_permutation_initializer() {
        let alphabet = Alphabet::decimal();
        let mut initializer = PermutationInitializer::new(alphabet, 10).unwrap().with_seed(2);

        for genotype in initializer.create(5).unwrap() {
            let mut genes = genotype.into_genes();
            genes.sort_unstable();
            assert_eq!(genes, (0..10).collect::<Vec<u8>>());
        }
    }

    #[test]
    fn test_permutation_longer_than_alphabet() {
        match PermutationInitializer::new(Alphabet::binary(), 3) {
            Err(GeneticError::Configuration(_)) => (),
            _ => panic!("Expected Configuration error"),
        }
    }
}
