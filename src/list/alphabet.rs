use crate::error::{GeneticError, Result};
use crate::list::Gene;
use crate::rng::RandomNumberGenerator;

/// The symbols a gene may take.
///
/// Duplicates are removed, keeping the first occurrence. An alphabet needs at
/// least two distinct symbols to be useful for evolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Alphabet<T> {
    symbols: Vec<T>,
}

impl<T: Gene> Alphabet<T> {
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if fewer than two distinct
    /// symbols are given.
    pub fn new<I: IntoIterator<Item = T>>(symbols: I) -> Result<Self> {
        let mut unique: Vec<T> = Vec::new();
        for symbol in symbols {
            if !unique.contains(&symbol) {
                unique.push(symbol);
            }
        }
        if unique.len() < 2 {
            return Err(GeneticError::Configuration(format!(
                "An alphabet needs at least 2 distinct symbols, got {}",
                unique.len()
            )));
        }
        Ok(Self { symbols: unique })
    }

    pub fn symbols(&self) -> &[T] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: &T) -> bool {
        self.symbols.contains(symbol)
    }

    /// A uniformly chosen symbol.
    pub fn pick(&self, rng: &mut RandomNumberGenerator) -> T {
        self.symbols[rng.index(self.symbols.len())].clone()
    }

    /// A uniformly chosen symbol different from `current`.
    pub fn pick_other(&self, current: &T, rng: &mut RandomNumberGenerator) -> T {
        let others: Vec<&T> = self.symbols.iter().filter(|&s| s != current).collect();
        if others.is_empty() {
            return current.clone();
        }
        others[rng.index(others.len())].clone()
    }

    /// `amount` symbols, drawn with or without repetition.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if more distinct symbols
    /// are requested than the alphabet holds.
    pub fn pick_many(
        &self,
        amount: usize,
        repetition: bool,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<T>> {
        if repetition {
            return Ok((0..amount).map(|_| self.pick(rng)).collect());
        }
        if amount > self.symbols.len() {
            return Err(GeneticError::Configuration(format!(
                "Cannot draw {} distinct symbols from an alphabet of {}",
                amount,
                self.symbols.len()
            )));
        }
        Ok(rng
            .sample_indices(self.symbols.len(), amount)
            .into_iter()
            .map(|idx| self.symbols[idx].clone())
            .collect())
    }
}

impl Alphabet<u8> {
    fn digits(base: u8) -> Self {
        Self {
            symbols: (0..base).collect(),
        }
    }

    /// `0` and `1`.
    pub fn binary() -> Self {
        Self::digits(2)
    }

    /// `0` to `7`.
    pub fn octal() -> Self {
        Self::digits(8)
    }

    /// `0` to `9`.
    pub fn decimal() -> Self {
        Self::digits(10)
    }

    /// `0` to `15`.
    pub fn hexadecimal() -> Self {
        Self::digits(16)
    }
}

impl Alphabet<char> {
    /// The four nucleobases `A`, `C`, `G` and `T`.
    pub fn genetic_code() -> Self {
        Self {
            symbols: vec!['A', 'C', 'G', 'T'],
        }
    }
}
