use crate::error::Result;
use crate::genotype::Genotype;
use crate::population::rank_descending;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_schema::SelectionSchema;

/// Deterministic selection of the fittest individuals.
///
/// Without replacement the `n` fittest are returned, fittest first, ties kept
/// in population order. With replacement the single fittest individual fills
/// every slot.
#[derive(Debug, Clone, Default)]
pub struct Truncation {
    replacement: bool,
    // Truncation is deterministic; the source only exists so every schema can be seeded alike.
    rng: RandomNumberGenerator,
}

impl Truncation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replacement(mut self) -> Self {
        self.replacement = true;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }
}

impl<G: Genotype> SelectionSchema<G> for Truncation {
    fn replacement(&self) -> bool {
        self.replacement
    }

    fn set_replacement(&mut self, replacement: bool) {
        self.replacement = replacement;
    }

    fn choose(&mut self, fitness: &[f64], n: usize) -> Result<Vec<usize>> {
        let ranking = rank_descending(fitness);
        if self.replacement {
            Ok(vec![ranking[0]; n])
        } else {
            Ok(ranking.into_iter().take(n).collect())
        }
    }
}
