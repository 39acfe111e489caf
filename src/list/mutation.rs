use crate::error::{GeneticError, Result};
use crate::list::{Alphabet, Gene, ListGenotype};
use crate::mutation::Mutation;
use crate::rng::RandomNumberGenerator;

/// Runs a Bernoulli trial per gene and applies `mutate` to every hit.
///
/// The genes are copied on the first hit only. Returns `None` when no gene
/// was hit or the hits left the genes unchanged.
fn per_gene<T, F>(
    genotype: &ListGenotype<T>,
    probability: f64,
    rng: &mut RandomNumberGenerator,
    mut mutate: F,
) -> Option<ListGenotype<T>>
where
    T: Gene,
    F: FnMut(&mut [T], usize, &mut RandomNumberGenerator),
{
    let mut mutated: Option<Vec<T>> = None;
    for index in 0..genotype.len() {
        if rng.chance(probability) {
            let genes = mutated.get_or_insert_with(|| genotype.genes().to_vec());
            mutate(genes.as_mut_slice(), index, &mut *rng);
        }
    }
    mutated
        .filter(|genes| genes.as_slice() != genotype.genes())
        .map(ListGenotype::new)
}

/// Replaces each hit gene with a random symbol of the alphabet.
///
/// By default the new symbol always differs from the old one; with
/// [`RandomGene::allowing_same`] it may be the same.
#[derive(Debug, Clone)]
pub struct RandomGene<T> {
    alphabet: Alphabet<T>,
    same: bool,
    rng: RandomNumberGenerator,
}

impl<T: Gene> RandomGene<T> {
    pub fn new(alphabet: Alphabet<T>) -> Self {
        Self {
            alphabet,
            same: false,
            rng: RandomNumberGenerator::new(),
        }
    }

    pub fn allowing_same(mut self) -> Self {
        self.same = true;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }
}

impl<T: Gene> Mutation<ListGenotype<T>> for RandomGene<T> {
    fn mutate(&mut self, genotype: &ListGenotype<T>, probability: f64) -> Option<ListGenotype<T>> {
        let alphabet = &self.alphabet;
        let same = self.same;
        per_gene(genotype, probability, &mut self.rng, |genes, i, rng| {
            genes[i] = if same {
                alphabet.pick(rng)
            } else {
                alphabet.pick_other(&genes[i], rng)
            };
        })
    }
}

/// Swaps each hit gene with another gene at a random position.
#[derive(Debug, Clone, Default)]
pub struct SwapGenes {
    rng: RandomNumberGenerator,
}

impl SwapGenes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }
}

impl<T: Gene> Mutation<ListGenotype<T>> for SwapGenes {
    fn mutate(&mut self, genotype: &ListGenotype<T>, probability: f64) -> Option<ListGenotype<T>> {
        let len = genotype.len();
        if len < 2 {
            return None;
        }
        per_gene(genotype, probability, &mut self.rng, |genes, i, rng| {
            // Draw from the other len - 1 positions.
            let mut j = rng.index(len - 1);
            if j >= i {
                j += 1;
            }
            genes.swap(i, j);
        })
    }
}

/// How far and within which bounds a [`Creep`] moves a gene.
#[derive(Debug, Clone, Copy)]
struct CreepStep {
    amount: i64,
    fixed: bool,
    lower: Option<i64>,
    upper: Option<i64>,
}

impl CreepStep {
    fn apply(self, gene: i64, rng: &mut RandomNumberGenerator) -> i64 {
        let amount = if self.fixed {
            self.amount
        } else {
            rng.range_inclusive(1, self.amount)
        };
        let mut gene = if rng.chance(0.5) {
            gene.saturating_add(amount)
        } else {
            gene.saturating_sub(amount)
        };
        if let Some(lower) = self.lower {
            gene = gene.max(lower);
        }
        if let Some(upper) = self.upper {
            gene = gene.min(upper);
        }
        gene
    }
}

/// Adds or subtracts a small amount to each hit integer gene.
///
/// The amount is fixed by default, or drawn from `1..=amount` with
/// [`Creep::with_variable_amount`]. The sign is a fair coin. Results are
/// clamped into the optional bounds.
#[derive(Debug, Clone)]
pub struct Creep {
    step: CreepStep,
    rng: RandomNumberGenerator,
}

impl Creep {
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if `amount` is zero.
    pub fn new(amount: i64) -> Result<Self> {
        if amount == 0 {
            return Err(GeneticError::Configuration(
                "The creep amount cannot be zero".to_string(),
            ));
        }
        Ok(Self {
            step: CreepStep {
                amount: amount.saturating_abs(),
                fixed: true,
                lower: None,
                upper: None,
            },
            rng: RandomNumberGenerator::new(),
        })
    }

    pub fn with_variable_amount(mut self) -> Self {
        self.step.fixed = false;
        self
    }

    /// Bounds the mutated genes. Swapped bounds are reordered.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if both bounds are equal.
    pub fn with_bounds(mut self, lower: i64, upper: i64) -> Result<Self> {
        if lower == upper {
            return Err(GeneticError::Configuration(format!(
                "Creep bounds cannot both be {}",
                lower
            )));
        }
        self.step.lower = Some(lower.min(upper));
        self.step.upper = Some(lower.max(upper));
        Ok(self)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }
}

impl Mutation<ListGenotype<i64>> for Creep {
    fn mutate(&mut self, genotype: &ListGenotype<i64>, probability: f64) -> Option<ListGenotype<i64>> {
        let step = self.step;
        per_gene(genotype, probability, &mut self.rng, |genes, i, rng| {
            genes[i] = step.apply(genes[i], rng);
        })
    }
}
