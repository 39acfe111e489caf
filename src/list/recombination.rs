use crate::error::{GeneticError, Result};
use crate::list::{Gene, ListGenotype};
use crate::recombination::Recombination;
use crate::rng::RandomNumberGenerator;

pub(crate) fn pair<'a, T: Gene>(parents: &[&'a ListGenotype<T>]) -> Result<(&'a ListGenotype<T>, &'a ListGenotype<T>)> {
    match parents {
        [first, second] => Ok((*first, *second)),
        _ => Err(GeneticError::SizeMismatch {
            stage: "recombination",
            expected: 2,
            actual: parents.len(),
        }),
    }
}

/// Swaps the gene segments between both parents at every pivot.
///
/// Gene `i` comes from the other parent when an odd number of pivots lie at or
/// before `i`. Only the common length takes part; the tail of the longer
/// parent stays with its own child.
pub(crate) fn cross_at<T: Gene>(
    first: &ListGenotype<T>,
    second: &ListGenotype<T>,
    pivots: &[usize],
) -> (ListGenotype<T>, ListGenotype<T>) {
    let mut a = first.genes().to_vec();
    let mut b = second.genes().to_vec();
    let common = a.len().min(b.len());

    for i in 0..common {
        let crossed = pivots.iter().filter(|&&p| p <= i).count();
        if crossed % 2 == 1 {
            std::mem::swap(&mut a[i], &mut b[i]);
        }
    }

    (ListGenotype::new(a), ListGenotype::new(b))
}

/// N-point crossover. `NPivot::new(1)` is the classic one-point crossover.
///
/// Pivots are distinct positions in `1..len`, so each segment holds at least
/// one gene. Asking for more pivots than fit places one between every gene.
#[derive(Debug, Clone)]
pub struct NPivot {
    pivots: usize,
    rng: RandomNumberGenerator,
}

impl NPivot {
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if `pivots` is 0.
    pub fn new(pivots: usize) -> Result<Self> {
        if pivots == 0 {
            return Err(GeneticError::Configuration(
                "N-pivot crossover needs at least one pivot".to_string(),
            ));
        }
        Ok(Self {
            pivots,
            rng: RandomNumberGenerator::new(),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }

    pub fn pivots(&self) -> usize {
        self.pivots
    }
}

impl<T: Gene> Recombination<ListGenotype<T>> for NPivot {
    fn arity(&self) -> usize {
        2
    }

    fn rng(&mut self) -> &mut RandomNumberGenerator {
        &mut self.rng
    }

    fn recombine(&mut self, parents: &[&ListGenotype<T>]) -> Result<Vec<ListGenotype<T>>> {
        let (first, second) = pair(parents)?;
        let common = first.len().min(second.len());
        let pivots: Vec<usize> = if common < 2 {
            Vec::new()
        } else {
            self.rng
                .sample_indices(common - 1, self.pivots)
                .into_iter()
                .map(|p| p + 1)
                .collect()
        };

        let (a, b) = cross_at(first, second, &pivots);
        Ok(vec![a, b])
    }
}

/// Builds two children by swapping the genes where `mask` is set.
pub(crate) fn cross_masked<T: Gene>(
    first: &ListGenotype<T>,
    second: &ListGenotype<T>,
    mask: &[bool],
) -> (ListGenotype<T>, ListGenotype<T>) {
    let mut a = first.genes().to_vec();
    let mut b = second.genes().to_vec();
    for (i, &swap) in mask.iter().enumerate().take(a.len().min(b.len())) {
        if swap {
            std::mem::swap(&mut a[i], &mut b[i]);
        }
    }
    (ListGenotype::new(a), ListGenotype::new(b))
}

/// Uniform crossover: every common gene is swapped with probability 1/2.
#[derive(Debug, Clone, Default)]
pub struct RandomMask {
    rng: RandomNumberGenerator,
}

impl RandomMask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }
}

impl<T: Gene> Recombination<ListGenotype<T>> for RandomMask {
    fn arity(&self) -> usize {
        2
    }

    fn rng(&mut self) -> &mut RandomNumberGenerator {
        &mut self.rng
    }

    fn recombine(&mut self, parents: &[&ListGenotype<T>]) -> Result<Vec<ListGenotype<T>>> {
        let (first, second) = pair(parents)?;
        let common = first.len().min(second.len());
        let mask: Vec<bool> = (0..common).map(|_| self.rng.chance(0.5)).collect();

        let (a, b) = cross_masked(first, second, &mask);
        Ok(vec![a, b])
    }
}

/// Partially mapped crossover of the segment `start..end`.
///
/// Each child receives the other parent's segment verbatim; the remaining
/// genes come from its own parent, following the segment's mapping whenever a
/// gene would otherwise appear twice.
pub(crate) fn pmx_between<T: Gene>(
    first: &ListGenotype<T>,
    second: &ListGenotype<T>,
    start: usize,
    end: usize,
) -> (ListGenotype<T>, ListGenotype<T>) {
    (
        pmx_child(first.genes(), second.genes(), start, end),
        pmx_child(second.genes(), first.genes(), start, end),
    )
}

fn pmx_child<T: Gene>(own: &[T], donor: &[T], start: usize, end: usize) -> ListGenotype<T> {
    let segment = &donor[start..end];
    let child = own
        .iter()
        .enumerate()
        .map(|(i, gene)| {
            if (start..end).contains(&i) {
                return donor[i].clone();
            }
            let mut gene = gene;
            // Bounded: parents that are not permutations of each other could cycle.
            for _ in 0..=segment.len() {
                match segment.iter().position(|g| g == gene) {
                    Some(offset) => gene = &own[start + offset],
                    None => break,
                }
            }
            gene.clone()
        })
        .collect();
    ListGenotype::new(child)
}

/// Partially mapped crossover (PMX), for permutation genotypes.
///
/// Both parents must have the same length and hold the same genes.
#[derive(Debug, Clone, Default)]
pub struct Pmx {
    rng: RandomNumberGenerator,
}

impl Pmx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }
}

impl<T: Gene> Recombination<ListGenotype<T>> for Pmx {
    fn arity(&self) -> usize {
        2
    }

    fn rng(&mut self) -> &mut RandomNumberGenerator {
        &mut self.rng
    }

    fn recombine(&mut self, parents: &[&ListGenotype<T>]) -> Result<Vec<ListGenotype<T>>> {
        let (first, second) = pair(parents)?;
        if first.len() != second.len() {
            return Err(GeneticError::Breeding(format!(
                "PMX needs parents of equal length, got {} and {}",
                first.len(),
                second.len()
            )));
        }
        if first.len() < 2 {
            return Ok(vec![first.clone(), second.clone()]);
        }

        let cuts = self.rng.sample_indices(first.len() + 1, 2);
        let (start, end) = (cuts[0].min(cuts[1]), cuts[0].max(cuts[1]));

        let (a, b) = pmx_between(first, second, start, end);
        Ok(vec![a, b])
    }
}
