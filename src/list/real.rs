//! Operators for real-valued genes.

use crate::error::{GeneticError, Result};
use crate::initializer::Initializer;
use crate::list::recombination::pair;
use crate::list::{Interval, ListGenotype};
use crate::recombination::Recombination;
use crate::rng::RandomNumberGenerator;

fn finite_interval(lower: f64, upper: f64) -> Result<Interval<f64>> {
    if !lower.is_finite() || !upper.is_finite() {
        return Err(GeneticError::InvalidNumericValue(format!(
            "Interval bounds must be finite, got {} and {}",
            lower, upper
        )));
    }
    Interval::new(lower, upper)
}

/// Creates genotypes of a fixed length with real genes drawn uniformly from
/// a closed interval.
#[derive(Debug, Clone)]
pub struct RealIntervalInitializer {
    interval: Interval<f64>,
    length: usize,
    rng: RandomNumberGenerator,
}

impl RealIntervalInitializer {
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if both bounds are equal,
    /// or a `GeneticError::InvalidNumericValue` error if either is not finite.
    pub fn new(lower: f64, upper: f64, length: usize) -> Result<Self> {
        Ok(Self {
            interval: finite_interval(lower, upper)?,
            length,
            rng: RandomNumberGenerator::new(),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }

    pub fn interval(&self) -> Interval<f64> {
        self.interval
    }
}

impl Initializer<ListGenotype<f64>> for RealIntervalInitializer {
    fn create(&mut self, count: usize) -> Result<Vec<ListGenotype<f64>>> {
        let (lower, upper) = (self.interval.lower(), self.interval.upper());
        Ok((0..count)
            .map(|_| {
                (0..self.length)
                    .map(|_| self.rng.between(lower, upper))
                    .collect()
            })
            .collect())
    }
}

/// Blends both parents gene by gene.
///
/// For genes `a` and `b`, `draw(low, high)` picks the first child's gene from
/// the parents' range widened by `alpha * |a - b|` on each side; the second
/// child takes the mirror `a + b - g`. Both are clamped into `bounds` when
/// given. Only the common length is blended.
fn blend<D>(
    first: &ListGenotype<f64>,
    second: &ListGenotype<f64>,
    alpha: f64,
    bounds: Option<Interval<f64>>,
    mut draw: D,
) -> Result<(ListGenotype<f64>, ListGenotype<f64>)>
where
    D: FnMut(f64, f64) -> f64,
{
    let mut a = first.genes().to_vec();
    let mut b = second.genes().to_vec();

    for i in 0..a.len().min(b.len()) {
        let (x, y) = (a[i], b[i]);
        let spread = alpha * (x - y).abs();
        let (low, high) = (x.min(y) - spread, x.max(y) + spread);
        if !low.is_finite() || !high.is_finite() {
            return Err(GeneticError::InvalidNumericValue(format!(
                "Cannot blend genes {} and {} at position {}",
                x, y, i
            )));
        }

        let gene = draw(low, high);
        let mirror = x + y - gene;
        match bounds {
            Some(interval) => {
                a[i] = interval.clamp(gene);
                b[i] = interval.clamp(mirror);
            }
            None => {
                a[i] = gene;
                b[i] = mirror;
            }
        }
    }

    Ok((ListGenotype::new(a), ListGenotype::new(b)))
}

/// Blend crossover (BLX-alpha) with the offspring kept inside an interval.
#[derive(Debug, Clone)]
pub struct FlexibleRecombination {
    interval: Interval<f64>,
    alpha: f64,
    rng: RandomNumberGenerator,
}

impl FlexibleRecombination {
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if both bounds are equal,
    /// or a `GeneticError::InvalidNumericValue` error if a bound is not finite
    /// or `alpha` is negative or not finite.
    pub fn new(lower: f64, upper: f64, alpha: f64) -> Result<Self> {
        let interval = finite_interval(lower, upper)?;
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(GeneticError::InvalidNumericValue(format!(
                "Blend alpha must be a non-negative number, got {}",
                alpha
            )));
        }
        Ok(Self {
            interval,
            alpha,
            rng: RandomNumberGenerator::new(),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }

    pub fn interval(&self) -> Interval<f64> {
        self.interval
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Recombination<ListGenotype<f64>> for FlexibleRecombination {
    fn arity(&self) -> usize {
        2
    }

    fn rng(&mut self) -> &mut RandomNumberGenerator {
        &mut self.rng
    }

    fn recombine(&mut self, parents: &[&ListGenotype<f64>]) -> Result<Vec<ListGenotype<f64>>> {
        let (first, second) = pair(parents)?;
        let rng = &mut self.rng;
        let (a, b) = blend(first, second, self.alpha, Some(self.interval), |low, high| {
            rng.between(low, high)
        })?;
        Ok(vec![a, b])
    }
}

/// Arithmetic crossover: each child gene lies between the parents' genes.
#[derive(Debug, Clone, Default)]
pub struct PlainRecombination {
    rng: RandomNumberGenerator,
}

impl PlainRecombination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }
}

impl Recombination<ListGenotype<f64>> for PlainRecombination {
    fn arity(&self) -> usize {
        2
    }

    fn rng(&mut self) -> &mut RandomNumberGenerator {
        &mut self.rng
    }

    fn recombine(&mut self, parents: &[&ListGenotype<f64>]) -> Result<Vec<ListGenotype<f64>>> {
        let (first, second) = pair(parents)?;
        let rng = &mut self.rng;
        let (a, b) = blend(first, second, 0.0, None, |low, high| rng.between(low, high))?;
        Ok(vec![a, b])
    }
}
