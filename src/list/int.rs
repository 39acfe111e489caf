//! Operators for integer genes.

use crate::error::Result;
use crate::initializer::Initializer;
use crate::list::recombination::pair;
use crate::list::{Interval, ListGenotype};
use crate::recombination::Recombination;
use crate::rng::RandomNumberGenerator;

/// Creates genotypes of a fixed length with integer genes drawn uniformly
/// from a closed interval.
#[derive(Debug, Clone)]
pub struct IntegerIntervalInitializer {
    interval: Interval<i64>,
    length: usize,
    rng: RandomNumberGenerator,
}

impl IntegerIntervalInitializer {
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if both bounds are equal.
    pub fn new(lower: i64, upper: i64, length: usize) -> Result<Self> {
        Ok(Self {
            interval: Interval::new(lower, upper)?,
            length,
            rng: RandomNumberGenerator::new(),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }

    pub fn interval(&self) -> Interval<i64> {
        self.interval
    }
}

impl Initializer<ListGenotype<i64>> for IntegerIntervalInitializer {
    fn create(&mut self, count: usize) -> Result<Vec<ListGenotype<i64>>> {
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

/// Gene by gene crossover over the range spanned by both parents.
///
/// For genes `a` and `b` the first child takes a value `g` drawn from the
/// parents' range widened by `|a - b|` on each side (by the whole interval
/// when `a == b`); the second child takes its mirror `a + b - g`. Both are
/// clamped into the interval. Only the common length is crossed.
#[derive(Debug, Clone)]
pub struct RangeCrossover {
    interval: Interval<i64>,
    rng: RandomNumberGenerator,
}

impl RangeCrossover {
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if both bounds are equal.
    pub fn new(lower: i64, upper: i64) -> Result<Self> {
        Ok(Self {
            interval: Interval::new(lower, upper)?,
            rng: RandomNumberGenerator::new(),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }

    pub fn interval(&self) -> Interval<i64> {
        self.interval
    }
}

/// Crosses both parents, asking `draw(low, high)` for each first-child gene.
fn cross_ranges<D>(
    interval: Interval<i64>,
    first: &ListGenotype<i64>,
    second: &ListGenotype<i64>,
    mut draw: D,
) -> (ListGenotype<i64>, ListGenotype<i64>)
where
    D: FnMut(i64, i64) -> i64,
{
    let mut a = first.genes().to_vec();
    let mut b = second.genes().to_vec();
    let width = interval.upper().saturating_sub(interval.lower());

    for i in 0..a.len().min(b.len()) {
        let (x, y) = (a[i], b[i]);
        let diff = if x != y {
            x.saturating_sub(y).saturating_abs()
        } else {
            width
        };
        let gene = draw(x.min(y).saturating_sub(diff), x.max(y).saturating_add(diff));
        a[i] = interval.clamp(gene);
        b[i] = interval.clamp(x.saturating_add(y).saturating_sub(gene));
    }

    (ListGenotype::new(a), ListGenotype::new(b))
}

impl Recombination<ListGenotype<i64>> for RangeCrossover {
    fn arity(&self) -> usize {
        2
    }

    fn rng(&mut self) -> &mut RandomNumberGenerator {
        &mut self.rng
    }

    fn recombine(&mut self, parents: &[&ListGenotype<i64>]) -> Result<Vec<ListGenotype<i64>>> {
        let (first, second) = pair(parents)?;
        let rng = &mut self.rng;
        let (a, b) = cross_ranges(self.interval, first, second, |low, high| {
            rng.between(low, high)
        });
        Ok(vec![a, b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeneticError;

    fn digits(genes: &str) -> ListGenotype<i64> {
        genes
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(i64::from)
            .collect()
    }

    #[test]
    fn test_interval_initializer_bounds() {
        let mut initializer = IntegerIntervalInitializer::new(1, -1, 100).unwrap().with_seed(3);
        assert_eq!(initializer.interval().lower(), -1);
        assert_eq!(initializer.interval().upper(), 1);

        let genotypes = initializer.create(5).unwrap();
        assert_eq!(genotypes.len(), 5);
        for genotype in &genotypes {
            assert_eq!(genotype.len(), 100);
            assert!(genotype.iter().all(|&g| (-1..=1).contains(&g)));
        }
        // Both bounds are reachable.
        assert!(genotypes.iter().any(|g| g.iter().any(|&v| v == -1)));
        assert!(genotypes.iter().any(|g| g.iter().any(|&v| v == 1)));
    }

    #[test]
    fn test_interval_initializer_equal_bounds() {
        match IntegerIntervalInitializer::new(10, 10, 4) {
            Err(GeneticError::Configuration(_)) => (),
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_range_crossover_bounds() {
        let crossover = RangeCrossover::new(10, 1).unwrap();
        assert_eq!(crossover.interval().lower(), 1);
        assert_eq!(crossover.interval().upper(), 10);
        assert!(RangeCrossover::new(0, 0).is_err());
    }

    #[test]
    fn test_range_crossover_table() {
        let cases = [
            (("0000", "0000"), vec![7], ("7777", "0000")),
            (("0000", "9999"), vec![7], ("7777", "2222")),
            (("9999", "0000"), vec![0], ("0000", "9999")),
            (("9999", "9999"), vec![15], ("9999", "3333")),
            (("4534", "6543"), vec![4, 9, 4, 4], ("4944", "6133")),
            (("4534", "6543"), vec![5, 9, 4, 4], ("5944", "5133")),
            (("4534", "6543"), vec![6, 9, 4, 4], ("6944", "4133")),
            (("6543", "4534"), vec![4, 9, 4, 4], ("4944", "6133")),
            (("6543", "4534"), vec![5, 9, 4, 4], ("5944", "5133")),
            (("6543", "4534"), vec![6, 9, 4, 4], ("6944", "4133")),
        ];
        let interval = Interval::new(0, 9).unwrap();

        for ((first, second), draws, (expected_a, expected_b)) in cases {
            // A single draw is repeated for every gene.
            let mut draws = draws.iter().cycle();
            let (a, b) = cross_ranges(interval, &digits(first), &digits(second), |_, _| {
                draws.next().copied().unwrap_or_default()
            });
            assert_eq!(a, digits(expected_a), "{} x {}", first, second);
            assert_eq!(b, digits(expected_b), "{} x {}", first, second);
        }
    }

    #[test]
    fn test_range_crossover_draw_range() {
        let interval = Interval::new(0, 20).unwrap();
        let mut ranges = Vec::new();
        cross_ranges(interval, &digits("27"), &digits("52"), |low, high| {
            ranges.push((low, high));
            low
        });
        assert_eq!(ranges, vec![(-1, 8), (-3, 12)]);

        ranges.clear();
        cross_ranges(interval, &digits("4"), &digits("4"), |low, high| {
            ranges.push((low, high));
            low
        });
        assert_eq!(ranges, vec![(-16, 24)]);
    }

    #[test]
    fn test_range_crossover_stays_in_interval() {
        let mut crossover = RangeCrossover::new(0, 9).unwrap().with_seed(12);
        let first = digits("0192837465");
        let second = digits("9081726354");

        for _ in 0..20 {
            let children = crossover.recombine(&[&first, &second]).unwrap();
            assert_eq!(children.len(), 2);
            for child in &children {
                assert_eq!(child.len(), 10);
                assert!(child.iter().all(|&g| (0..=9).contains(&g)));
            }
        }
    }

    #[test]
    fn test_range_crossover_keeps_longer_tail() {
        let mut crossover = RangeCrossover::new(0, 9).unwrap().with_seed(1);
        let children = crossover
            .recombine(&[&digits("12"), &digits("3456")])
            .unwrap();
        assert_eq!(children[0].len(), 2);
        assert_eq!(&children[1].genes()[2..], &[5, 6]);
    }
}
