//! Operators for binary genes.

use crate::error::{GeneticError, Result};
use crate::list::recombination::pair;
use crate::list::ListGenotype;
use crate::recombination::Recombination;
use crate::rng::RandomNumberGenerator;

/// Longest bit string the generalised crossover can read as a number.
const MAX_BITS: usize = 64;

fn to_number(bits: &[u8]) -> u64 {
    bits.iter()
        .fold(0, |number, &bit| (number << 1) | u64::from(bit != 0))
}

fn to_bits(number: u64, len: usize) -> Vec<u8> {
    (0..len)
        .rev()
        .map(|shift| ((number >> shift) & 1) as u8)
        .collect()
}

/// Generalised crossover for bit strings.
///
/// Both parents are read as unsigned numbers (most significant gene first,
/// any non-zero gene counts as 1). The first child is a number `g` drawn
/// between them, the second its mirror `a + b - g`, so the children always
/// sum to the parents. Only the common length is crossed, and it is limited
/// to 64 genes.
#[derive(Debug, Clone, Default)]
pub struct GeneralisedCrossover {
    rng: RandomNumberGenerator,
}

impl GeneralisedCrossover {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RandomNumberGenerator::from_seed(seed);
        self
    }
}

/// Crosses both parents, asking `draw(low, high)` for the first child.
fn cross_numbers<D>(
    first: &ListGenotype<u8>,
    second: &ListGenotype<u8>,
    draw: D,
) -> Result<(ListGenotype<u8>, ListGenotype<u8>)>
where
    D: FnOnce(u64, u64) -> u64,
{
    let common = first.len().min(second.len());
    if common > MAX_BITS {
        return Err(GeneticError::Breeding(format!(
            "Generalised crossover handles at most {} genes, got {}",
            MAX_BITS, common
        )));
    }

    let x = to_number(&first.genes()[..common]);
    let y = to_number(&second.genes()[..common]);
    let gene = draw(x.min(y), x.max(y));
    let mirror = (u128::from(x) + u128::from(y)).saturating_sub(u128::from(gene)) as u64;

    let mut a = to_bits(gene, common);
    a.extend_from_slice(&first.genes()[common..]);
    let mut b = to_bits(mirror, common);
    b.extend_from_slice(&second.genes()[common..]);
    Ok((ListGenotype::new(a), ListGenotype::new(b)))
}

impl Recombination<ListGenotype<u8>> for GeneralisedCrossover {
    fn arity(&self) -> usize {
        2
    }

    fn rng(&mut self) -> &mut RandomNumberGenerator {
        &mut self.rng
    }

    fn recombine(&mut self, parents: &[&ListGenotype<u8>]) -> Result<Vec<ListGenotype<u8>>> {
        let (first, second) = pair(parents)?;
        let rng = &mut self.rng;
        let (a, b) = cross_numbers(first, second, |low, high| rng.between(low, high))?;
        Ok(vec![a, b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(genes: &str) -> ListGenotype<u8> {
        genes.bytes().map(|b| b - b'0').collect()
    }

    #[test]
    fn test_numbers_round_trip_through_bits() {
        assert_eq!(to_number(&[0, 1, 1, 1]), 7);
        assert_eq!(to_bits(7, 4), vec![0, 1, 1, 1]);
        assert_eq!(to_bits(12, 4), vec![1, 1, 0, 0]);
        assert_eq!(to_number(&[2, 0]), 2);
        assert_eq!(to_number(&[1; 64]), u64::MAX);
    }

    #[test]
    fn test_generalised_crossover_table() {
        let cases = [
            (("1111", "0000"), 7, ("0111", "1000")),
            (("0000", "1111"), 7, ("0111", "1000")),
            (("0000", "0000"), 0, ("0000", "0000")),
            (("1111", "1111"), 15, ("1111", "1111")),
            (("1111", "0000"), 0, ("0000", "1111")),
            (("0111", "1000"), 3, ("0011", "1100")),
        ];

        for ((first, second), drawn, (expected_a, expected_b)) in cases {
            let (a, b) = cross_numbers(&bits(first), &bits(second), |_, _| drawn).unwrap();
            assert_eq!(a, bits(expected_a), "{} x {}", first, second);
            assert_eq!(b, bits(expected_b), "{} x {}", first, second);
        }
    }

    #[test]
    fn test_generalised_crossover_preserves_the_sum() {
        let mut crossover = GeneralisedCrossover::new().with_seed(6);
        let first = bits("10110010");
        let second = bits("01101111");
        let sum = to_number(first.genes()) + to_number(second.genes());

        for _ in 0..20 {
            let children = crossover.recombine(&[&first, &second]).unwrap();
            let a = to_number(children[0].genes());
            let b = to_number(children[1].genes());
            assert_eq!(a + b, sum);
            assert!((0b0110_1111..=0b1011_0010).contains(&a));
        }
    }

    #[test]
    fn test_generalised_crossover_keeps_tails() {
        let (a, b) = cross_numbers(&bits("10"), &bits("0111"), |low, _| low).unwrap();
        assert_eq!(a, bits("01"));
        assert_eq!(b, bits("1011"));
    }

    #[test]
    fn test_generalised_crossover_length_limit() {
        let long = ListGenotype::new(vec![1u8; 65]);
        let mut crossover = GeneralisedCrossover::new();
        match crossover.recombine(&[&long, &long]) {
            Err(GeneticError::Breeding(_)) => (),
            _ => panic!("Expected Breeding error"),
        }
    }
}
