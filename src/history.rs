//! # History
//!
//! The history is the append-only record of a run: one [`HistoryEntry`] per
//! completed generation, holding the best individual and any number of named
//! statistics. Entries never change after they are appended. A run that fails
//! keeps the entries of every generation completed before the failure.
//!
//! Named statistics are pluggable through the [`Statistic`] trait and are
//! registered with
//! [`GeneticAlgorithm::add_statistic`](crate::evolution::GeneticAlgorithm::add_statistic).

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::Result;
use crate::genotype::{Genotype, Individual, IndividualId};
use crate::population::Population;

/// A named scalar computed from an evaluated population.
pub trait Statistic<G: Genotype>: Send + Sync {
    fn name(&self) -> &str;

    fn compute(&self, population: &Population<G>) -> Result<f64>;
}

/// Arithmetic mean of the population's fitness.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanFitness;

impl<G: Genotype> Statistic<G> for MeanFitness {
    fn name(&self) -> &str {
        "mean_fitness"
    }

    fn compute(&self, population: &Population<G>) -> Result<f64> {
        let fitness = population.fitness()?;
        Ok(mean(&fitness))
    }
}

/// Lowest fitness in the population.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorstFitness;

impl<G: Genotype> Statistic<G> for WorstFitness {
    fn name(&self) -> &str {
        "worst_fitness"
    }

    fn compute(&self, population: &Population<G>) -> Result<f64> {
        population.worst()?.fitness()
    }
}

/// Population standard deviation of the fitness.
#[derive(Debug, Clone, Copy, Default)]
pub struct FitnessStdDev;

impl<G: Genotype> Statistic<G> for FitnessStdDev {
    fn name(&self) -> &str {
        "fitness_std_dev"
    }

    fn compute(&self, population: &Population<G>) -> Result<f64> {
        let fitness = population.fitness()?;
        let mean = mean(&fitness);
        let variance = fitness.iter().map(|f| (f - mean).powi(2)).sum::<f64>()
            / fitness.len().max(1) as f64;
        Ok(variance.sqrt())
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Snapshot of one completed generation.
#[derive(Debug, Clone)]
pub struct HistoryEntry<G: Genotype> {
    generation: usize,
    best: Arc<Individual<G>>,
    best_fitness: f64,
    statistics: BTreeMap<String, f64>,
}

impl<G: Genotype> HistoryEntry<G> {
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The fittest individual of the generation. Its lineage stays reachable.
    pub fn best(&self) -> &Arc<Individual<G>> {
        &self.best
    }

    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    pub fn statistics(&self) -> &BTreeMap<String, f64> {
        &self.statistics
    }

    pub fn statistic(&self, name: &str) -> Option<f64> {
        self.statistics.get(name).copied()
    }

    /// Plain-data view of the entry, detached from the genotype type.
    pub fn summary(&self) -> GenerationSummary {
        GenerationSummary {
            generation: self.generation,
            best_id: self.best.id(),
            best_fitness: self.best_fitness,
            statistics: self.statistics.clone(),
        }
    }
}

/// Serialisable summary of a [`HistoryEntry`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSummary {
    pub generation: usize,
    pub best_id: IndividualId,
    pub best_fitness: f64,
    pub statistics: BTreeMap<String, f64>,
}

/// Ordered, append-only list of generation snapshots.
#[derive(Debug, Clone)]
pub struct History<G: Genotype> {
    entries: Vec<HistoryEntry<G>>,
}

impl<G: Genotype> History<G> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[HistoryEntry<G>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntry<G>> {
        self.entries.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry<G>> {
        self.entries.iter()
    }

    /// Summaries of all entries, in order.
    pub fn summaries(&self) -> Vec<GenerationSummary> {
        self.entries.iter().map(HistoryEntry::summary).collect()
    }

    /// Appends a snapshot of an evaluated population.
    ///
    /// Nothing is appended if the best individual or any statistic fails.
    pub(crate) fn record(
        &mut self,
        population: &Population<G>,
        statistics: &[Box<dyn Statistic<G>>],
    ) -> Result<&HistoryEntry<G>> {
        let best = population.best()?.clone();
        let best_fitness = best.fitness()?;
        let statistics = statistics
            .iter()
            .map(|s| Ok((s.name().to_string(), s.compute(population)?)))
            .collect::<Result<BTreeMap<_, _>>>()?;

        self.entries.push(HistoryEntry {
            generation: population.generation(),
            best,
            best_fitness,
            statistics,
        });
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<G: Genotype> Default for History<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, G: Genotype> IntoIterator for &'a History<G> {
    type Item = &'a HistoryEntry<G>;
    type IntoIter = std::slice::Iter<'a, HistoryEntry<G>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::tests::{population_with_fitness, Tag};

    fn statistics() -> Vec<Box<dyn Statistic<Tag>>> {
        vec![
            Box::new(MeanFitness),
            Box::new(WorstFitness),
            Box::new(FitnessStdDev),
        ]
    }

    #[test]
    fn test_record_snapshot() {
        let population = population_with_fitness(&[2.0, 4.0, 4.0, 6.0], 0);
        let mut history = History::new();

        let entry = history.record(&population, &statistics()).unwrap();
        assert_eq!(entry.generation(), 0);
        assert_eq!(entry.best().genotype(), &Tag(3));
        assert_eq!(entry.best_fitness(), 6.0);
        assert_eq!(entry.statistic("mean_fitness"), Some(4.0));
        assert_eq!(entry.statistic("worst_fitness"), Some(2.0));
        assert!((entry.statistic("fitness_std_dev").unwrap() - 2.0f64.sqrt()).abs() < 1e-12);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_failed_record_appends_nothing() {
        let population = Population::new(vec![Arc::new(Individual::new(Tag(0)))]);
        let mut history: History<Tag> = History::new();

        assert!(history.record(&population, &statistics()).is_err());
        assert!(history.is_empty());
    }

    #[test]
    fn test_summary() {
        let population = population_with_fitness(&[1.0, 3.0], 0);
        let mut history = History::new();
        let best_id = population.best().unwrap().id();

        history.record(&population, &[]).unwrap();
        let summary = history.last().unwrap().summary();
        assert_eq!(summary.best_id, best_id);
        assert_eq!(summary.best_fitness, 3.0);
        assert!(summary.statistics.is_empty());
        assert_eq!(history.summaries(), vec![summary]);
    }
}
