use crate::{
    callback::{Callback, CallbackDispatcher},
    error::{GeneticError, Result},
    fitness::Fitness,
    genotype::Genotype,
    history::Statistic,
    initializer::Initializer,
    mutation::{Mutation, NoMutation},
    recombination::{NoRecombination, Recombination},
    replacement::ReplacementSchema,
    selection::SelectionSchema,
    stop::StopCondition,
};

use super::algorithm::{GeneticAlgorithm, Parts};
use super::options::EvolutionOptions;

/// Fluent builder for [`GeneticAlgorithm`].
///
/// The initializer, fitness, selection, replacement and stop condition are
/// required. Recombination defaults to [`NoRecombination`] and mutation to
/// [`NoMutation`]. A supplied recombination operator is applied with
/// probability 1 unless told otherwise; without one, the probability defaults
/// to 0 so parents pass through untouched. The mutation probability defaults
/// to 0.
///
/// # Example
///
/// ```rust
/// use genloop::evolution::GeneticAlgorithm;
/// use genloop::list::{Alphabet, AlphabetInitializer, ListGenotype, NPivot, RandomGene};
/// use genloop::replacement::LowElitism;
/// use genloop::selection::Tournament;
/// use genloop::stop::NumSteps;
///
/// let alphabet = Alphabet::binary();
/// let mut ga: GeneticAlgorithm<ListGenotype<u8>> = GeneticAlgorithm::builder()
///     .with_population_size(20)
///     .with_initializer(AlphabetInitializer::new(alphabet.clone(), 16).with_seed(1))
///     .with_fitness(|genes: &Vec<u8>| genes.iter().map(|&g| g as f64).sum::<f64>())
///     .with_selection(Tournament::new(3).unwrap().with_seed(2))
///     .with_recombination(NPivot::new(1).unwrap().with_seed(3))
///     .with_mutation(RandomGene::new(alphabet).with_seed(4))
///     .with_mutation_probability(0.05)
///     .with_replacement(LowElitism)
///     .with_replacement_ratio(0.5)
///     .with_stop_condition(NumSteps(10))
///     .build()
///     .unwrap();
///
/// let history = ga.run().unwrap();
/// assert_eq!(history.len(), 10);
/// ```
pub struct GeneticAlgorithmBuilder<G: Genotype> {
    population_size: Option<usize>,
    recombination_probability: Option<f64>,
    mutation_probability: Option<f64>,
    replacement_ratio: Option<f64>,
    parallel_threshold: Option<usize>,
    initializer: Option<Box<dyn Initializer<G>>>,
    fitness: Option<Box<dyn Fitness<G>>>,
    selection: Option<Box<dyn SelectionSchema<G>>>,
    recombination: Option<Box<dyn Recombination<G>>>,
    mutation: Option<Box<dyn Mutation<G>>>,
    replacement: Option<Box<dyn ReplacementSchema<G>>>,
    stop_condition: Option<Box<dyn StopCondition<G>>>,
    callbacks: Vec<Box<dyn Callback<G>>>,
    statistics: Vec<Box<dyn Statistic<G>>>,
}

impl<G: Genotype> GeneticAlgorithmBuilder<G> {
    pub fn new() -> Self {
        Self {
            population_size: None,
            recombination_probability: None,
            mutation_probability: None,
            replacement_ratio: None,
            parallel_threshold: None,
            initializer: None,
            fitness: None,
            selection: None,
            recombination: None,
            mutation: None,
            replacement: None,
            stop_condition: None,
            callbacks: Vec::new(),
            statistics: Vec::new(),
        }
    }

    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = Some(population_size);
        self
    }

    pub fn with_initializer<I: Initializer<G> + 'static>(mut self, initializer: I) -> Self {
        self.initializer = Some(Box::new(initializer));
        self
    }

    pub fn with_fitness<F: Fitness<G> + 'static>(mut self, fitness: F) -> Self {
        self.fitness = Some(Box::new(fitness));
        self
    }

    pub fn with_selection<S: SelectionSchema<G> + 'static>(mut self, selection: S) -> Self {
        self.selection = Some(Box::new(selection));
        self
    }

    pub fn with_recombination<R: Recombination<G> + 'static>(mut self, recombination: R) -> Self {
        self.recombination = Some(Box::new(recombination));
        self
    }

    pub fn with_recombination_probability(mut self, probability: f64) -> Self {
        self.recombination_probability = Some(probability);
        self
    }

    pub fn with_mutation<M: Mutation<G> + 'static>(mut self, mutation: M) -> Self {
        self.mutation = Some(Box::new(mutation));
        self
    }

    pub fn with_mutation_probability(mut self, probability: f64) -> Self {
        self.mutation_probability = Some(probability);
        self
    }

    pub fn with_replacement<R: ReplacementSchema<G> + 'static>(mut self, replacement: R) -> Self {
        self.replacement = Some(Box::new(replacement));
        self
    }

    pub fn with_replacement_ratio(mut self, ratio: f64) -> Self {
        self.replacement_ratio = Some(ratio);
        self
    }

    pub fn with_stop_condition<S: StopCondition<G> + 'static>(mut self, stop_condition: S) -> Self {
        self.stop_condition = Some(Box::new(stop_condition));
        self
    }

    pub fn with_callback<C: Callback<G> + 'static>(mut self, callback: C) -> Self {
        self.callbacks.push(Box::new(callback));
        self
    }

    pub fn with_statistic<S: Statistic<G> + 'static>(mut self, statistic: S) -> Self {
        self.statistics.push(Box::new(statistic));
        self
    }

    /// Sets the minimum number of pending evaluations processed in parallel.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = Some(threshold);
        self
    }

    pub fn build(self) -> Result<GeneticAlgorithm<G>> {
        let initializer = self
            .initializer
            .ok_or_else(|| GeneticError::Configuration("Initializer not specified".to_string()))?;

        let fitness = self.fitness.ok_or_else(|| {
            GeneticError::Configuration("Fitness function not specified".to_string())
        })?;

        let selection = self.selection.ok_or_else(|| {
            GeneticError::Configuration("Selection schema not specified".to_string())
        })?;

        let replacement = self.replacement.ok_or_else(|| {
            GeneticError::Configuration("Replacement schema not specified".to_string())
        })?;

        let stop_condition = self.stop_condition.ok_or_else(|| {
            GeneticError::Configuration("Stop condition not specified".to_string())
        })?;

        let default_recombination_probability = if self.recombination.is_some() {
            1.0
        } else {
            0.0
        };
        let recombination = self
            .recombination
            .unwrap_or_else(|| Box::new(NoRecombination::new()));
        let mutation = self.mutation.unwrap_or_else(|| Box::new(NoMutation));

        let defaults = EvolutionOptions::default();
        let mut options = EvolutionOptions::new(
            self.population_size.unwrap_or(defaults.population_size()),
            self.recombination_probability
                .unwrap_or(default_recombination_probability),
            self.mutation_probability
                .unwrap_or(defaults.mutation_probability()),
            self.replacement_ratio
                .unwrap_or(defaults.replacement_ratio()),
        )?;
        options.set_parallel_threshold(
            self.parallel_threshold
                .unwrap_or(defaults.parallel_threshold()),
        );

        GeneticAlgorithm::from_parts(Parts {
            options,
            initializer,
            fitness,
            selection,
            recombination,
            mutation,
            replacement,
            stop_condition,
            callbacks: CallbackDispatcher::new(self.callbacks),
            statistics: self.statistics,
        })
    }
}

impl<G: Genotype> Default for GeneticAlgorithmBuilder<G> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::tests::Tag;
    use crate::replacement::Generational;
    use crate::selection::MonteCarlo;
    use crate::stop::NumSteps;

    fn complete() -> GeneticAlgorithmBuilder<Tag> {
        GeneticAlgorithmBuilder::new()
            .with_population_size(4)
            .with_initializer(|count: usize| (0..count).map(Tag).collect::<Vec<_>>())
            .with_fitness(|value: &usize| *value as f64)
            .with_selection(MonteCarlo::new())
            .with_replacement(Generational)
            .with_stop_condition(NumSteps(1))
    }

    #[test]
    fn test_defaults() {
        let ga = complete().build().unwrap();
        assert_eq!(ga.options().population_size(), 4);
        assert_eq!(ga.selection_size(), 1);
        assert_eq!(ga.offspring_size(), 4);
        assert_eq!(ga.options().recombination_probability(), 0.0);
        assert_eq!(ga.options().mutation_probability(), 0.0);
        assert_eq!(ga.options().parallel_threshold(), 1000);
    }

    #[test]
    fn test_missing_parts() {
        let missing_fitness = GeneticAlgorithmBuilder::<Tag>::new()
            .with_initializer(|count: usize| (0..count).map(Tag).collect::<Vec<_>>())
            .with_selection(MonteCarlo::new())
            .with_replacement(Generational)
            .with_stop_condition(NumSteps(1))
            .build();
        match missing_fitness {
            Err(GeneticError::Configuration(message)) => assert!(message.contains("Fitness")),
            _ => panic!("Expected Configuration error"),
        }

        let missing_stop = GeneticAlgorithmBuilder::<Tag>::new()
            .with_initializer(|count: usize| (0..count).map(Tag).collect::<Vec<_>>())
            .with_fitness(|value: &usize| *value as f64)
            .with_selection(MonteCarlo::new())
            .with_replacement(Generational)
            .build();
        assert!(missing_stop.is_err());
    }

    #[test]
    fn test_invalid_options() {
        match complete().with_population_size(0).build() {
            Err(GeneticError::Configuration(_)) => (),
            _ => panic!("Expected Configuration error"),
        }
        assert!(complete().with_mutation_probability(f64::NAN).build().is_err());
    }
}
