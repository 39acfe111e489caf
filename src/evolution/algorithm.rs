//! # GeneticAlgorithm
//!
//! The controller that owns the population and every operator, and drives the
//! generational loop.
//!
//! A controller moves through four states:
//!
//! ```text
//! Created --initialize()--> Initialized --run()--> Running --stop--> Stopped
//!    ^                                                                  |
//!    +----------------------------- run() ------------------------------+
//! ```
//!
//! Each generation runs the same fixed sequence: `on_step_begins`, parent
//! selection and recombination until the offspring pool is full, mutation,
//! evaluation of the offspring lacking a fitness, replacement, a new history
//! entry, `on_step_ends`, and finally the stop check. The stop condition is
//! only consulted after a complete generation, so every run performs at least
//! one.
//!
//! All configuration goes through setters. Each setter validates its input,
//! leaves the configuration untouched on failure, and recomputes every derived
//! value before it returns. Setters may be called between runs or from a
//! callback during a run; changes take effect at the next phase that reads
//! them.

use std::sync::Arc;

use tracing::{debug, error, info, trace};

use super::builder::GeneticAlgorithmBuilder;
use super::options::EvolutionOptions;
use crate::callback::{Callback, CallbackDispatcher, Hook};
use crate::error::{GeneticError, Result};
use crate::fitness::{evaluate_batch, Fitness};
use crate::genotype::{Genotype, Individual};
use crate::history::{History, Statistic};
use crate::initializer::Initializer;
use crate::mutation::Mutation;
use crate::population::Population;
use crate::recombination::Recombination;
use crate::replacement::ReplacementSchema;
use crate::selection::SelectionSchema;
use crate::stop::StopCondition;

/// Consecutive parent groups that may yield no offspring before breeding gives up.
pub const MAX_BARREN_ROUNDS: usize = 1000;

/// Lifecycle state of a [`GeneticAlgorithm`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Configured, no population yet.
    Created,
    /// Initial population generated and evaluated.
    Initialized,
    /// The generational loop is active.
    Running,
    /// The last run ended, normally or with an error.
    Stopped,
}

pub struct GeneticAlgorithm<G: Genotype> {
    options: EvolutionOptions,
    initializer: Box<dyn Initializer<G>>,
    fitness: Box<dyn Fitness<G>>,
    selection: Box<dyn SelectionSchema<G>>,
    recombination: Box<dyn Recombination<G>>,
    mutation: Box<dyn Mutation<G>>,
    replacement: Box<dyn ReplacementSchema<G>>,
    stop_condition: Box<dyn StopCondition<G>>,
    callbacks: CallbackDispatcher<G>,
    statistics: Vec<Box<dyn Statistic<G>>>,
    population: Population<G>,
    history: History<G>,
    state: RunState,
    stop_requested: bool,
    evaluations: usize,
}

/// Operators a controller is assembled from.
pub(crate) struct Parts<G: Genotype> {
    pub options: EvolutionOptions,
    pub initializer: Box<dyn Initializer<G>>,
    pub fitness: Box<dyn Fitness<G>>,
    pub selection: Box<dyn SelectionSchema<G>>,
    pub recombination: Box<dyn Recombination<G>>,
    pub mutation: Box<dyn Mutation<G>>,
    pub replacement: Box<dyn ReplacementSchema<G>>,
    pub stop_condition: Box<dyn StopCondition<G>>,
    pub callbacks: CallbackDispatcher<G>,
    pub statistics: Vec<Box<dyn Statistic<G>>>,
}

/// Without replacement, a selection larger than the population can never succeed.
fn check_selection_fits(replacement: bool, selection_size: usize, population_size: usize) -> Result<()> {
    if !replacement && selection_size > population_size {
        return Err(GeneticError::Configuration(format!(
            "Selecting {} parents without replacement needs a population of at least {}, got {}",
            selection_size, selection_size, population_size
        )));
    }
    Ok(())
}

impl<G: Genotype> GeneticAlgorithm<G> {
    /// Returns a builder for assembling a controller.
    pub fn builder() -> GeneticAlgorithmBuilder<G> {
        GeneticAlgorithmBuilder::new()
    }

    pub(crate) fn from_parts(mut parts: Parts<G>) -> Result<Self> {
        parts.options.set_arity(parts.recombination.arity())?;
        check_selection_fits(
            parts.selection.replacement(),
            parts.options.selection_size(),
            parts.options.population_size(),
        )?;

        Ok(Self {
            options: parts.options,
            initializer: parts.initializer,
            fitness: parts.fitness,
            selection: parts.selection,
            recombination: parts.recombination,
            mutation: parts.mutation,
            replacement: parts.replacement,
            stop_condition: parts.stop_condition,
            callbacks: parts.callbacks,
            statistics: parts.statistics,
            population: Population::empty(),
            history: History::new(),
            state: RunState::Created,
            stop_requested: false,
            evaluations: 0,
        })
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn population(&self) -> &Population<G> {
        &self.population
    }

    pub fn history(&self) -> &History<G> {
        &self.history
    }

    /// Generation index of the current population.
    pub fn generation(&self) -> usize {
        self.population.generation()
    }

    /// Fitness evaluations performed since the population was last created.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn selection_size(&self) -> usize {
        self.options.selection_size()
    }

    pub fn offspring_size(&self) -> usize {
        self.options.offspring_size()
    }

    pub fn selection(&self) -> &dyn SelectionSchema<G> {
        self.selection.as_ref()
    }

    pub fn recombination(&self) -> &dyn Recombination<G> {
        self.recombination.as_ref()
    }

    pub fn mutation(&self) -> &dyn Mutation<G> {
        self.mutation.as_ref()
    }

    pub fn replacement(&self) -> &dyn ReplacementSchema<G> {
        self.replacement.as_ref()
    }

    /// Whether a stop was requested since the current run began.
    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    /// The fittest member of the current population.
    ///
    /// # Errors
    ///
    /// Fails with [`GeneticError::EmptyPopulation`] before initialization.
    pub fn best(&self) -> Result<&Arc<Individual<G>>> {
        self.population.best()
    }

    pub fn best_fitness(&self) -> Result<f64> {
        self.best()?.fitness()
    }

    /// Requests the current run to end after the generation in progress.
    pub fn stop(&mut self) {
        if self.state == RunState::Running {
            debug!(generation = self.generation(), "stop requested");
        }
        self.stop_requested = true;
    }

    /// Changes the population size.
    ///
    /// While `Initialized`, the existing population is discarded and the state
    /// returns to `Created`. While `Running`, the new size applies from the
    /// next replacement on.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if the size is zero, or if
    /// the selection works without replacement and needs more parents than
    /// the new size provides.
    pub fn set_population_size(&mut self, population_size: usize) -> Result<()> {
        check_selection_fits(
            self.selection.replacement(),
            self.options.selection_size(),
            population_size,
        )?;
        self.options.set_population_size(population_size)?;
        if self.state == RunState::Initialized {
            self.reset();
        }
        debug!(
            population_size,
            offspring_size = self.options.offspring_size(),
            "population size changed"
        );
        Ok(())
    }

    /// Replaces the initializer. An initialized population is discarded.
    pub fn set_initializer<I>(&mut self, initializer: I)
    where
        I: Initializer<G> + 'static,
    {
        self.initializer = Box::new(initializer);
        if self.state == RunState::Initialized {
            self.reset();
        }
        debug!(state = ?self.state, "initializer changed");
    }

    /// Replaces the fitness function and re-evaluates the current population
    /// with it, so every fitness read afterwards reflects the new function.
    ///
    /// Individuals shared with the history or with lineage keep the value
    /// they were recorded with.
    ///
    /// # Errors
    ///
    /// Returns the evaluation error if the new function fails on a member. The
    /// previous function and population are kept in that case.
    pub fn set_fitness<F>(&mut self, fitness: F) -> Result<()>
    where
        F: Fitness<G> + 'static,
    {
        let fitness: Box<dyn Fitness<G>> = Box::new(fitness);
        let mut population = self.population.clone();
        population.invalidate_fitness();
        let evaluated = evaluate_batch(
            fitness.as_ref(),
            population.individuals_mut(),
            self.options.parallel_threshold(),
        )?;

        self.fitness = fitness;
        self.population = population;
        self.evaluations += evaluated;
        debug!(evaluated, "fitness function changed, population re-evaluated");
        Ok(())
    }

    /// Replaces the selection schema.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if the schema works
    /// without replacement and the population is too small for one group.
    pub fn set_selection<S>(&mut self, selection: S) -> Result<()>
    where
        S: SelectionSchema<G> + 'static,
    {
        check_selection_fits(
            selection.replacement(),
            self.options.selection_size(),
            self.options.population_size(),
        )?;
        self.selection = Box::new(selection);
        debug!(selection = ?self.selection, "selection changed");
        Ok(())
    }

    /// Switches the current selection schema between selection with and
    /// without replacement.
    pub fn set_selection_replacement(&mut self, replacement: bool) -> Result<()> {
        check_selection_fits(
            replacement,
            self.options.selection_size(),
            self.options.population_size(),
        )?;
        self.selection.set_replacement(replacement);
        Ok(())
    }

    /// Replaces the recombination operator and derives the selection size
    /// from its arity.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if the arity is zero, or
    /// if the selection works without replacement and the population is
    /// smaller than the arity.
    pub fn set_recombination<R>(&mut self, recombination: R) -> Result<()>
    where
        R: Recombination<G> + 'static,
    {
        let arity = recombination.arity();
        check_selection_fits(
            self.selection.replacement(),
            arity,
            self.options.population_size(),
        )?;
        self.options.set_arity(arity)?;
        self.recombination = Box::new(recombination);
        debug!(
            arity,
            selection_size = self.options.selection_size(),
            "recombination changed"
        );
        Ok(())
    }

    /// Sets the recombination probability, clamped into `[0, 1]`.
    pub fn set_recombination_probability(&mut self, probability: f64) -> Result<()> {
        self.options.set_recombination_probability(probability)
    }

    pub fn set_mutation<M>(&mut self, mutation: M)
    where
        M: Mutation<G> + 'static,
    {
        self.mutation = Box::new(mutation);
        debug!(mutation = ?self.mutation, "mutation changed");
    }

    /// Sets the mutation probability, clamped into `[0, 1]`.
    pub fn set_mutation_probability(&mut self, probability: f64) -> Result<()> {
        self.options.set_mutation_probability(probability)
    }

    pub fn set_replacement<R>(&mut self, replacement: R)
    where
        R: ReplacementSchema<G> + 'static,
    {
        self.replacement = Box::new(replacement);
        debug!(replacement = ?self.replacement, "replacement changed");
    }

    /// Sets the replacement ratio and derives the offspring size from it.
    pub fn set_replacement_ratio(&mut self, ratio: f64) -> Result<()> {
        self.options.set_replacement_ratio(ratio)?;
        debug!(
            ratio,
            offspring_size = self.options.offspring_size(),
            "replacement ratio changed"
        );
        Ok(())
    }

    pub fn set_stop_condition<S>(&mut self, stop_condition: S)
    where
        S: StopCondition<G> + 'static,
    {
        self.stop_condition = Box::new(stop_condition);
        debug!(generation = self.generation(), "stop condition changed");
    }

    /// Replaces the registered callbacks.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error while a run is active;
    /// callback membership is fixed for the duration of a run.
    pub fn set_callbacks(&mut self, callbacks: Vec<Box<dyn Callback<G>>>) -> Result<()> {
        self.ensure_idle("callbacks")?;
        self.callbacks = CallbackDispatcher::new(callbacks);
        Ok(())
    }

    /// Appends a callback, notified after the ones already registered.
    pub fn add_callback<C>(&mut self, callback: C) -> Result<()>
    where
        C: Callback<G> + 'static,
    {
        self.ensure_idle("callbacks")?;
        self.callbacks.push(Box::new(callback));
        Ok(())
    }

    /// Registers a named statistic recorded with every history entry.
    pub fn add_statistic<S>(&mut self, statistic: S)
    where
        S: Statistic<G> + 'static,
    {
        self.statistics.push(Box::new(statistic));
    }

    /// Sets the minimum number of pending evaluations processed in parallel.
    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.options.set_parallel_threshold(threshold);
    }

    /// Generates and evaluates the initial population.
    ///
    /// Any previous population, history and evaluation count are discarded.
    ///
    /// # Errors
    ///
    /// Fails while a run is active, if the initializer does not deliver
    /// exactly `population_size` genotypes, or if evaluating them fails. On
    /// failure the state is `Created`.
    pub fn initialize(&mut self) -> Result<()> {
        self.ensure_idle("the population")?;
        self.reset();

        let population_size = self.options.population_size();
        let genotypes = self.initializer.create(population_size)?;
        if genotypes.len() != population_size {
            return Err(GeneticError::SizeMismatch {
                stage: "initialization",
                expected: population_size,
                actual: genotypes.len(),
            });
        }

        let mut individuals: Vec<_> = genotypes
            .into_iter()
            .map(|genotype| Arc::new(Individual::new(genotype)))
            .collect();
        let evaluated = evaluate_batch(
            self.fitness.as_ref(),
            &mut individuals,
            self.options.parallel_threshold(),
        )?;

        self.evaluations = evaluated;
        self.population = Population::new(individuals);
        self.state = RunState::Initialized;
        debug!(population_size, "initial population evaluated");
        Ok(())
    }

    /// Recomputes every stale fitness value of the current population.
    ///
    /// Returns the number of evaluations performed.
    pub fn evaluate(&mut self) -> Result<usize> {
        let evaluated = evaluate_batch(
            self.fitness.as_ref(),
            self.population.individuals_mut(),
            self.options.parallel_threshold(),
        )?;
        if evaluated > 0 {
            trace!(evaluated, "re-evaluated stale fitness");
        }
        self.evaluations += evaluated;
        Ok(evaluated)
    }

    /// Runs generations until the stop condition holds or a stop is requested.
    ///
    /// A controller in `Created` or `Stopped` state is (re)initialized first;
    /// an `Initialized` controller continues from its existing population.
    ///
    /// # Errors
    ///
    /// Any configuration, selection, breeding, fitness or replacement error
    /// aborts the run. The controller is then `Stopped`, and the history holds
    /// every generation completed before the failure.
    pub fn run(&mut self) -> Result<&History<G>> {
        match self.state {
            RunState::Running => {
                return Err(GeneticError::Configuration(
                    "The algorithm is already running".to_string(),
                ))
            }
            RunState::Created | RunState::Stopped => {
                if let Err(e) = self.initialize() {
                    self.state = RunState::Stopped;
                    error!(error = %e, "initialization failed");
                    return Err(e);
                }
            }
            RunState::Initialized => {}
        }

        if let Err(e) = check_selection_fits(
            self.selection.replacement(),
            self.options.selection_size(),
            self.options.population_size(),
        ) {
            self.state = RunState::Stopped;
            error!(error = %e, "invalid configuration at run start");
            return Err(e);
        }

        self.state = RunState::Running;
        self.stop_requested = false;
        info!(
            population_size = self.options.population_size(),
            selection_size = self.options.selection_size(),
            offspring_size = self.options.offspring_size(),
            "evolution started"
        );

        match self.run_loop() {
            Ok(()) => {
                self.dispatch(Hook::AlgorithmEnds);
                self.state = RunState::Stopped;
                info!(
                    generations = self.history.len(),
                    evaluations = self.evaluations,
                    best_fitness = ?self.history.last().map(|e| e.best_fitness()),
                    "evolution finished"
                );
                Ok(&self.history)
            }
            Err(e) => {
                self.state = RunState::Stopped;
                error!(
                    generation = self.generation(),
                    completed = self.history.len(),
                    error = %e,
                    "evolution aborted"
                );
                Err(e)
            }
        }
    }

    fn run_loop(&mut self) -> Result<()> {
        self.evaluate()?;
        self.dispatch(Hook::AlgorithmBegins);

        loop {
            self.dispatch(Hook::StepBegins);
            self.step()?;
            self.dispatch(Hook::StepEnds);

            let algorithm: &Self = self;
            if algorithm.stop_requested || algorithm.stop_condition.should_stop(algorithm) {
                return Ok(());
            }
        }
    }

    /// Performs one generation, from selection to the history entry.
    fn step(&mut self) -> Result<()> {
        self.evaluate()?;
        let generation = self.population.generation() + 1;

        trace!(generation, "breeding");
        let mut offspring = self.breed(generation)?;

        trace!(generation, "mutating");
        self.mutate(&mut offspring, generation);

        trace!(generation, "evaluating offspring");
        self.evaluations += evaluate_batch(
            self.fitness.as_ref(),
            &mut offspring,
            self.options.parallel_threshold(),
        )?;

        let offspring_size = self.options.offspring_size();
        if offspring.len() != offspring_size {
            return Err(GeneticError::SizeMismatch {
                stage: "offspring",
                expected: offspring_size,
                actual: offspring.len(),
            });
        }

        trace!(generation, "replacing");
        let population_size = self.options.population_size();
        let next = self
            .replacement
            .replace(&self.population, offspring, population_size)?;
        if next.len() != population_size {
            return Err(GeneticError::SizeMismatch {
                stage: "replacement",
                expected: population_size,
                actual: next.len(),
            });
        }
        self.population.advance(next);

        let entry = self.history.record(&self.population, &self.statistics)?;
        debug!(
            generation = entry.generation(),
            best_fitness = entry.best_fitness(),
            "generation completed"
        );
        Ok(())
    }

    /// Fills the offspring pool by repeatedly selecting and recombining groups.
    fn breed(&mut self, generation: usize) -> Result<Vec<Arc<Individual<G>>>> {
        let wanted = self.options.offspring_size();
        let selection_size = self.options.selection_size();
        let probability = self.options.recombination_probability();

        let mut offspring = Vec::with_capacity(wanted);
        let mut barren = 0;
        while offspring.len() < wanted {
            let parents = self.selection.select(&self.population, selection_size)?;
            let children = self.recombination.apply(&parents, probability, generation)?;

            if children.is_empty() {
                barren += 1;
                if barren >= MAX_BARREN_ROUNDS {
                    return Err(GeneticError::MaxAttemptsReached(format!(
                        "{} consecutive parent groups produced no offspring",
                        barren
                    )));
                }
                continue;
            }
            barren = 0;

            let room = wanted - offspring.len();
            if children.len() > room {
                trace!(
                    discarded = children.len() - room,
                    "surplus offspring discarded"
                );
                let kept = self.recombination.rng().sample_indices(children.len(), room);
                offspring.extend(kept.into_iter().map(|idx| children[idx].clone()));
            } else {
                offspring.extend(children);
            }
        }

        Ok(offspring)
    }

    fn mutate(&mut self, offspring: &mut [Arc<Individual<G>>], generation: usize) {
        let probability = self.options.mutation_probability();
        for individual in offspring.iter_mut() {
            if let Some(genotype) = self.mutation.mutate(individual.genotype(), probability) {
                *individual = Arc::new(individual.mutant(genotype, generation));
            }
        }
    }

    fn dispatch(&mut self, hook: Hook) {
        if self.callbacks.is_empty() {
            return;
        }
        trace!(?hook, "notifying callbacks");
        let mut callbacks = std::mem::take(&mut self.callbacks);
        callbacks.notify(hook, self);
        self.callbacks = callbacks;
    }

    /// Drops the population and the history of the previous run.
    fn reset(&mut self) {
        self.population = Population::empty();
        self.history.clear();
        self.evaluations = 0;
        self.state = RunState::Created;
    }

    fn ensure_idle(&self, what: &str) -> Result<()> {
        if self.state == RunState::Running {
            return Err(GeneticError::Configuration(format!(
                "Cannot replace {} while the algorithm is running",
                what
            )));
        }
        Ok(())
    }
}

impl<G: Genotype> std::fmt::Debug for GeneticAlgorithm<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneticAlgorithm")
            .field("options", &self.options)
            .field("state", &self.state)
            .field("generation", &self.generation())
            .field("selection", &self.selection)
            .field("recombination", &self.recombination)
            .field("mutation", &self.mutation)
            .field("replacement", &self.replacement)
            .field("callbacks", &self.callbacks)
            .field("history", &self.history.len())
            .finish()
    }
}
