//! # Error Types
//!
//! This module defines the error type shared by every part of the engine.
//! Configuration problems are reported by the setter that caused them (or at
//! run start), contract violations such as reading a fitness that was never
//! computed are fatal to the call, and fitness failures abort the run with the
//! offending individual identified.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use genloop::error::{GeneticError, Result};
//!
//! fn checked_size(size: usize) -> Result<usize> {
//!     if size == 0 {
//!         return Err(GeneticError::Configuration(
//!             "Population size cannot be zero".to_string(),
//!         ));
//!     }
//!     Ok(size)
//! }
//!
//! assert!(checked_size(0).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use genloop::error::{GeneticError, OptionExt};
//!
//! fn find_best_candidate(candidates: &[i32]) -> genloop::error::Result<i32> {
//!     candidates.iter().max().cloned().ok_or_else_genetic(||
//!         GeneticError::EmptyPopulation
//!     )
//! }
//! ```

use thiserror::Error;

use crate::genotype::IndividualId;

/// Boxed error returned by user supplied fitness functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Represents errors that can occur while configuring or running a genetic algorithm.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// An invalid or inconsistent parameter was provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The fitness of an individual was read before it was computed.
    #[error("Individual {id} has not been evaluated")]
    NotEvaluated { id: IndividualId },

    /// A selection without replacement asked for more individuals than exist.
    #[error("Cannot select {requested} individuals without replacement from a population of {available}")]
    InsufficientPopulation { requested: usize, available: usize },

    /// An operator produced a number of individuals inconsistent with the configuration.
    #[error("Size mismatch in {stage}: expected {expected}, got {actual}")]
    SizeMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The fitness function failed for an individual.
    #[error("Fitness evaluation failed for individual {id} ({genotype}): {source}")]
    FitnessEvaluation {
        id: IndividualId,
        genotype: String,
        #[source]
        source: BoxError,
    },

    /// An operation needed a non-empty population.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// A recombination operator rejected its parents.
    #[error("Breeding error: {0}")]
    Breeding(String),

    /// Error that occurs when NaN, infinite or otherwise unusable values are encountered.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// Error that occurs when a maximum number of attempts is reached.
    #[error("Maximum attempts reached: {0}")]
    MaxAttemptsReached(String),
}

/// A specialized Result type for genetic algorithm operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
///
/// ## Examples
///
/// ```rust
/// use genloop::error::{GeneticError, OptionExt};
///
/// let empty: Vec<f64> = Vec::new();
/// let result = empty.first().ok_or_else_genetic(|| GeneticError::EmptyPopulation);
/// assert!(result.is_err());
/// ```
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
