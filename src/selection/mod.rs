//! # Selection schemas
//!
//! Selection picks the parents of the next generation. Every schema implements
//! [`SelectionSchema`], owns its own seedable random source, and can be switched
//! between selection with and without replacement at runtime.

pub mod monte_carlo;
pub mod rank;
pub mod roulette;
pub mod selection_schema;
pub mod tournament;
pub mod truncation;

pub use monte_carlo::MonteCarlo;
pub use rank::{ExponentialRank, LinearRank};
pub use roulette::RouletteWheel;
pub use selection_schema::SelectionSchema;
pub use tournament::Tournament;
pub use truncation::Truncation;
