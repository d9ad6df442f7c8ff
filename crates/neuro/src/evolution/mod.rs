//! Genetic operators and the generational driver.

pub mod config;
pub mod crossover;
pub mod engine;
pub mod selection;

pub use config::EvolutionConfig;
pub use crossover::{crossover, CrossoverMethod};
pub use engine::{GeneticAlgorithm, MutationAdjustment, Statistics};
pub use selection::{roulette_index, tournament_index, SelectionStrategy};
