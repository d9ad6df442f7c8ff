#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::module_name_repetitions
)]

//! Neuroevolution core: fixed-topology feedforward controllers evolved with a
//! genetic algorithm.
//!
//! A caller builds a [`Session`] (or a [`Population`] plus
//! [`GeneticAlgorithm`] directly), feeds sensor vectors through the networks,
//! reports fitness, and evolves the population one generation at a time.
//! Networks round-trip losslessly through [`Genome`] for storage.

pub mod error;
pub mod evolution;
pub mod genome;
pub mod nn;
pub mod population;
pub mod session;
pub mod tensor;
pub mod topology;

pub use error::{NeuroError, Result};
pub use evolution::{
    crossover, CrossoverMethod, EvolutionConfig, GeneticAlgorithm, MutationAdjustment,
    SelectionStrategy, Statistics,
};
pub use genome::Genome;
pub use nn::{Dense, Network};
pub use population::Population;
pub use session::{
    EvolutionResult, FitnessBatch, FitnessScore, MotorOutput, SensorInput, Session,
    SessionStatus, SimulationConfig,
};
pub use tensor::Tensor;
pub use topology::LayerSizes;
