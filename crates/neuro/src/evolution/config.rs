use super::{CrossoverMethod, SelectionStrategy};
use crate::error::{NeuroError, Result};
use serde::{Deserialize, Serialize};

/// Rates and operator choices for a [`super::GeneticAlgorithm`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    /// Fraction of top performers carried over unchanged.
    pub elitism_rate: f32,
    /// Per-parameter probability of mutation.
    pub mutation_rate: f32,
    /// Standard deviation of mutation noise.
    pub mutation_strength: f32,
    /// Probability of crossover rather than cloning the parents.
    pub crossover_rate: f32,
    pub tournament_size: usize,
    pub selection: SelectionStrategy,
    pub crossover: CrossoverMethod,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            elitism_rate: 0.05,
            mutation_rate: 0.05,
            mutation_strength: 0.3,
            crossover_rate: 0.7,
            tournament_size: 5,
            selection: SelectionStrategy::Tournament,
            crossover: CrossoverMethod::Uniform,
        }
    }
}

impl EvolutionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(NeuroError::InvalidConfig("population_size must be at least 1".into()));
        }
        if self.tournament_size < 2 {
            return Err(NeuroError::InvalidConfig("tournament_size must be at least 2".into()));
        }
        check_range("mutation_rate", self.mutation_rate, 1.0)?;
        check_range("mutation_strength", self.mutation_strength, 1.0)?;
        check_range("crossover_rate", self.crossover_rate, 1.0)?;
        check_range("elitism_rate", self.elitism_rate, 0.5)?;
        Ok(())
    }

    /// `max(1, round(population_size * elitism_rate))`, never more than the population.
    #[must_use]
    pub fn elite_count(&self) -> usize {
        let elites = (self.population_size as f32 * self.elitism_rate).round() as usize;
        elites.max(1).min(self.population_size)
    }
}

fn check_range(name: &str, value: f32, max: f32) -> Result<()> {
    if (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(NeuroError::InvalidConfig(format!("{name} must lie in [0, {max}], got {value}")))
    }
}
