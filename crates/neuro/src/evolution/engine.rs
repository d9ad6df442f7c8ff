use super::{crossover, CrossoverMethod, EvolutionConfig};
use crate::error::Result;
use crate::nn::Network;
use crate::population::Population;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

/// Number of recorded generations the improvement ratio looks back over.
pub const IMPROVEMENT_WINDOW: usize = 10;

const STAGNATION_THRESHOLD: f32 = 0.01;
const CONVERGENCE_THRESHOLD: f32 = 0.1;
const MUTATION_RATE_BOUNDS: (f32, f32) = (0.01, 0.2);
const MUTATION_STRENGTH_BOUNDS: (f32, f32) = (0.1, 0.5);

/// What [`GeneticAlgorithm::adaptive_mutation`] did to the mutation pressure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationAdjustment {
    /// Improvement below 1%: rate and strength scaled up by 10%.
    Increased,
    /// Improvement above 10%: rate and strength scaled down by 5%.
    Decreased,
    Unchanged,
}

/// Snapshot of the engine state for callers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Statistics {
    pub generation: u32,
    pub best_fitness_history: Vec<f32>,
    pub avg_fitness_history: Vec<f32>,
    pub current_best_fitness: f32,
    pub current_avg_fitness: f32,
    pub improvement: f32,
    pub mutation_rate: f32,
    pub mutation_strength: f32,
}

/// Generational driver: turns a scored population into the next one.
#[derive(Clone, Debug)]
pub struct GeneticAlgorithm {
    config: EvolutionConfig,
    generation: u32,
    best_fitness_history: Vec<f32>,
    avg_fitness_history: Vec<f32>,
    mutation_rate: f32,
    mutation_strength: f32,
}

impl GeneticAlgorithm {
    pub fn new(config: EvolutionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            mutation_rate: config.mutation_rate,
            mutation_strength: config.mutation_strength,
            config,
            generation: 0,
            best_fitness_history: Vec::new(),
            avg_fitness_history: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[must_use]
    pub fn best_fitness_history(&self) -> &[f32] {
        &self.best_fitness_history
    }

    #[must_use]
    pub fn avg_fitness_history(&self) -> &[f32] {
        &self.avg_fitness_history
    }

    #[must_use]
    pub fn mutation_rate(&self) -> f32 {
        self.mutation_rate
    }

    #[must_use]
    pub fn mutation_strength(&self) -> f32 {
        self.mutation_strength
    }

    /// Copy of the winner of one tournament over `population`.
    pub fn tournament_selection(&self, population: &Population, rng: &mut impl Rng) -> Network {
        let idx = super::tournament_index(population.fitness_scores(), self.config.tournament_size, rng);
        population.networks()[idx].copy()
    }

    /// Copy of a fitness-proportionate pick from `population`.
    pub fn roulette_selection(&self, population: &Population, rng: &mut impl Rng) -> Network {
        let idx = super::roulette_index(population.fitness_scores(), rng);
        population.networks()[idx].copy()
    }

    /// Copy of a parent chosen with the configured strategy.
    pub fn select(&self, population: &Population, rng: &mut impl Rng) -> Network {
        let idx = self.config.selection.select_index(
            population.fitness_scores(),
            self.config.tournament_size,
            rng,
        );
        population.networks()[idx].copy()
    }

    pub fn crossover(
        &self,
        parent1: &Network,
        parent2: &Network,
        method: CrossoverMethod,
        rng: &mut impl Rng,
    ) -> (Network, Network) {
        crossover(parent1, parent2, method, rng)
    }

    /// Advances one generation.
    ///
    /// Records best and mean fitness, carries the elites over unchanged, then
    /// fills the rest with mutated offspring of selected parents. The result
    /// always holds `config.population_size` networks with zeroed fitness;
    /// `population` itself is left untouched.
    pub fn evolve(&mut self, population: &Population, rng: &mut impl Rng) -> Population {
        self.generation += 1;

        let best_fitness = population.best_fitness();
        let avg_fitness = population.average_fitness();
        self.best_fitness_history.push(best_fitness);
        self.avg_fitness_history.push(avg_fitness);

        let target = self.config.population_size;
        let ranked = population.ranked_indices();
        let elite_count = self.config.elite_count().min(ranked.len());

        let mut next: Vec<Network> = Vec::with_capacity(target);
        next.extend(ranked.iter().take(elite_count).map(|&i| population.networks()[i].copy()));

        while next.len() < target {
            let parent1 = self.select(population, rng);
            let parent2 = self.select(population, rng);

            let (mut child1, mut child2) = if rng.gen::<f32>() < self.config.crossover_rate {
                crossover(&parent1, &parent2, self.config.crossover, rng)
            } else {
                (parent1, parent2)
            };

            child1.mutate(self.mutation_rate, self.mutation_strength, rng);
            child2.mutate(self.mutation_rate, self.mutation_strength, rng);

            next.push(child1);
            if next.len() < target {
                next.push(child2);
            }
        }

        debug!(
            generation = self.generation,
            best_fitness,
            avg_fitness,
            elite_count,
            population = next.len(),
            "evolved population"
        );
        Population::from_parts(population.layer_sizes().clone(), next)
    }

    /// Relative change of the best fitness across the last
    /// [`IMPROVEMENT_WINDOW`] generations, or 0 with a shorter history.
    #[must_use]
    pub fn improvement(&self) -> f32 {
        let history = &self.best_fitness_history;
        if history.len() < IMPROVEMENT_WINDOW {
            return 0.0;
        }
        let recent = &history[history.len() - IMPROVEMENT_WINDOW..];
        let first = recent[0];
        let last = recent[IMPROVEMENT_WINDOW - 1];
        (last - first) / first.abs().max(1.0)
    }

    /// Raises mutation pressure on stagnation and lowers it on fast progress.
    /// Not called by [`GeneticAlgorithm::evolve`].
    pub fn adaptive_mutation(&mut self) -> MutationAdjustment {
        let improvement = self.improvement();
        let adjustment = if improvement < STAGNATION_THRESHOLD {
            self.mutation_rate = (self.mutation_rate * 1.1).min(MUTATION_RATE_BOUNDS.1);
            self.mutation_strength = (self.mutation_strength * 1.1).min(MUTATION_STRENGTH_BOUNDS.1);
            MutationAdjustment::Increased
        } else if improvement > CONVERGENCE_THRESHOLD {
            self.mutation_rate = (self.mutation_rate * 0.95).max(MUTATION_RATE_BOUNDS.0);
            self.mutation_strength = (self.mutation_strength * 0.95).max(MUTATION_STRENGTH_BOUNDS.0);
            MutationAdjustment::Decreased
        } else {
            MutationAdjustment::Unchanged
        };
        debug!(
            improvement,
            ?adjustment,
            mutation_rate = self.mutation_rate,
            mutation_strength = self.mutation_strength,
            "adaptive mutation"
        );
        adjustment
    }

    #[must_use]
    pub fn statistics(&self) -> Statistics {
        Statistics {
            generation: self.generation,
            best_fitness_history: self.best_fitness_history.clone(),
            avg_fitness_history: self.avg_fitness_history.clone(),
            current_best_fitness: self.best_fitness_history.last().copied().unwrap_or(0.0),
            current_avg_fitness: self.avg_fitness_history.last().copied().unwrap_or(0.0),
            improvement: self.improvement(),
            mutation_rate: self.mutation_rate,
            mutation_strength: self.mutation_strength,
        }
    }

    /// Clears the generation counter and both histories. Mutation rate and
    /// strength keep their current values.
    pub fn reset(&mut self) {
        self.generation = 0;
        self.best_fitness_history.clear();
        self.avg_fitness_history.clear();
    }
}
